// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Composables.
//!
//! Pure logic over strings and paths: which template files a project gets,
//! where they land, what the placeholders resolve to, and how an existing
//! build file is patched. All I/O goes through the ports defined in the
//! application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, process or network calls
//! - **Few crates**: std, thiserror, regex, tracing (debug events only)
//! - **Immutable values**: identities and target sets are validated once
//!
// Public API - what the world sees
pub mod entities;
pub mod error;
pub mod fragments;
pub mod patch;
pub mod path_filter;
pub mod tokens;
pub mod value_objects;

mod validation;

// Re-exports for convenience
pub use entities::{
    ProjectIdentity,
    common::{Permissions, TemplatePath},
    identity::to_camel_case,
    project_structure::{FileToWrite, ProjectStructure},
};

pub use error::{DomainError, ErrorCategory};

pub use patch::{ConfigDocument, PatchOutcome, PatchReport, PatchStep};

pub use tokens::TokenTable;

pub use value_objects::{Platform, SourceSet, TargetSet};

pub use validation::DomainValidator;

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Cross-module behaviour
    // ========================================================================

    #[test]
    fn every_platform_fragment_is_detected_after_insertion() {
        let identity = ProjectIdentity::default();
        for platform in Platform::ALL {
            let text = fragments::kotlin_targets(platform, &identity).join("\n");
            assert!(
                platform.is_configured_in(&text),
                "{platform} markers miss its own fragment"
            );
        }
    }

    #[test]
    fn generated_build_file_is_detected_for_selected_targets_only() {
        let targets: TargetSet = "jvm,web".parse().unwrap();
        let table = TokenTable::assemble(&targets, &ProjectIdentity::default());
        let build = tokens::substitute(
            "{{imports}}\n{{plugins}}\n\nkotlin {\n{{kotlin_targets}}\n{{sourcesets}}\n}\n\n{{configuration_blocks}}\n",
            &table,
        );

        assert!(Platform::Jvm.is_configured_in(&build));
        assert!(Platform::Web.is_configured_in(&build));
        assert!(!Platform::Android.is_configured_in(&build));
        assert!(!Platform::Ios.is_configured_in(&build));
        assert!(!tokens::has_markers(&build));
    }

    #[test]
    fn template_paths_round_trip_through_filter_and_rewrite() {
        let identity = ProjectIdentity::new("dev.demo", "Demo", "app").unwrap();
        let path = TemplatePath::new("composeApp/src/webMain/kotlin/org/example/project/main.web.kt")
            .unwrap();
        let targets = TargetSet::single(Platform::Web);

        assert!(path_filter::include(&path, &targets, path_filter::TEMPLATE_MODULE).unwrap());
        assert_eq!(
            path_filter::destination(&path, &identity).as_str(),
            "app/src/webMain/kotlin/dev/demo/main.web.kt"
        );
    }
}
