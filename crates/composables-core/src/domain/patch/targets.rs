//! Adding one platform to an existing module build file.

use std::fmt;

use tracing::debug;

use crate::domain::{
    DomainValidator,
    entities::ProjectIdentity,
    fragments,
    patch::document::{Block, ConfigDocument},
    value_objects::Platform,
};

/// One edit `add_target` may make.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchStep {
    Imports,
    Plugin,
    KotlinTarget,
    Dependencies,
    ConfigurationBlock,
}

impl fmt::Display for PatchStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Imports => "imports",
            Self::Plugin => "plugins block",
            Self::KotlinTarget => "kotlin block",
            Self::Dependencies => "sourceSets block",
            Self::ConfigurationBlock => "configuration block",
        };
        f.write_str(name)
    }
}

/// What a successful patch changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchReport {
    pub content: String,
    pub applied: Vec<PatchStep>,
    /// Steps whose anchor block could not be found.
    pub skipped: Vec<PatchStep>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchOutcome {
    Applied(PatchReport),
    AlreadyPresent,
}

/// Insert everything `platform` needs into a module build file.
///
/// Returns `AlreadyPresent` without touching anything when one of the
/// platform's markers is already in the text. Steps whose block is missing
/// are skipped and listed in the report.
pub fn add_target(content: &str, platform: Platform, identity: &ProjectIdentity) -> PatchOutcome {
    if platform.is_configured_in(content) {
        return PatchOutcome::AlreadyPresent;
    }

    let mut doc = ConfigDocument::parse(content);
    let mut applied = Vec::new();
    let mut skipped = Vec::new();
    let mut record = |step: PatchStep, ok: bool| {
        if ok {
            applied.push(step);
        } else {
            debug!(%platform, %step, "anchor block not found, skipping");
            skipped.push(step);
        }
    };

    let mut imported = false;
    for import in fragments::imports(platform) {
        imported |= doc.ensure_import(import);
    }
    if imported {
        record(PatchStep::Imports, true);
    }

    if let Some(alias) = fragments::plugin_alias(platform) {
        let line = fragments::module_plugin_line(alias);
        if !doc.contains(line.trim()) {
            let ok = doc.insert_before_block_end(Block::Plugins, &line);
            record(PatchStep::Plugin, ok);
        }
    }

    let targets = fragments::kotlin_targets(platform, identity).join("\n\n");
    let ok = doc.insert_before_block_end(Block::Kotlin, &format!("\n{targets}"));
    record(PatchStep::KotlinTarget, ok);

    let deps = fragments::dependencies(platform);
    let ok = doc.insert_before_block_end(Block::SourceSets, &format!("\n{deps}"));
    record(PatchStep::Dependencies, ok);

    if let Some(block) = fragments::configuration_block(platform, identity) {
        doc.append_block(&format!("\n{block}"));
        record(PatchStep::ConfigurationBlock, true);
    }

    PatchOutcome::Applied(PatchReport {
        content: doc.render(),
        applied,
        skipped,
    })
}

/// Namespace declared by a module build file.
///
/// An Android `namespace = "…"` wins over a desktop `packageName = "…"`.
/// Values that are not valid package names are ignored.
pub fn extract_namespace(content: &str) -> Option<String> {
    assigned_value(content, "namespace").or_else(|| assigned_value(content, "packageName"))
}

fn assigned_value(content: &str, key: &str) -> Option<String> {
    content.lines().find_map(|line| {
        let rest = line.trim().strip_prefix(key)?;
        let value = rest.trim_start().strip_prefix('=')?.trim();
        let value = value.strip_prefix('"')?;
        let end = value.find('"')?;
        let value = &value[..end];
        DomainValidator::validate_namespace(value)
            .is_ok()
            .then(|| value.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const JVM_ONLY: &str = r#"import org.jetbrains.compose.desktop.application.dsl.TargetFormat

plugins {
    alias(libs.plugins.jetbrains.kotlin.multiplatform)
    alias(libs.plugins.jetbrains.compose)
}

kotlin {
    jvm()

    sourceSets {
        commonMain.dependencies {
            implementation(compose.runtime)
        }
        jvmMain.dependencies {
            implementation(compose.desktop.currentOs)
        }
    }
}

compose.desktop {
    application {
        mainClass = "io.acme.notes.MainKt"

        nativeDistributions {
            packageName = "io.acme.notes"
        }
    }
}
"#;

    fn applied(outcome: PatchOutcome) -> PatchReport {
        match outcome {
            PatchOutcome::Applied(report) => report,
            PatchOutcome::AlreadyPresent => panic!("expected a patch"),
        }
    }

    #[test]
    fn existing_target_is_left_alone() {
        assert_eq!(
            add_target(JVM_ONLY, Platform::Jvm, &ProjectIdentity::default()),
            PatchOutcome::AlreadyPresent
        );
    }

    #[test]
    fn adding_android_touches_every_block() {
        let report = applied(add_target(
            JVM_ONLY,
            Platform::Android,
            &ProjectIdentity::default(),
        ));
        let text = &report.content;

        assert!(text.contains("import org.jetbrains.kotlin.gradle.dsl.JvmTarget\n\nplugins"));
        assert!(text.contains(
            "    alias(libs.plugins.jetbrains.compose)\n    alias(libs.plugins.android.application)\n}"
        ));
        assert!(text.contains("    androidTarget {"));
        assert!(text.contains("        androidMain.dependencies {"));
        assert!(text.trim_end().ends_with('}'));
        assert!(text.contains("android {\n    namespace = \"com.example.app\""));
        assert!(text.ends_with("}\n"));
        assert!(report.skipped.is_empty());
        assert_eq!(report.applied.len(), 5);
    }

    #[test]
    fn second_add_is_idempotent() {
        let id = ProjectIdentity::default();
        for platform in [Platform::Android, Platform::Ios, Platform::Web] {
            let once = applied(add_target(JVM_ONLY, platform, &id)).content;
            assert_eq!(add_target(&once, platform, &id), PatchOutcome::AlreadyPresent);
        }
    }

    #[test]
    fn target_goes_inside_kotlin_block() {
        let report = applied(add_target(JVM_ONLY, Platform::Ios, &ProjectIdentity::default()));
        let kotlin_end = report
            .content
            .find("\n}\n\ncompose.desktop")
            .expect("kotlin block still closes before compose.desktop");
        let ios = report.content.find("iosArm64()").unwrap();
        assert!(ios < kotlin_end);
    }

    #[test]
    fn missing_blocks_are_reported_as_skipped() {
        let report = applied(add_target(
            "// empty build\n",
            Platform::Web,
            &ProjectIdentity::default(),
        ));
        assert_eq!(
            report.skipped,
            vec![PatchStep::KotlinTarget, PatchStep::Dependencies]
        );
        assert!(report.content.contains("import org.jetbrains.kotlin.gradle.ExperimentalWasmDsl"));
    }

    #[test]
    fn namespace_comes_from_build_file() {
        assert_eq!(extract_namespace(JVM_ONLY).as_deref(), Some("io.acme.notes"));
        assert_eq!(
            extract_namespace("android {\n    namespace = \"org.demo\"\n}").as_deref(),
            Some("org.demo")
        );
        assert_eq!(extract_namespace("kotlin {}"), None);
    }

    #[test]
    fn namespace_prefers_android_over_desktop_package() {
        let build = "compose.desktop {\n    packageName = \"io.acme.desk\"\n}\nandroid {\n    namespace = \"io.acme.mobile\"\n}\n";
        assert_eq!(extract_namespace(build).as_deref(), Some("io.acme.mobile"));
    }

    #[test]
    fn invalid_package_names_are_ignored() {
        let build = "nativeDistributions {\n    packageName = \"MyDesktopApp\"\n}\n";
        assert_eq!(extract_namespace(build), None);
    }
}
