//! Which bundled template files make it into a generated project, and where
//! they land.
//!
//! The template tree is laid out exactly like a generated project that uses
//! the placeholder identity `org.example.project` / `composeApp`, so every
//! decision here is a rule over path segments.

use crate::domain::{
    entities::{
        ProjectIdentity,
        common::{Permissions, TemplatePath},
    },
    error::DomainError,
    value_objects::{Platform, SourceSet, TargetSet},
};

/// Root directory of the project template inside the bundle.
pub const TEMPLATE_ROOT: &str = "project";
/// Module directory name used by the template.
pub const TEMPLATE_MODULE: &str = "composeApp";
/// Namespace directories used by the template sources.
pub const TEMPLATE_NAMESPACE: [&str; 3] = ["org", "example", "project"];
/// Top-level directory holding the Xcode project.
pub const IOS_APP_ROOT: &str = "iosApp";
/// Webpack configuration directory inside the module.
pub const WEB_BUNDLER_DIR: &str = "webpack.config.d";
/// Wrapper script that must stay executable.
pub const WRAPPER_SCRIPT: &str = "gradlew";

/// Decide whether `path` (relative to the template root) belongs in a
/// project targeting `targets`.
///
/// # Errors
///
/// `DomainError::UnknownSourceSet` when a directory under
/// `<module>/src/` is not a source set any platform owns. A template tree
/// with unexpected platform code is rejected rather than copied.
pub fn include(
    path: &TemplatePath,
    targets: &TargetSet,
    module_base: &str,
) -> Result<bool, DomainError> {
    let segments: Vec<&str> = path.segments().collect();

    if segments[0] == IOS_APP_ROOT && !targets.contains(Platform::Ios) {
        return Ok(false);
    }

    let in_module = segments[0] == module_base;

    if in_module && segments.len() >= 4 && segments[1] == "src" {
        let name = segments[2];
        let source_set =
            SourceSet::classify(name).ok_or_else(|| DomainError::UnknownSourceSet {
                set: name.to_string(),
                path: path.to_string(),
            })?;
        if !source_set.is_selected(targets) {
            return Ok(false);
        }
    }

    if in_module
        && segments.len() >= 3
        && segments[1] == WEB_BUNDLER_DIR
        && !targets.contains(Platform::Web)
    {
        return Ok(false);
    }

    Ok(true)
}

/// Rewrite a template path into its destination for `identity`.
///
/// - `org/example/project` becomes the namespace directories
/// - a `composeApp` segment becomes the module name
/// - a leading `iosApp` becomes `ios<Module>`
pub fn destination(path: &TemplatePath, identity: &ProjectIdentity) -> TemplatePath {
    let namespace = identity.namespace_path();
    let ios_dir = identity.ios_app_dir();
    let segments: Vec<&str> = path.segments().collect();

    let mut out: Vec<String> = Vec::with_capacity(segments.len() + 2);
    let mut i = 0;
    while i < segments.len() {
        if segments[i..].starts_with(&TEMPLATE_NAMESPACE) {
            out.push(namespace.clone());
            i += TEMPLATE_NAMESPACE.len();
            continue;
        }

        let segment = segments[i];
        let rewritten = if i == 0 && segment == IOS_APP_ROOT {
            ios_dir.clone()
        } else if segment == TEMPLATE_MODULE {
            identity.module_name().to_string()
        } else {
            segment.to_string()
        };
        out.push(rewritten);
        i += 1;
    }

    // Every input segment produces a non-empty output segment.
    TemplatePath::new(out.join("/")).unwrap_or_else(|_| path.clone())
}

/// Permissions a copied file should carry.
pub fn permissions_for(path: &TemplatePath) -> Permissions {
    if path.file_name() == WRAPPER_SCRIPT {
        Permissions::executable()
    } else {
        Permissions::regular()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(s: &str) -> TemplatePath {
        TemplatePath::new(s).unwrap()
    }

    fn web_only() -> TargetSet {
        TargetSet::single(Platform::Web)
    }

    #[test]
    fn ios_app_root_needs_ios() {
        let path = p("iosApp/iosApp/ContentView.swift");
        assert!(!include(&path, &web_only(), TEMPLATE_MODULE).unwrap());
        assert!(include(&path, &TargetSet::single(Platform::Ios), TEMPLATE_MODULE).unwrap());
    }

    #[test]
    fn platform_source_sets_follow_selection() {
        let targets = web_only();
        let cases = [
            ("composeApp/src/androidMain/AndroidManifest.xml", false),
            ("composeApp/src/jvmMain/kotlin/main.kt", false),
            ("composeApp/src/iosMain/kotlin/Main.kt", false),
            ("composeApp/src/webMain/kotlin/main.web.kt", true),
            ("composeApp/src/commonMain/kotlin/App.kt", true),
            ("composeApp/build.gradle.kts", true),
        ];
        for (path, expected) in cases {
            assert_eq!(
                include(&p(path), &targets, TEMPLATE_MODULE).unwrap(),
                expected,
                "{path}"
            );
        }
    }

    #[test]
    fn unknown_source_set_fails_fast() {
        let err = include(
            &p("composeApp/src/linuxX64Main/kotlin/a.kt"),
            &TargetSet::all(),
            TEMPLATE_MODULE,
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::UnknownSourceSet { set, .. } if set == "linuxX64Main"));
    }

    #[test]
    fn webpack_config_needs_web() {
        let path = p("composeApp/webpack.config.d/watch.js");
        assert!(!include(&path, &TargetSet::single(Platform::Jvm), TEMPLATE_MODULE).unwrap());
        assert!(include(&path, &web_only(), TEMPLATE_MODULE).unwrap());
    }

    #[test]
    fn destination_rewrites_namespace_module_and_ios_root() {
        let id = ProjectIdentity::new("io.acme.notes", "Notes", "shared").unwrap();
        assert_eq!(
            destination(&p("composeApp/src/commonMain/kotlin/org/example/project/App.kt"), &id)
                .as_str(),
            "shared/src/commonMain/kotlin/io/acme/notes/App.kt"
        );
        assert_eq!(
            destination(&p("iosApp/iosApp/iOSApp.swift"), &id).as_str(),
            "iosShared/iosApp/iOSApp.swift"
        );
        assert_eq!(
            destination(&p("gradle/wrapper/gradle-wrapper.properties"), &id).as_str(),
            "gradle/wrapper/gradle-wrapper.properties"
        );
    }

    #[test]
    fn wrapper_script_is_executable() {
        assert!(permissions_for(&p("gradlew")).executable_flag());
        assert!(!permissions_for(&p("gradlew.bat")).executable_flag());
    }
}
