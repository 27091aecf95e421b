//! Patches for the project files next to a module: root build file,
//! `gradle.properties`, version catalog and settings.
//!
//! Every function takes the current text and returns `None` when nothing
//! needed to change, so callers never rewrite an untouched file.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{
    fragments::{self, CatalogEntry, CatalogSection},
    patch::document::{Block, ConfigDocument},
    value_objects::{Platform, TargetSet},
};

static INCLUDE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"include\s*\(\s*["']([^"']+)["']\s*\)"#).expect("include pattern is valid")
});

fn required_plugin_aliases(targets: &TargetSet) -> Vec<&'static str> {
    fragments::BASE_PLUGIN_ALIASES
        .into_iter()
        .chain(targets.iter().filter_map(fragments::plugin_alias))
        .collect()
}

/// Make sure the root build file declares every plugin the module applies,
/// with `apply false`.
pub fn ensure_root_plugins(root_build: &str, targets: &TargetSet) -> Option<String> {
    let mut doc = ConfigDocument::parse(root_build);
    let aliases = required_plugin_aliases(targets);

    if doc.find_block_end(Block::Plugins).is_none() {
        let mut block = vec!["plugins {".to_string()];
        block.extend(aliases.iter().map(|a| fragments::root_plugin_line(a)));
        block.push("}".to_string());
        if !root_build.is_empty() {
            block.push(String::new());
        }
        doc.prepend(&block.join("\n"));
        return Some(doc.render());
    }

    // An alias is present when some line references it exactly, so
    // `jetbrains.compose` is not satisfied by `jetbrains.compose.compiler`.
    let missing: Vec<String> = aliases
        .iter()
        .filter(|alias| {
            let reference = format!("libs.plugins.{alias})");
            !doc.contains(&reference)
        })
        .map(|alias| fragments::root_plugin_line(alias))
        .collect();

    if missing.is_empty() {
        return None;
    }
    doc.insert_before_block_end(Block::Plugins, &missing.join("\n"));
    Some(doc.render())
}

/// Append the Android properties unless `android.useAndroidX` is set.
pub fn ensure_android_properties(properties: &str) -> Option<String> {
    if properties.contains(fragments::ANDROID_PROPERTIES_MARKER) {
        return None;
    }
    let mut out = properties.to_string();
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
    if !out.is_empty() {
        out.push('\n');
    }
    out.push_str(fragments::ANDROID_PROPERTIES_APPENDED);
    Some(out)
}

/// Add every catalog entry the module needs and the catalog lacks.
///
/// Presence is decided per key inside its own section, so `compose` is not
/// satisfied by a `compose-hotreload` line.
pub fn ensure_catalog_entries(catalog: &str, targets: &TargetSet) -> Option<String> {
    let wanted: Vec<&CatalogEntry> = fragments::BASE_CATALOG
        .iter()
        .chain(targets.iter().flat_map(fragments::catalog_entries))
        .collect();

    let mut doc = ConfigDocument::parse(catalog);
    let mut changed = false;

    for section in [
        CatalogSection::Versions,
        CatalogSection::Libraries,
        CatalogSection::Plugins,
    ] {
        let missing: Vec<&str> = wanted
            .iter()
            .filter(|e| e.section == section && !section_has_key(&doc, section, e.key))
            .map(|e| e.line)
            .collect();
        if missing.is_empty() {
            continue;
        }
        changed = true;

        let header = section.header();
        match doc.lines().iter().position(|l| l.trim() == header) {
            Some(index) => doc.insert_at(index + 1, &missing.join("\n")),
            None => {
                let mut block = vec![String::new(), header.to_string()];
                block.extend(missing.iter().map(|l| l.to_string()));
                doc.append_block(&block.join("\n"));
            }
        }
    }

    changed.then(|| doc.render())
}

fn section_has_key(doc: &ConfigDocument, section: CatalogSection, key: &str) -> bool {
    let header = section.header();
    doc.lines()
        .iter()
        .skip_while(|l| l.trim() != header)
        .skip(1)
        .take_while(|l| !l.trim_start().starts_with('['))
        .any(|l| {
            l.trim_start()
                .strip_prefix(key)
                .is_some_and(|rest| rest.trim_start().starts_with('='))
        })
}

/// Register `module` in the settings file unless an `include` names it.
pub fn include_module(settings: &str, module: &str) -> Option<String> {
    let wanted = format!(":{module}");
    let already = INCLUDE_RE
        .captures_iter(settings)
        .any(|c| c.get(1).is_some_and(|m| m.as_str() == wanted || m.as_str() == module));
    if already {
        return None;
    }

    let mut doc = ConfigDocument::parse(settings);
    doc.append_block(&format!("\ninclude(\"{wanted}\")"));
    Some(doc.render())
}

/// Platforms whose sibling files need patching when added to a project.
pub fn needs_sibling_patches(platform: Platform) -> bool {
    !fragments::catalog_entries(platform).is_empty() || fragments::plugin_alias(platform).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn android() -> TargetSet {
        TargetSet::single(Platform::Android)
    }

    #[test]
    fn root_plugins_added_once() {
        let root = "plugins {\n    alias(libs.plugins.jetbrains.compose.compiler) apply false\n}\n";
        let patched = ensure_root_plugins(root, &android()).unwrap();
        assert!(patched.contains("    alias(libs.plugins.jetbrains.compose) apply false"));
        assert!(patched.contains("    alias(libs.plugins.android.application) apply false"));
        assert_eq!(patched.matches("jetbrains.compose.compiler").count(), 1);
        assert_eq!(ensure_root_plugins(&patched, &android()), None);
    }

    #[test]
    fn root_plugins_block_created_when_missing() {
        let patched = ensure_root_plugins("allprojects {}\n", &TargetSet::single(Platform::Jvm))
            .unwrap();
        assert!(patched.starts_with("plugins {\n    alias(libs.plugins.jetbrains.kotlin.multiplatform) apply false"));
        assert!(patched.ends_with("}\n\nallprojects {}\n"));
        assert!(!patched.contains("android.application"));
    }

    #[test]
    fn android_properties_appended() {
        let patched = ensure_android_properties("kotlin.code.style=official").unwrap();
        assert_eq!(
            patched,
            "kotlin.code.style=official\n\n#Android\nandroid.useAndroidX=true\nandroid.nonTransitiveRClass=true\n"
        );
        assert_eq!(ensure_android_properties(&patched), None);
    }

    #[test]
    fn catalog_keys_are_matched_exactly() {
        let catalog = "[versions]\ncompose-hotreload = \"1.0.0\"\n\n[plugins]\n";
        let patched = ensure_catalog_entries(catalog, &android()).unwrap();
        assert!(patched.contains("\ncompose = \"1.9.0\""));
        assert!(patched.contains("\nagp = \"8.11.2\""));
        assert!(patched.contains("[libraries]\nandroidx-activitycompose"));
        assert_eq!(patched.matches("\ncompose-hotreload = ").count(), 1);
        assert_eq!(ensure_catalog_entries(&patched, &android()), None);
    }

    #[test]
    fn settings_include_is_added_once() {
        let settings = "rootProject.name = \"demo\"\ninclude(\":app\")\n";
        let patched = include_module(settings, "shared").unwrap();
        assert!(patched.ends_with("include(\":app\")\n\ninclude(\":shared\")\n"));
        assert_eq!(include_module(&patched, "shared"), None);
        assert_eq!(include_module(settings, "app"), None);
    }

    #[test]
    fn only_android_touches_siblings() {
        assert!(needs_sibling_patches(Platform::Android));
        assert!(!needs_sibling_patches(Platform::Web));
    }
}
