//! Placeholder token table and substitution.
//!
//! Template text files carry `{{token}}` markers. [`TokenTable::assemble`]
//! resolves every known token for one project, and [`substitute`] replaces
//! them in a single left-to-right pass.

use std::collections::BTreeMap;

use crate::domain::{
    entities::ProjectIdentity,
    fragments::{self, CatalogSection},
    value_objects::{Platform, TargetSet},
};

/// File extensions never run through substitution.
const BINARY_EXTENSIONS: &[&str] = &[
    "jar", "png", "jpg", "jpeg", "gif", "webp", "ico", "icns", "class", "keystore", "jks", "so",
    "dylib",
];

/// Resolved value for every placeholder of one project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenTable {
    values: BTreeMap<&'static str, String>,
}

impl TokenTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, token: &'static str, value: impl Into<String>) {
        self.values.insert(token, value.into());
    }

    pub fn get(&self, token: &str) -> Option<&str> {
        self.values.get(token).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Build the full table for `identity` targeting `targets`.
    pub fn assemble(targets: &TargetSet, identity: &ProjectIdentity) -> Self {
        let android = targets.contains(Platform::Android);
        let mut table = Self::new();

        table.insert("app_name", identity.app_name());
        table.insert("namespace", identity.namespace());
        table.insert("module_name", identity.module_name());
        table.insert("ios_binary_name", identity.ios_binary_name());
        table.insert("target_name", identity.target_name());

        table.insert("android_versions", android_versions(android));
        table.insert("android_libraries", android_section(android, CatalogSection::Libraries));
        table.insert("android_plugins", android_plugins(android));
        table.insert(
            "android_plugin",
            if android {
                format!("{}\n", fragments::root_plugin_line("android.application"))
            } else {
                String::new()
            },
        );
        table.insert(
            "android_properties",
            if android {
                fragments::ANDROID_PROPERTIES
            } else {
                ""
            },
        );

        table.insert("imports", imports(targets));
        table.insert("plugins", plugins(targets));
        table.insert("kotlin_targets", kotlin_targets(targets, identity));
        table.insert("sourcesets", source_sets(targets));
        table.insert("configuration_blocks", configuration_blocks(targets, identity));

        table
    }
}

fn android_versions(android: bool) -> String {
    if !android {
        return String::new();
    }
    format!(
        "# Android\n{}",
        android_section(true, CatalogSection::Versions)
    )
}

/// Android lines of one catalog section, followed by a blank line.
fn android_section(android: bool, section: CatalogSection) -> String {
    if !android {
        return String::new();
    }
    let lines: Vec<_> = fragments::catalog_entries(Platform::Android)
        .iter()
        .filter(|e| e.section == section)
        .map(|e| e.line)
        .collect();
    format!("{}\n\n", lines.join("\n"))
}

fn android_plugins(android: bool) -> String {
    if !android {
        return String::new();
    }
    fragments::catalog_entries(Platform::Android)
        .iter()
        .filter(|e| e.section == CatalogSection::Plugins)
        .map(|e| e.line)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Imports in jvm, web, android order.
fn imports(targets: &TargetSet) -> String {
    let lines: Vec<&str> = [Platform::Jvm, Platform::Web, Platform::Android]
        .into_iter()
        .filter(|p| targets.contains(*p))
        .flat_map(|p| fragments::imports(p).iter().copied())
        .collect();
    if lines.is_empty() {
        String::new()
    } else {
        format!("{}\n", lines.join("\n"))
    }
}

fn plugins(targets: &TargetSet) -> String {
    let lines: Vec<String> = fragments::BASE_PLUGIN_ALIASES
        .into_iter()
        .chain(targets.iter().filter_map(fragments::plugin_alias))
        .map(fragments::module_plugin_line)
        .collect();
    format!("plugins {{\n{}\n}}", lines.join("\n"))
}

fn kotlin_targets(targets: &TargetSet, identity: &ProjectIdentity) -> String {
    let blocks: Vec<String> = targets
        .iter()
        .flat_map(|p| fragments::kotlin_targets(p, identity))
        .collect();
    if blocks.is_empty() {
        String::new()
    } else {
        format!("{}\n", blocks.join("\n\n"))
    }
}

fn source_sets(targets: &TargetSet) -> String {
    let mut lines = vec!["    sourceSets {", fragments::COMMON_DEPENDENCIES];
    lines.extend(targets.iter().map(fragments::dependencies));
    lines.push("    }");
    lines.join("\n")
}

fn configuration_blocks(targets: &TargetSet, identity: &ProjectIdentity) -> String {
    targets
        .iter()
        .filter_map(|p| fragments::configuration_block(p, identity))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Replace every `{{token}}` whose name is in `table`.
///
/// Unknown markers are left untouched and replacement values are never
/// rescanned, so a value containing `{{` cannot trigger further expansion.
pub fn substitute(text: &str, table: &TokenTable) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after_open = &rest[start + 2..];

        match after_open.find("}}") {
            Some(end) => {
                let name = &after_open[..end];
                match table.get(name) {
                    Some(value) => out.push_str(value),
                    None => {
                        out.push_str("{{");
                        out.push_str(name);
                        out.push_str("}}");
                    }
                }
                rest = &after_open[end + 2..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }

    out.push_str(rest);
    out
}

/// `false` for files that must be copied byte-for-byte.
pub fn is_substitutable(file_name: &str) -> bool {
    match file_name.rsplit_once('.') {
        Some((_, ext)) => !BINARY_EXTENSIONS
            .iter()
            .any(|bin| bin.eq_ignore_ascii_case(ext)),
        None => true,
    }
}

/// `true` when `text` still contains a `{{name}}` marker.
pub fn has_markers(text: &str) -> bool {
    text.find("{{")
        .map(|start| text[start + 2..].contains("}}"))
        .unwrap_or(false)
}
