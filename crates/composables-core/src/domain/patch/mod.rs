//! Text patching of existing Gradle files.
//!
//! Used by the `target` command and by the add-module flow. Everything here
//! works on strings; reading and writing is left to the services.

pub mod document;
pub mod siblings;
pub mod targets;

pub use document::{Block, ConfigDocument};
pub use siblings::{
    ensure_android_properties, ensure_catalog_entries, ensure_root_plugins, include_module,
    needs_sibling_patches,
};
pub use targets::{PatchOutcome, PatchReport, PatchStep, add_target, extract_namespace};
