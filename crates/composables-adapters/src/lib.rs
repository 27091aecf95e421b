//! Infrastructure adapters for Composables.
//!
//! This crate implements the ports defined in
//! `composables_core::application::ports`. It contains all filesystem,
//! embedded-resource and process I/O.

pub mod filesystem;
pub mod gradle;
pub mod templates;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use gradle::GradleWrapper;
pub use templates::{DirectoryTemplates, EmbeddedTemplates, MemoryTemplates};
