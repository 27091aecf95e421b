//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `composables-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use crate::domain::TemplatePath;
use crate::error::ComposablesResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `composables_adapters::filesystem::LocalFilesystem` (production)
/// - `composables_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> ComposablesResult<()>;

    /// Write bytes to a file, replacing any previous content.
    fn write_file(&self, path: &Path, content: &[u8]) -> ComposablesResult<()>;

    /// Read a whole file as UTF-8 text.
    fn read_to_string(&self, path: &Path) -> ComposablesResult<String>;

    /// Set file permissions.
    fn set_permissions(&self, path: &Path, executable: bool) -> ComposablesResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Check if path is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Direct children of a directory, sorted.
    fn list_dir(&self, path: &Path) -> ComposablesResult<Vec<PathBuf>>;
}

/// Port for the bundled project template tree.
///
/// Implemented by:
/// - `composables_adapters::templates::EmbeddedTemplates` (compiled into the binary)
/// - `composables_adapters::templates::DirectoryTemplates` (loose directory)
/// - `composables_adapters::templates::MemoryTemplates` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait TemplateSource: Send + Sync {
    /// Every file under `prefix`, relative to it and sorted.
    ///
    /// A missing prefix yields an empty list.
    fn list(&self, prefix: &str) -> ComposablesResult<Vec<TemplatePath>>;

    /// Raw bytes of one file, addressed from the template root.
    fn read(&self, path: &TemplatePath) -> ComposablesResult<Vec<u8>>;

    /// Human-readable origin, for logs.
    fn describe(&self) -> String;
}

/// Port for running the project's build tool.
///
/// Implemented by:
/// - `composables_adapters::gradle::GradleWrapper`
#[cfg_attr(test, mockall::automock)]
pub trait BuildTool: Send + Sync {
    /// Run the build tool in `project_root`.
    ///
    /// `Ok(false)` means it ran and exited non-zero; `Err` means it could
    /// not be started.
    fn run(&self, project_root: &Path, args: &[String]) -> ComposablesResult<bool>;

    /// Command line shown to the user for a manual retry.
    fn command_line(&self, args: &[String]) -> String;
}
