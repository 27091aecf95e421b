//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while reading templates or touching a project.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// A required bundled resource is missing.
    #[error("Template resource not found: {path}")]
    ResourceNotFound { path: String },

    /// The template provider produced no files at all.
    #[error("No project templates found in {source_name}")]
    TemplatesUnavailable { source_name: String },

    #[error("{} doesn't appear to be a Compose Multiplatform project", path.display())]
    NotAComposeProject { path: PathBuf },

    #[error("No Compose Multiplatform module found in {}", path.display())]
    NoComposeModule { path: PathBuf },

    #[error("Module directory '{module}' already exists")]
    ModuleExists { module: String },

    #[error("Directory {} is not empty and does not contain a Gradle project", path.display())]
    DirectoryNotEmpty { path: PathBuf },

    /// The build tool could not be started at all.
    #[error("Failed to run {command}: {reason}")]
    BuildToolFailed { command: String, reason: String },

    /// In-memory adapter state was poisoned by a panicking thread.
    #[error("Internal lock poisoned")]
    LockPoisoned,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::ResourceNotFound { .. } | Self::TemplatesUnavailable { .. } => vec![
                "The project templates could not be loaded".into(),
                "Unset COMPOSABLES_TEMPLATES_DIR to use the bundled templates".into(),
            ],
            Self::NotAComposeProject { .. } => vec![
                "Run this command from the root of a Gradle project".into(),
                "Create a new project with: composables init <project-directory>".into(),
            ],
            Self::NoComposeModule { .. } => vec![
                "No module build.gradle.kts references Compose dependencies".into(),
            ],
            Self::ModuleExists { module } => vec![format!(
                "Choose a different module name than '{module}' with --module"
            )],
            Self::DirectoryNotEmpty { .. } => vec![
                "Choose an empty or new directory".into(),
                "Or run init inside an existing Gradle project to add a module".into(),
            ],
            Self::BuildToolFailed { .. } => vec![
                "Check that the Gradle wrapper (gradlew) exists and is executable".into(),
            ],
            Self::LockPoisoned => vec!["Try again".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FilesystemError { .. } | Self::LockPoisoned => ErrorCategory::Internal,
            Self::ResourceNotFound { .. } | Self::TemplatesUnavailable { .. } => {
                ErrorCategory::NotFound
            }
            Self::NotAComposeProject { .. }
            | Self::NoComposeModule { .. }
            | Self::ModuleExists { .. }
            | Self::DirectoryNotEmpty { .. } => ErrorCategory::Validation,
            Self::BuildToolFailed { .. } => ErrorCategory::Internal,
        }
    }

    pub fn filesystem(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        Self::FilesystemError {
            path: path.into(),
            reason: err.to_string(),
        }
    }
}
