// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("invalid {field} '{value}': {reason}")]
    InvalidIdentifier {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("unknown target '{0}'")]
    UnknownPlatform(String),

    #[error("at least one target platform is required")]
    EmptyTargetSet,

    #[error("module name '{module}' cannot be the same as the project directory name")]
    ModuleMatchesDirectory { module: String },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    // ========================================================================
    // Template tree violations
    // ========================================================================
    #[error("unknown source set '{set}' in bundled template path '{path}'")]
    UnknownSourceSet { set: String, path: String },

    #[error("Duplicate path in project structure: {path}")]
    DuplicatePath { path: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidIdentifier { field, .. } => match *field {
                "package name" => vec![
                    "Use at least two dot-separated parts, e.g. com.example.app".into(),
                    "Each part must start with a letter and contain only letters, digits or '_'"
                        .into(),
                ],
                "module name" => vec![
                    "Use only letters, digits, hyphens or underscores".into(),
                    "Example: composeApp, shared-ui".into(),
                ],
                _ => vec!["The app name must contain at least one letter or digit".into()],
            },
            Self::UnknownPlatform(name) => vec![
                format!("'{name}' is not a supported target"),
                "Available targets: android, jvm, ios, web".into(),
            ],
            Self::EmptyTargetSet => vec!["Select at least one of: android, jvm, ios, web".into()],
            Self::ModuleMatchesDirectory { .. } => {
                vec!["Choose a module name that differs from the project directory".into()]
            }
            Self::UnknownSourceSet { .. } => vec![
                "The bundled templates contain an unexpected source set".into(),
                "Reinstall composables or check COMPOSABLES_TEMPLATES_DIR".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidIdentifier { .. }
            | Self::UnknownPlatform(_)
            | Self::EmptyTargetSet
            | Self::ModuleMatchesDirectory { .. } => ErrorCategory::Validation,
            Self::AbsolutePathNotAllowed { .. }
            | Self::UnknownSourceSet { .. }
            | Self::DuplicatePath { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Internal,
}
