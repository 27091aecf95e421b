use super::DomainError;
use std::fmt;
use std::path::PathBuf;

/// A `/`-separated path inside the bundled template tree or a generated
/// project.
///
/// Invariant: never absolute, never empty, no `.` segments. Enforced at
/// construction. Backslashes are normalised so that paths listed from a
/// Windows directory compare equal to embedded ones.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TemplatePath(String);

impl TemplatePath {
    pub fn new(path: impl AsRef<str>) -> Result<Self, DomainError> {
        let raw = path.as_ref().replace('\\', "/");
        if raw.starts_with('/') || raw.chars().nth(1) == Some(':') {
            return Err(DomainError::AbsolutePathNotAllowed { path: raw });
        }

        let segments: Vec<&str> = raw
            .split('/')
            .filter(|s| !s.is_empty() && *s != ".")
            .collect();
        if segments.is_empty() {
            return Err(DomainError::AbsolutePathNotAllowed { path: raw });
        }
        Ok(Self(segments.join("/")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/')
    }

    /// Last segment.
    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    pub fn join(&self, other: &TemplatePath) -> Self {
        Self(format!("{}/{}", self.0, other.0))
    }

    /// The remainder after a leading `prefix` directory, if this path lives
    /// under it.
    pub fn strip_prefix(&self, prefix: &str) -> Option<Self> {
        let prefix = prefix.trim_matches('/');
        self.0
            .strip_prefix(prefix)
            .and_then(|rest| rest.strip_prefix('/'))
            .filter(|rest| !rest.is_empty())
            .map(|rest| Self(rest.to_string()))
    }

    /// Native path relative to whatever root it is joined onto.
    pub fn to_path_buf(&self) -> PathBuf {
        self.segments().collect()
    }
}

impl fmt::Display for TemplatePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Capability-based permissions model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Permissions {
    executable: bool,
}

impl Permissions {
    pub const fn regular() -> Self {
        Self { executable: false }
    }

    pub const fn executable() -> Self {
        Self { executable: true }
    }

    pub const fn executable_flag(&self) -> bool {
        self.executable
    }
}
