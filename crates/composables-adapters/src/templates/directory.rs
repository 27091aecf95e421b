//! Templates read from a loose directory on disk.

use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};
use walkdir::WalkDir;

use composables_core::{
    application::{ApplicationError, ports::TemplateSource},
    domain::TemplatePath,
    error::ComposablesResult,
};

/// Template tree rooted at a directory containing `project/`.
#[derive(Debug, Clone)]
pub struct DirectoryTemplates {
    root: PathBuf,
}

impl DirectoryTemplates {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl TemplateSource for DirectoryTemplates {
    #[instrument(skip(self), fields(root = %self.root.display()))]
    fn list(&self, prefix: &str) -> ComposablesResult<Vec<TemplatePath>> {
        let base = self.root.join(prefix);
        if !base.is_dir() {
            debug!("Template prefix missing, nothing to list");
            return Ok(Vec::new());
        }

        let mut paths = Vec::new();
        for entry in WalkDir::new(&base).sort_by_file_name() {
            let entry = entry.map_err(|e| ApplicationError::FilesystemError {
                path: base.clone(),
                reason: e.to_string(),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Ok(relative) = entry.path().strip_prefix(&base) else {
                continue;
            };
            let joined = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            paths.push(TemplatePath::new(joined)?);
        }

        paths.sort();
        debug!(count = paths.len(), "Listed templates");
        Ok(paths)
    }

    fn read(&self, path: &TemplatePath) -> ComposablesResult<Vec<u8>> {
        let full = self.root.join(path.to_path_buf());
        std::fs::read(&full).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ApplicationError::ResourceNotFound {
                path: path.to_string(),
            }
            .into(),
            _ => ApplicationError::filesystem(&full, e).into(),
        })
    }

    fn describe(&self) -> String {
        format!("directory {}", self.root.display())
    }
}
