use std::collections::HashSet;
use std::path::PathBuf;

use crate::domain::{
    entities::common::{Permissions, TemplatePath},
    error::DomainError,
};

/// Planned output of a materialization, before anything touches disk.
///
/// Built by the scaffold service from the filtered template listing; the
/// same plan drives `--dry-run` output and the actual write.
#[derive(Debug, Clone)]
pub struct ProjectStructure {
    pub(crate) root: PathBuf,
    pub(crate) files: Vec<FileToWrite>,
}

impl ProjectStructure {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            files: Vec::new(),
        }
    }

    pub fn add_file(&mut self, path: TemplatePath, content: Vec<u8>, perms: Permissions) {
        self.files.push(FileToWrite {
            path,
            content,
            permissions: perms,
        });
    }

    pub fn with_file(mut self, path: TemplatePath, content: Vec<u8>, perms: Permissions) -> Self {
        self.add_file(path, content, perms);
        self
    }

    /// Reject duplicate destinations, which would mean two template files
    /// were rewritten onto the same output path.
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut seen = HashSet::new();
        for file in &self.files {
            if !seen.insert(file.path.as_str()) {
                return Err(DomainError::DuplicatePath {
                    path: file.path.to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    pub fn files(&self) -> impl Iterator<Item = &FileToWrite> {
        self.files.iter()
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct FileToWrite {
    pub path: TemplatePath,
    pub content: Vec<u8>,
    pub permissions: Permissions,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(p: &str) -> TemplatePath {
        TemplatePath::new(p).unwrap()
    }

    #[test]
    fn duplicate_destinations_are_rejected() {
        let structure = ProjectStructure::new("out")
            .with_file(path("a/b.txt"), b"1".to_vec(), Permissions::regular())
            .with_file(path("a/b.txt"), b"2".to_vec(), Permissions::regular());
        assert!(matches!(
            structure.validate(),
            Err(DomainError::DuplicatePath { .. })
        ));
    }

    #[test]
    fn distinct_destinations_validate() {
        let structure = ProjectStructure::new("out")
            .with_file(path("gradlew"), b"#!/bin/sh".to_vec(), Permissions::executable())
            .with_file(path("README.md"), Vec::new(), Permissions::regular());
        assert!(structure.validate().is_ok());
        assert_eq!(structure.file_count(), 2);
    }
}
