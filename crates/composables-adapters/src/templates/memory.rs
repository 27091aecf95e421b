//! In-memory template tree for tests.

use std::collections::BTreeMap;

use composables_core::{
    application::{ApplicationError, ports::TemplateSource},
    domain::TemplatePath,
    error::ComposablesResult,
};

#[derive(Debug, Clone, Default)]
pub struct MemoryTemplates {
    files: BTreeMap<String, Vec<u8>>,
}

impl MemoryTemplates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file addressed from the template root, e.g. `project/gradlew`.
    pub fn with_file(mut self, path: &str, content: impl Into<Vec<u8>>) -> Self {
        self.files.insert(path.to_string(), content.into());
        self
    }
}

impl TemplateSource for MemoryTemplates {
    fn list(&self, prefix: &str) -> ComposablesResult<Vec<TemplatePath>> {
        let prefix = format!("{}/", prefix.trim_end_matches('/'));
        self.files
            .keys()
            .filter_map(|name| name.strip_prefix(&prefix))
            .map(|rest| TemplatePath::new(rest).map_err(Into::into))
            .collect()
    }

    fn read(&self, path: &TemplatePath) -> ComposablesResult<Vec<u8>> {
        self.files.get(path.as_str()).cloned().ok_or_else(|| {
            ApplicationError::ResourceNotFound {
                path: path.to_string(),
            }
            .into()
        })
    }

    fn describe(&self) -> String {
        format!("{} in-memory templates", self.files.len())
    }
}
