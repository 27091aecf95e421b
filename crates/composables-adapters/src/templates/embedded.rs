//! Templates compiled into the binary.

use rust_embed::RustEmbed;
use tracing::debug;

use composables_core::{
    application::{ApplicationError, ports::TemplateSource},
    domain::TemplatePath,
    error::ComposablesResult,
};

#[derive(RustEmbed)]
#[folder = "templates/"]
struct Bundle;

/// The template tree shipped inside the executable.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedTemplates;

impl EmbeddedTemplates {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateSource for EmbeddedTemplates {
    fn list(&self, prefix: &str) -> ComposablesResult<Vec<TemplatePath>> {
        let prefix = format!("{}/", prefix.trim_end_matches('/'));
        let mut paths = Bundle::iter()
            .filter_map(|name| name.strip_prefix(&prefix).map(str::to_owned))
            .map(TemplatePath::new)
            .collect::<Result<Vec<_>, _>>()?;
        paths.sort();
        debug!(count = paths.len(), "Listed embedded templates");
        Ok(paths)
    }

    fn read(&self, path: &TemplatePath) -> ComposablesResult<Vec<u8>> {
        Bundle::get(path.as_str())
            .map(|file| file.data.into_owned())
            .ok_or_else(|| {
                ApplicationError::ResourceNotFound {
                    path: path.to_string(),
                }
                .into()
            })
    }

    fn describe(&self) -> String {
        "embedded templates".into()
    }
}
