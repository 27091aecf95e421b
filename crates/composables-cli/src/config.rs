//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `COMPOSABLES_<SECTION>__<KEY>`, e.g.
//!    `COMPOSABLES_GRADLE__IDE_SYNC=false`
//! 3. Config file: `--config <FILE>`, else `config.toml` in the platform
//!    config directory (optional)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Script run by `composables update` unless configured otherwise.
pub const DEFAULT_UPDATE_COMMAND: &str =
    "curl -fsSL https://composables.com/get-composables.sh | bash";

const ENV_PREFIX: &str = "COMPOSABLES";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default answers for `init`.
    pub defaults: Defaults,
    /// Template settings.
    pub templates: TemplateConfig,
    pub gradle: GradleConfig,
    pub update: UpdateConfig,
    /// Output settings.
    pub output: OutputConfig,
}

/// Values offered as defaults by the `init` prompts.  Unset keys fall back
/// to the built-in project identity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub namespace: Option<String>,
    pub app_name: Option<String>,
    pub module_name: Option<String>,
    /// Comma-separated platform list, e.g. `android,ios`.
    pub targets: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Directory holding a `project/` template tree.
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradleConfig {
    /// Run the iOS metadata task after iOS scaffolds.
    pub ide_sync: bool,
}

impl Default for GradleConfig {
    fn default() -> Self {
        Self { ide_sync: true }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateConfig {
    /// Shell command passed to `bash -c`.
    pub command: String,
}

impl Default for UpdateConfig {
    fn default() -> Self {
        Self {
            command: DEFAULT_UPDATE_COMMAND.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl AppConfig {
    /// Load configuration: defaults, then the config file, then the
    /// environment.
    ///
    /// An explicit `config_file` must exist; the default location is
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.clone(), true),
            None => (Self::config_path(), false),
        };
        debug!(path = %path.display(), required, "Loading configuration");
        Self::from_sources(&path, required)
    }

    fn from_sources(path: &Path, required: bool) -> anyhow::Result<Self> {
        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(required))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("failed to read configuration from {}", path.display()))?;

        settings
            .try_deserialize()
            .context("invalid configuration value")
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.composables.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "composables", "composables")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".composables.toml"))
    }
}
