//! Template provider adapters.
//!
//! The bundled tree lives under `project/` and mirrors a generated project
//! that uses the placeholder identity `org.example.project` / `composeApp`.
//! It can come from a loose directory or from the copy compiled into the
//! binary; [`select`] picks one at startup.

mod directory;
mod embedded;
mod memory;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, warn};

use composables_core::{application::ports::TemplateSource, domain::path_filter::TEMPLATE_ROOT};

pub use directory::DirectoryTemplates;
pub use embedded::EmbeddedTemplates;
pub use memory::MemoryTemplates;

/// Environment variable naming a template directory.
pub const TEMPLATES_DIR_ENV: &str = "COMPOSABLES_TEMPLATES_DIR";

/// Pick the template provider.
///
/// Order: `configured` directory, then `COMPOSABLES_TEMPLATES_DIR`, then a
/// `templates/` directory next to the executable, then the embedded copy.
/// A directory only qualifies when it contains `project/`.
pub fn select(configured: Option<&Path>) -> Arc<dyn TemplateSource> {
    let env_dir = std::env::var_os(TEMPLATES_DIR_ENV).map(PathBuf::from);
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join("templates")));

    let explicit = configured.map(Path::to_path_buf).or(env_dir);
    if let Some(dir) = explicit {
        if has_project_root(&dir) {
            info!(dir = %dir.display(), "Using template directory");
            return Arc::new(DirectoryTemplates::new(dir));
        }
        warn!(dir = %dir.display(), "Template directory has no project/ folder, ignoring");
    }

    if let Some(dir) = exe_dir.filter(|d| has_project_root(d)) {
        info!(dir = %dir.display(), "Using templates next to the executable");
        return Arc::new(DirectoryTemplates::new(dir));
    }

    Arc::new(EmbeddedTemplates::new())
}

fn has_project_root(dir: &Path) -> bool {
    dir.join(TEMPLATE_ROOT).is_dir()
}
