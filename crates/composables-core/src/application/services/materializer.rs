//! Write planned files to disk and resolve their placeholders.
//!
//! Shared by project creation, module creation and target seeding.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::{
    application::ports::{BuildTool, Filesystem},
    domain::{ProjectStructure, TokenTable, tokens},
    error::ComposablesResult,
};

/// Gradle task that generates the iOS metadata the IDE indexes.
pub const IDE_SYNC_TASK: &str = "compileIosMainKotlinMetadata";

/// Result of the IDE metadata refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdeSync {
    /// Not needed, or turned off.
    Skipped,
    Ready,
    /// The build tool failed; the scaffold itself is still complete.
    Failed { command: String, reason: String },
}

/// What to do when a planned file already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExistingFiles {
    Overwrite,
    Keep,
}

pub(crate) struct Materializer<'a> {
    filesystem: &'a dyn Filesystem,
}

impl<'a> Materializer<'a> {
    pub(crate) fn new(filesystem: &'a dyn Filesystem) -> Self {
        Self { filesystem }
    }

    /// Pass one: copy bytes verbatim, restoring executable bits.
    ///
    /// Returns the paths that were written. Nothing is rolled back when a
    /// write fails halfway.
    pub(crate) fn write(
        &self,
        structure: &ProjectStructure,
        existing: ExistingFiles,
    ) -> ComposablesResult<Vec<PathBuf>> {
        let root = structure.root();
        self.filesystem.create_dir_all(root)?;

        let mut written = Vec::with_capacity(structure.file_count());
        for file in structure.files() {
            let path = root.join(file.path.to_path_buf());

            if existing == ExistingFiles::Keep && self.filesystem.exists(&path) {
                debug!(path = %path.display(), "Keeping existing file");
                continue;
            }

            if let Some(parent) = path.parent() {
                self.filesystem.create_dir_all(parent)?;
            }
            self.filesystem.write_file(&path, &file.content)?;

            if file.permissions.executable_flag() {
                self.filesystem.set_permissions(&path, true)?;
            }
            written.push(path);
        }

        info!(files = written.len(), root = %root.display(), "Files written");
        Ok(written)
    }

    /// Pass two: replace placeholders in every written text file.
    ///
    /// Files that are binary or not valid UTF-8 are left alone. A changed
    /// file is trimmed and saved with exactly one trailing newline.
    pub(crate) fn substitute(
        &self,
        paths: &[PathBuf],
        table: &TokenTable,
    ) -> ComposablesResult<usize> {
        let mut changed = 0;
        for path in paths {
            let name = file_name(path);
            if !tokens::is_substitutable(name) {
                continue;
            }

            let text = match self.filesystem.read_to_string(path) {
                Ok(text) => text,
                Err(e) => {
                    debug!(path = %path.display(), error = %e, "Skipping substitution");
                    continue;
                }
            };

            let replaced = tokens::substitute(&text, table);
            if replaced != text {
                let mut out = replaced.trim().to_string();
                out.push('\n');
                self.filesystem.write_file(path, out.as_bytes())?;
                changed += 1;
            }
        }
        debug!(changed, "Placeholders resolved");
        Ok(changed)
    }
}

/// Run the IDE metadata task, turning every failure into `IdeSync::Failed`.
pub(crate) fn sync_ide(build_tool: &dyn BuildTool, project_root: &Path) -> IdeSync {
    let args = vec![IDE_SYNC_TASK.to_string(), "--quiet".to_string()];
    let command = build_tool.command_line(&args);

    info!(%command, "Preparing iOS metadata for the IDE");
    match build_tool.run(project_root, &args) {
        Ok(true) => IdeSync::Ready,
        Ok(false) => {
            warn!(%command, "IDE metadata task failed");
            IdeSync::Failed {
                command,
                reason: "the build exited with a non-zero status".into(),
            }
        }
        Err(e) => {
            warn!(%command, error = %e, "IDE metadata task could not start");
            IdeSync::Failed {
                command,
                reason: e.to_string(),
            }
        }
    }
}

fn file_name(path: &Path) -> &str {
    path.file_name().and_then(|n| n.to_str()).unwrap_or_default()
}
