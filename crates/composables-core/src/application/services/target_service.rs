//! Target Service - adds a platform to an existing Compose module.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{BuildTool, Filesystem, TemplateSource},
        services::materializer::{ExistingFiles, IdeSync, Materializer, sync_ide},
    },
    domain::{
        DomainValidator, Platform, ProjectIdentity, ProjectStructure, SourceSet, TargetSet,
        TemplatePath, TokenTable,
        patch::{self, PatchOutcome, PatchStep, siblings},
        path_filter::{self, IOS_APP_ROOT, TEMPLATE_MODULE, TEMPLATE_ROOT, WEB_BUNDLER_DIR},
    },
    error::ComposablesResult,
};

/// File every Gradle module and project root carries.
pub const BUILD_FILE: &str = "build.gradle.kts";

/// Dependency references that mark a module as a Compose module.
pub const COMPOSE_MARKERS: [&str; 6] = [
    "compose.components.resources",
    "compose.components.uiToolingPreview",
    "compose.material3",
    "compose.desktop.currentOs",
    "compose.preview",
    "compose.runtime",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetOutcome {
    /// The build file already declares the platform; nothing was written.
    AlreadyConfigured,
    Added(TargetChanges),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetChanges {
    pub applied: Vec<PatchStep>,
    /// Steps skipped because their block was not found.
    pub skipped: Vec<PatchStep>,
    /// Source files created from the templates.
    pub seeded: Vec<PathBuf>,
    /// Sibling project files that were updated.
    pub patched: Vec<PathBuf>,
    pub ide_sync: IdeSync,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetReport {
    pub module: String,
    pub platform: Platform,
    pub outcome: TargetOutcome,
}

pub struct TargetService {
    templates: Arc<dyn TemplateSource>,
    filesystem: Arc<dyn Filesystem>,
    build_tool: Arc<dyn BuildTool>,
    ide_sync: bool,
}

impl TargetService {
    pub fn new(
        templates: Arc<dyn TemplateSource>,
        filesystem: Arc<dyn Filesystem>,
        build_tool: Arc<dyn BuildTool>,
    ) -> Self {
        Self {
            templates,
            filesystem,
            build_tool,
            ide_sync: true,
        }
    }

    pub fn with_ide_sync(mut self, enabled: bool) -> Self {
        self.ide_sync = enabled;
        self
    }

    /// Names of the Compose modules directly under `root`.
    ///
    /// # Errors
    ///
    /// `NotAComposeProject` without a root build file, `NoComposeModule`
    /// when no subdirectory build file references Compose.
    #[instrument(skip_all, fields(root = %root.display()))]
    pub fn detect_modules(&self, root: &Path) -> ComposablesResult<Vec<String>> {
        if !self.filesystem.exists(&root.join(BUILD_FILE)) {
            return Err(ApplicationError::NotAComposeProject {
                path: root.to_path_buf(),
            }
            .into());
        }

        let mut modules = Vec::new();
        for entry in self.filesystem.list_dir(root)? {
            if !self.filesystem.is_dir(&entry) {
                continue;
            }
            let build = entry.join(BUILD_FILE);
            if !self.filesystem.exists(&build) {
                continue;
            }
            let Ok(text) = self.filesystem.read_to_string(&build) else {
                continue;
            };
            if COMPOSE_MARKERS.iter().any(|m| text.contains(m)) {
                if let Some(name) = entry.file_name().and_then(|n| n.to_str()) {
                    modules.push(name.to_string());
                }
            }
        }

        if modules.is_empty() {
            return Err(ApplicationError::NoComposeModule {
                path: root.to_path_buf(),
            }
            .into());
        }
        debug!(?modules, "Detected Compose modules");
        Ok(modules)
    }

    /// Add `platform` to `module`.
    ///
    /// Already configured modules are left byte-for-byte untouched.
    #[instrument(skip_all, fields(root = %root.display(), module = %module, %platform))]
    pub fn add_target(
        &self,
        root: &Path,
        module: &str,
        platform: Platform,
    ) -> ComposablesResult<TargetReport> {
        let build_path = root.join(module).join(BUILD_FILE);
        let content = self.filesystem.read_to_string(&build_path)?;
        if platform.is_configured_in(&content) {
            info!("Target already configured");
            return Ok(TargetReport {
                module: module.to_string(),
                platform,
                outcome: TargetOutcome::AlreadyConfigured,
            });
        }
        let identity = self.discover_identity(root, module, &content)?;

        let report = match patch::add_target(&content, platform, &identity) {
            PatchOutcome::AlreadyPresent => {
                info!("Target already configured");
                TargetOutcome::AlreadyConfigured
            }
            PatchOutcome::Applied(patched) => {
                self.filesystem
                    .write_file(&build_path, patched.content.as_bytes())?;
                info!(applied = patched.applied.len(), "Build file updated");

                let seeded = self.seed_sources(root, &identity, platform)?;
                let sibling_files = self.patch_siblings(root, platform)?;
                let ide_sync = if self.ide_sync && platform == Platform::Ios {
                    sync_ide(self.build_tool.as_ref(), root)
                } else {
                    IdeSync::Skipped
                };

                TargetOutcome::Added(TargetChanges {
                    applied: patched.applied,
                    skipped: patched.skipped,
                    seeded,
                    patched: sibling_files,
                    ide_sync,
                })
            }
        };

        Ok(TargetReport {
            module: module.to_string(),
            platform,
            outcome: report,
        })
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    /// Identity of an existing module: namespace from its build file, app
    /// name from `rootProject.name`. Missing or invalid values fall back to
    /// the defaults.
    fn discover_identity(
        &self,
        root: &Path,
        module: &str,
        build: &str,
    ) -> ComposablesResult<ProjectIdentity> {
        let namespace = patch::extract_namespace(build)
            .unwrap_or_else(|| ProjectIdentity::DEFAULT_NAMESPACE.to_string());
        let app_name = self
            .filesystem
            .read_to_string(&root.join("settings.gradle.kts"))
            .ok()
            .and_then(|s| root_project_name(&s))
            .filter(|name| DomainValidator::validate_app_name(name).is_ok())
            .unwrap_or_else(|| ProjectIdentity::DEFAULT_APP_NAME.to_string());

        Ok(ProjectIdentity::new(namespace, app_name, module)?)
    }

    /// Copy the platform's source sets from the templates, never
    /// overwriting a file that already exists.
    fn seed_sources(
        &self,
        root: &Path,
        identity: &ProjectIdentity,
        platform: Platform,
    ) -> ComposablesResult<Vec<PathBuf>> {
        let template_root = TemplatePath::new(TEMPLATE_ROOT)?;
        let mut structure = ProjectStructure::new(root);

        for relative in self.templates.list(TEMPLATE_ROOT)? {
            if !is_seed_for(&relative, platform) {
                continue;
            }
            let destination = path_filter::destination(&relative, identity);
            let content = self.templates.read(&template_root.join(&relative))?;
            let permissions = path_filter::permissions_for(&destination);
            structure.add_file(destination, content, permissions);
        }

        let materializer = Materializer::new(self.filesystem.as_ref());
        let written = materializer.write(&structure, ExistingFiles::Keep)?;
        let table = TokenTable::assemble(&TargetSet::single(platform), identity);
        materializer.substitute(&written, &table)?;
        Ok(written)
    }

    fn patch_siblings(&self, root: &Path, platform: Platform) -> ComposablesResult<Vec<PathBuf>> {
        if !siblings::needs_sibling_patches(platform) {
            return Ok(Vec::new());
        }

        let targets = TargetSet::single(platform);
        let mut patched = Vec::new();
        let mut apply = |relative: &str,
                         edit: &dyn Fn(&str) -> Option<String>|
         -> ComposablesResult<()> {
            let path = root.join(relative);
            if !self.filesystem.exists(&path) {
                debug!(path = %path.display(), "Sibling file missing, skipping");
                return Ok(());
            }
            let text = self.filesystem.read_to_string(&path)?;
            if let Some(updated) = edit(&text) {
                self.filesystem.write_file(&path, updated.as_bytes())?;
                patched.push(path);
            }
            Ok(())
        };

        apply(BUILD_FILE, &|t: &str| siblings::ensure_root_plugins(t, &targets))?;
        apply("gradle/libs.versions.toml", &|t: &str| {
            siblings::ensure_catalog_entries(t, &targets)
        })?;
        if platform == Platform::Android {
            apply("gradle.properties", &siblings::ensure_android_properties)?;
        }
        Ok(patched)
    }
}

/// Template files that belong to `platform` alone.
fn is_seed_for(path: &TemplatePath, platform: Platform) -> bool {
    let segments: Vec<&str> = path.segments().collect();
    match segments.as_slice() {
        [TEMPLATE_MODULE, "src", set, _, ..] => {
            SourceSet::classify(set) == Some(SourceSet::Platform(platform))
        }
        [TEMPLATE_MODULE, WEB_BUNDLER_DIR, _, ..] => platform == Platform::Web,
        [IOS_APP_ROOT, _, ..] => platform == Platform::Ios,
        _ => false,
    }
}

fn root_project_name(settings: &str) -> Option<String> {
    settings.lines().find_map(|line| {
        let value = line.trim().strip_prefix("rootProject.name")?;
        let value = value.trim_start().strip_prefix('=')?.trim();
        let value = value.strip_prefix('"')?;
        let end = value.find('"')?;
        Some(value[..end].to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_are_platform_specific() {
        let p = |s: &str| TemplatePath::new(s).unwrap();
        assert!(is_seed_for(&p("composeApp/src/jvmMain/kotlin/main.kt"), Platform::Jvm));
        assert!(!is_seed_for(&p("composeApp/src/commonMain/kotlin/App.kt"), Platform::Jvm));
        assert!(is_seed_for(&p("composeApp/src/wasmJsMain/kotlin/a.kt"), Platform::Web));
        assert!(is_seed_for(&p("composeApp/webpack.config.d/watch.js"), Platform::Web));
        assert!(is_seed_for(&p("iosApp/iosApp/ContentView.swift"), Platform::Ios));
        assert!(!is_seed_for(&p("settings.gradle.kts"), Platform::Ios));
    }

    #[test]
    fn root_project_name_is_read_from_settings() {
        assert_eq!(
            root_project_name("rootProject.name = \"Notes\"\ninclude(\":app\")").as_deref(),
            Some("Notes")
        );
        assert_eq!(root_project_name("include(\":app\")"), None);
    }
}
