//! Scaffold Service - creates projects and modules from the template tree.
//!
//! The workflow is:
//! 1. List the bundled template files and filter them by target platform
//! 2. Rewrite their paths for the project identity
//! 3. Write them, then resolve placeholders in a second pass
//! 4. Optionally prepare iOS metadata for the IDE

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{BuildTool, Filesystem, TemplateSource},
        services::materializer::{ExistingFiles, IdeSync, Materializer, sync_ide},
    },
    domain::{
        DomainValidator as validator, Platform, ProjectIdentity, ProjectStructure, TargetSet,
        TemplatePath, TokenTable,
        patch::siblings,
        path_filter::{self, IOS_APP_ROOT, TEMPLATE_MODULE, TEMPLATE_ROOT},
    },
    error::ComposablesResult,
};

/// Build files whose presence marks a directory as a Gradle project.
pub const GRADLE_PROJECT_FILES: [&str; 4] = [
    "build.gradle.kts",
    "build.gradle",
    "settings.gradle.kts",
    "settings.gradle",
];

/// What lives at a destination before `init` touches it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestinationState {
    Missing,
    Empty,
    /// Non-empty and holds a Gradle build; a module can be added.
    GradleProject,
    /// Non-empty and not a Gradle project; nothing may be written.
    Occupied,
}

/// Outcome of a project or module scaffold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldReport {
    pub root: PathBuf,
    pub files_written: usize,
    pub files_substituted: usize,
    /// Sibling files that were updated (add-module flow only).
    pub patched: Vec<PathBuf>,
    /// Non-fatal problems worth telling the user about.
    pub warnings: Vec<String>,
    pub ide_sync: IdeSync,
}

/// Main scaffolding service.
pub struct ScaffoldService {
    templates: Arc<dyn TemplateSource>,
    filesystem: Arc<dyn Filesystem>,
    build_tool: Arc<dyn BuildTool>,
    ide_sync: bool,
}

impl ScaffoldService {
    /// Create a new scaffold service with the given adapters.
    ///
    /// IDE sync is on by default.
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

    /// Classify the destination directory.
    pub fn inspect_destination(&self, root: &Path) -> ComposablesResult<DestinationState> {
        if !self.filesystem.exists(root) {
            return Ok(DestinationState::Missing);
        }
        if !self.filesystem.is_dir(root) {
            return Ok(DestinationState::Occupied);
        }
        if self.filesystem.list_dir(root)?.is_empty() {
            return Ok(DestinationState::Empty);
        }

        let gradle = GRADLE_PROJECT_FILES
            .iter()
            .any(|name| self.filesystem.exists(&root.join(name)));
        Ok(if gradle {
            DestinationState::GradleProject
        } else {
            DestinationState::Occupied
        })
    }

    /// Compute every file a new project would contain, without writing.
    #[instrument(skip_all, fields(root = %root.display(), targets = %targets))]
    pub fn plan(
        &self,
        root: &Path,
        identity: &ProjectIdentity,
        targets: &TargetSet,
    ) -> ComposablesResult<ProjectStructure> {
        self.plan_filtered(root, identity, targets, |_| true)
    }

    /// Files a new module would add to the project at `root`: the module
    /// subtree, plus the Xcode project when iOS is selected.
    pub fn plan_module(
        &self,
        root: &Path,
        identity: &ProjectIdentity,
        targets: &TargetSet,
    ) -> ComposablesResult<ProjectStructure> {
        let ios = targets.contains(Platform::Ios);
        self.plan_filtered(root, identity, targets, |path| {
            match path.segments().next() {
                Some(TEMPLATE_MODULE) => true,
                Some(IOS_APP_ROOT) => ios,
                _ => false,
            }
        })
    }

    /// Create a complete project under `root`.
    #[instrument(skip_all, fields(root = %root.display(), module = identity.module_name()))]
    pub fn materialize(
        &self,
        root: &Path,
        identity: &ProjectIdentity,
        targets: &TargetSet,
    ) -> ComposablesResult<ScaffoldReport> {
        if let Some(dir_name) = root.file_name().and_then(|n| n.to_str()) {
            validator::validate_module_directory(identity.module_name(), dir_name)?;
        }

        match self.inspect_destination(root)? {
            DestinationState::Missing | DestinationState::Empty => {}
            _ => {
                return Err(ApplicationError::DirectoryNotEmpty {
                    path: root.to_path_buf(),
                }
                .into());
            }
        }

        info!(%targets, "Creating Compose Multiplatform project");
        let structure = self.plan(root, identity, targets)?;
        let mut report = self.write(&structure, identity, targets, ExistingFiles::Overwrite)?;
        report.ide_sync = self.maybe_sync(root, targets);

        info!(files = report.files_written, "Project created");
        Ok(report)
    }

    /// Add a new Compose module to an existing Gradle project.
    ///
    /// Only the module subtree (and `iosApp` for iOS) is copied; settings,
    /// version catalog and root build file are patched in place. Missing
    /// sibling files are reported as warnings.
    #[instrument(skip_all, fields(root = %root.display(), module = identity.module_name()))]
    pub fn add_module(
        &self,
        root: &Path,
        identity: &ProjectIdentity,
        targets: &TargetSet,
    ) -> ComposablesResult<ScaffoldReport> {
        let module_dir = root.join(identity.module_name());
        if self.filesystem.exists(&module_dir) {
            return Err(ApplicationError::ModuleExists {
                module: identity.module_name().to_string(),
            }
            .into());
        }

        info!(%targets, "Adding module to existing project");
        let structure = self.plan_module(root, identity, targets)?;
        let mut report = self.write(&structure, identity, targets, ExistingFiles::Keep)?;

        self.patch_sibling(root, "settings.gradle.kts", &mut report, |text| {
            siblings::include_module(text, identity.module_name())
        })?;
        self.patch_sibling(root, "gradle/libs.versions.toml", &mut report, |text| {
            siblings::ensure_catalog_entries(text, targets)
        })?;
        self.patch_sibling(root, "build.gradle.kts", &mut report, |text| {
            siblings::ensure_root_plugins(text, targets)
        })?;
        if targets.contains(Platform::Android) {
            self.patch_sibling(root, "gradle.properties", &mut report, |text| {
                siblings::ensure_android_properties(text)
            })?;
        }

        report.ide_sync = self.maybe_sync(root, targets);
        Ok(report)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn plan_filtered(
        &self,
        root: &Path,
        identity: &ProjectIdentity,
        targets: &TargetSet,
        keep: impl Fn(&TemplatePath) -> bool,
    ) -> ComposablesResult<ProjectStructure> {
        let listing = self.templates.list(TEMPLATE_ROOT)?;
        if listing.is_empty() {
            return Err(ApplicationError::TemplatesUnavailable {
                source_name: self.templates.describe(),
            }
            .into());
        }

        let template_root = TemplatePath::new(TEMPLATE_ROOT)?;
        let mut structure = ProjectStructure::new(root);

        for relative in listing {
            if !keep(&relative) || !path_filter::include(&relative, targets, TEMPLATE_MODULE)? {
                continue;
            }
            let destination = path_filter::destination(&relative, identity);
            let content = self.templates.read(&template_root.join(&relative))?;
            let permissions = path_filter::permissions_for(&destination);
            structure.add_file(destination, content, permissions);
        }

        validator::validate_project_structure(&structure)?;
        debug!(files = structure.file_count(), "Planned project structure");
        Ok(structure)
    }

    fn write(
        &self,
        structure: &ProjectStructure,
        identity: &ProjectIdentity,
        targets: &TargetSet,
        existing: ExistingFiles,
    ) -> ComposablesResult<ScaffoldReport> {
        let materializer = Materializer::new(self.filesystem.as_ref());
        let written = materializer.write(structure, existing)?;
        let table = TokenTable::assemble(targets, identity);
        let substituted = materializer.substitute(&written, &table)?;

        Ok(ScaffoldReport {
            root: structure.root().clone(),
            files_written: written.len(),
            files_substituted: substituted,
            patched: Vec::new(),
            warnings: Vec::new(),
            ide_sync: IdeSync::Skipped,
        })
    }

    fn patch_sibling(
        &self,
        root: &Path,
        relative: &str,
        report: &mut ScaffoldReport,
        patch: impl FnOnce(&str) -> Option<String>,
    ) -> ComposablesResult<()> {
        let path = root.join(relative);
        if !self.filesystem.exists(&path) {
            warn!(path = %path.display(), "Sibling file missing, skipping");
            report
                .warnings
                .push(format!("{relative} not found in {}", root.display()));
            return Ok(());
        }

        let text = self.filesystem.read_to_string(&path)?;
        if let Some(updated) = patch(&text) {
            self.filesystem.write_file(&path, updated.as_bytes())?;
            info!(path = %path.display(), "Updated");
            report.patched.push(path);
        }
        Ok(())
    }

    fn maybe_sync(&self, root: &Path, targets: &TargetSet) -> IdeSync {
        if self.ide_sync && targets.contains(Platform::Ios) {
            sync_ide(self.build_tool.as_ref(), root)
        } else {
            IdeSync::Skipped
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{MockBuildTool, MockFilesystem, MockTemplateSource};
    use crate::error::ComposablesError;

    fn templates(paths: &[&str]) -> MockTemplateSource {
        let listing: Vec<TemplatePath> = paths.iter().map(|p| TemplatePath::new(p).unwrap()).collect();
        let mut source = MockTemplateSource::new();
        source
            .expect_list()
            .returning(move |_| Ok(listing.clone()));
        source
            .expect_read()
            .returning(|p| Ok(format!("// {}", p.file_name()).into_bytes()));
        source.expect_describe().returning(|| "mock".into());
        source
    }

    fn service(source: MockTemplateSource, fs: MockFilesystem, tool: MockBuildTool) -> ScaffoldService {
        ScaffoldService::new(Arc::new(source), Arc::new(fs), Arc::new(tool))
    }

    #[test]
    fn plan_filters_and_rewrites_without_touching_disk() {
        let source = templates(&[
            "settings.gradle.kts",
            "composeApp/src/commonMain/kotlin/org/example/project/App.kt",
            "composeApp/src/androidMain/AndroidManifest.xml",
            "iosApp/iosApp/iOSApp.swift",
        ]);
        let svc = service(source, MockFilesystem::new(), MockBuildTool::new());

        let identity = ProjectIdentity::new("io.acme", "Acme", "app").unwrap();
        let plan = svc
            .plan(Path::new("/out"), &identity, &TargetSet::single(Platform::Jvm))
            .unwrap();

        let paths: Vec<_> = plan.files().map(|f| f.path.as_str().to_string()).collect();
        assert_eq!(
            paths,
            vec![
                "settings.gradle.kts",
                "app/src/commonMain/kotlin/io/acme/App.kt"
            ]
        );
    }

    #[test]
    fn empty_template_listing_is_an_error() {
        let svc = service(templates(&[]), MockFilesystem::new(), MockBuildTool::new());
        let err = svc
            .plan(Path::new("/out"), &ProjectIdentity::default(), &TargetSet::all())
            .unwrap_err();
        assert!(matches!(
            err,
            ComposablesError::Application(ApplicationError::TemplatesUnavailable { .. })
        ));
    }

    #[test]
    fn module_named_like_directory_is_rejected() {
        let svc = service(templates(&["a.txt"]), MockFilesystem::new(), MockBuildTool::new());
        let err = svc
            .materialize(
                Path::new("/work/composeApp"),
                &ProjectIdentity::default(),
                &TargetSet::all(),
            )
            .unwrap_err();
        assert!(matches!(err, ComposablesError::Domain(_)));
    }

    #[test]
    fn ide_sync_failure_is_reported_not_raised() {
        let mut tool = MockBuildTool::new();
        tool.expect_command_line()
            .returning(|args| format!("./gradlew {}", args.join(" ")));
        tool.expect_run().times(1).returning(|_, _| Ok(false));

        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file().returning(|_, _| Ok(()));
        fs.expect_read_to_string().returning(|_| Ok("plain".into()));

        let svc = service(templates(&["README.md"]), fs, tool);
        let report = svc
            .materialize(
                Path::new("/work/demo"),
                &ProjectIdentity::default(),
                &TargetSet::single(Platform::Ios),
            )
            .unwrap();

        assert_eq!(report.files_written, 1);
        assert_eq!(report.files_substituted, 0);
        assert!(matches!(
            report.ide_sync,
            IdeSync::Failed { ref command, .. } if command == "./gradlew compileIosMainKotlinMetadata --quiet"
        ));
    }

    #[test]
    fn ide_sync_is_skipped_when_disabled() {
        let mut tool = MockBuildTool::new();
        tool.expect_run().never();

        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file().returning(|_, _| Ok(()));
        fs.expect_read_to_string().returning(|_| Ok("plain".into()));

        let svc = service(templates(&["README.md"]), fs, tool).with_ide_sync(false);
        let report = svc
            .materialize(
                Path::new("/work/demo"),
                &ProjectIdentity::default(),
                &TargetSet::single(Platform::Ios),
            )
            .unwrap();
        assert_eq!(report.ide_sync, IdeSync::Skipped);
    }
}
