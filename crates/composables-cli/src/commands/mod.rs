//! Command handlers.
//!
//! Each handler translates parsed arguments into core service calls and
//! renders the result.  No scaffolding logic lives here.

use std::path::PathBuf;
use std::sync::Arc;

use composables_adapters::{GradleWrapper, LocalFilesystem, templates};
use composables_core::application::{
    ScaffoldService, TargetService,
    ports::{BuildTool, Filesystem, TemplateSource},
};

use crate::{
    config::AppConfig,
    error::{CliResult, IntoCli},
    output::{OutputManager, SpinnerBuildTool},
};

pub mod completions;
pub mod init;
pub mod target;
pub mod update;

/// Adapters shared by the scaffolding commands.
struct Adapters {
    templates: Arc<dyn TemplateSource>,
    filesystem: Arc<dyn Filesystem>,
    build_tool: Arc<dyn BuildTool>,
}

impl Adapters {
    fn new(config: &AppConfig, output: &OutputManager) -> Self {
        Self {
            templates: templates::select(config.templates.dir.as_deref()),
            filesystem: Arc::new(LocalFilesystem::new()),
            build_tool: Arc::new(SpinnerBuildTool::new(
                Arc::new(GradleWrapper::new()),
                output.clone(),
            )),
        }
    }

    fn scaffold_service(self, config: &AppConfig) -> ScaffoldService {
        ScaffoldService::new(self.templates, self.filesystem, self.build_tool)
            .with_ide_sync(config.gradle.ide_sync)
    }

    fn target_service(self, config: &AppConfig) -> TargetService {
        TargetService::new(self.templates, self.filesystem, self.build_tool)
            .with_ide_sync(config.gradle.ide_sync)
    }
}

fn current_dir() -> CliResult<PathBuf> {
    std::env::current_dir().with_cli_context(|| "reading the current directory")
}

/// `./gradlew <task>` on Unix, `gradlew.bat <task>` on Windows.
fn gradle_command(task: &str) -> String {
    format!("{} {task}", GradleWrapper::new().invocation())
}
