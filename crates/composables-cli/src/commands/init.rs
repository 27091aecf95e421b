//! `composables init`: create a project, or add a module to an existing
//! Gradle project.
//!
//! Flow:
//! 1. Resolve the directory and classify what is already there
//! 2. Collect app name, namespace, module and targets from flags, config
//!    defaults or prompts
//! 3. Print the summary, then plan (`--dry-run`) or scaffold
//! 4. Print warnings and next steps

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use composables_core::{
    application::{ApplicationError, DestinationState, IdeSync, ScaffoldReport},
    domain::{DomainError, DomainValidator, ProjectIdentity, ProjectStructure, TargetSet},
    error::ComposablesError,
};

use crate::{
    cli::{GlobalArgs, InitArgs},
    commands::{Adapters, current_dir, gradle_command},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
    prompt::{self, Prompter},
};

/// Execute `composables init`.
#[instrument(skip_all, fields(directory = args.directory.as_deref().unwrap_or_default()))]
pub fn execute(
    args: InitArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let Some(directory) = args.directory.as_deref() else {
        output.info("Usage: composables init <project-directory>")?;
        output.print("  Use '.' to create the project in the current directory.")?;
        return Ok(());
    };

    let root = resolve_directory(&current_dir()?, directory);
    let service = Adapters::new(&config, &output).scaffold_service(&config);
    let prompter = prompt::prompter(args.yes);

    let mode = match service.inspect_destination(&root)? {
        DestinationState::Missing | DestinationState::Empty => Mode::NewProject,
        DestinationState::GradleProject => {
            output.info(&format!(
                "{} already contains a Gradle project",
                root.display()
            ))?;
            if !prompter.confirm("Add a new Compose module to it?", true)? {
                return Err(CliError::Cancelled);
            }
            Mode::AddModule
        }
        DestinationState::Occupied => {
            return Err(CliError::Core(
                ApplicationError::DirectoryNotEmpty { path: root }.into(),
            ));
        }
    };
    debug!(?mode, root = %root.display(), "Destination resolved");

    let (identity, targets) = collect_answers(&args, &config, prompter.as_ref(), &root, mode)?;

    if !global.quiet {
        show_configuration(&identity, &targets, &root, &output)?;
    }

    if args.dry_run {
        let structure = match mode {
            Mode::NewProject => service.plan(&root, &identity, &targets)?,
            Mode::AddModule => service.plan_module(&root, &identity, &targets)?,
        };
        return show_plan(&structure, &output);
    }

    output.header("Creating files...")?;
    let report = match mode {
        Mode::NewProject => service.materialize(&root, &identity, &targets)?,
        Mode::AddModule => service.add_module(&root, &identity, &targets)?,
    };
    info!(files = report.files_written, "Scaffold completed");

    show_report(&report, &identity, mode, &output)?;
    if mode == Mode::NewProject && !global.quiet {
        show_next_steps(directory, &output)?;
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    NewProject,
    AddModule,
}

/// `.` is the current directory; anything else is joined onto it.
fn resolve_directory(cwd: &Path, directory: &str) -> PathBuf {
    if directory == "." {
        cwd.to_path_buf()
    } else {
        cwd.join(directory)
    }
}

// ── Answers ───────────────────────────────────────────────────────────────────

fn collect_answers(
    args: &InitArgs,
    config: &AppConfig,
    prompter: &dyn Prompter,
    root: &Path,
    mode: Mode,
) -> CliResult<(ProjectIdentity, TargetSet)> {
    let defaults = &config.defaults;

    let app_name = answer(
        args.app_name.as_deref(),
        defaults.app_name.as_deref().unwrap_or(ProjectIdentity::DEFAULT_APP_NAME),
        "App name",
        prompter,
        &|v: &str| -> Result<(), ComposablesError> {
            Ok(DomainValidator::validate_app_name(v)?)
        },
    )?;

    let namespace = answer(
        args.namespace.as_deref(),
        defaults.namespace.as_deref().unwrap_or(ProjectIdentity::DEFAULT_NAMESPACE),
        "Package name",
        prompter,
        &|v: &str| -> Result<(), ComposablesError> {
            Ok(DomainValidator::validate_namespace(v)?)
        },
    )?;

    let check_module = |name: &str| -> Result<(), ComposablesError> {
        DomainValidator::validate_module_name(name)?;
        match mode {
            Mode::NewProject => {
                if let Some(dir) = root.file_name().and_then(|n| n.to_str()) {
                    DomainValidator::validate_module_directory(name, dir)?;
                }
            }
            Mode::AddModule => {
                if root.join(name).exists() {
                    return Err(ApplicationError::ModuleExists {
                        module: name.to_string(),
                    }
                    .into());
                }
            }
        }
        Ok(())
    };
    let module = answer(
        args.module.as_deref(),
        defaults
            .module_name
            .as_deref()
            .unwrap_or(ProjectIdentity::DEFAULT_MODULE_NAME),
        "Compose module name",
        prompter,
        &check_module,
    )?;

    let targets = match args.targets.as_deref() {
        Some(list) => list.parse::<TargetSet>().map_err(invalid)?,
        None => {
            let defaults = default_targets(config)?;
            prompter.targets("Target platforms", &defaults)?
        }
    };

    let identity = ProjectIdentity::new(namespace, app_name, module).map_err(invalid)?;
    Ok((identity, targets))
}

/// A flag value is validated as-is; otherwise the user is asked, with
/// `default` pre-filled.
fn answer(
    flag: Option<&str>,
    default: &str,
    prompt: &str,
    prompter: &dyn Prompter,
    validate: &dyn Fn(&str) -> Result<(), ComposablesError>,
) -> CliResult<String> {
    if let Some(value) = flag {
        validate(value)?;
        return Ok(value.to_string());
    }
    let value = prompter.input(prompt, default, &|v| validate(v).map_err(|e| e.to_string()))?;
    validate(&value)?;
    Ok(value)
}

fn default_targets(config: &AppConfig) -> CliResult<TargetSet> {
    match config.defaults.targets.as_deref() {
        Some(list) => list.parse().map_err(|e: DomainError| CliError::ConfigError {
            message: format!("defaults.targets: {e}"),
            source: Some(Box::new(e)),
        }),
        None => Ok(TargetSet::all()),
    }
}

fn invalid(err: DomainError) -> CliError {
    CliError::Core(err.into())
}

// ── UI helpers ────────────────────────────────────────────────────────────────

fn show_configuration(
    identity: &ProjectIdentity,
    targets: &TargetSet,
    root: &Path,
    out: &OutputManager,
) -> CliResult<()> {
    let labels: Vec<&str> = targets.iter().map(|p| p.label()).collect();

    out.print("")?;
    out.header("Configuration")?;
    out.field("App Name", identity.app_name())?;
    out.field("Package", identity.namespace())?;
    out.field("Compose Module", identity.module_name())?;
    out.field("Targets", &labels.join(", "))?;
    out.field("Location", &root.display().to_string())?;
    out.print("")?;
    Ok(())
}

fn show_plan(structure: &ProjectStructure, out: &OutputManager) -> CliResult<()> {
    out.info(&format!(
        "Dry run: would write {} files under {}",
        structure.file_count(),
        structure.root().display()
    ))?;
    for file in structure.files() {
        out.print(&format!("  {}", file.path))?;
    }
    Ok(())
}

fn show_report(
    report: &ScaffoldReport,
    identity: &ProjectIdentity,
    mode: Mode,
    out: &OutputManager,
) -> CliResult<()> {
    for path in &report.patched {
        out.info(&format!("Updated {}", path.display()))?;
    }
    for warning in &report.warnings {
        out.warning(warning)?;
    }
    if let IdeSync::Failed { command, reason } = &report.ide_sync {
        out.warning(&format!("Could not prepare the iOS project for the IDE: {reason}"))?;
        out.warning(&format!("Run '{command}' in the project directory before opening Xcode"))?;
    }

    match mode {
        Mode::NewProject => out.success(&format!(
            "Project '{}' created ({} files)",
            identity.app_name(),
            report.files_written
        ))?,
        Mode::AddModule => out.success(&format!(
            "Module '{}' added ({} files)",
            identity.module_name(),
            report.files_written
        ))?,
    }
    Ok(())
}

fn show_next_steps(directory: &str, out: &OutputManager) -> CliResult<()> {
    out.print("")?;
    out.print("Next steps:")?;
    if directory != "." {
        out.print(&format!("  cd {directory}"))?;
    }
    out.print(&format!("  {}", gradle_command("run")))?;
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::{DefaultsPrompter, Validator};
    use composables_core::domain::Platform;

    fn args() -> InitArgs {
        InitArgs {
            directory: Some("demo".into()),
            ..Default::default()
        }
    }

    #[test]
    fn dot_is_the_current_directory() {
        let cwd = Path::new("/work");
        assert_eq!(resolve_directory(cwd, "."), PathBuf::from("/work"));
        assert_eq!(resolve_directory(cwd, "app"), PathBuf::from("/work/app"));
        assert_eq!(resolve_directory(cwd, "../app"), PathBuf::from("/work/../app"));
    }

    #[test]
    fn defaults_fill_missing_answers() {
        let (identity, targets) = collect_answers(
            &args(),
            &AppConfig::default(),
            &DefaultsPrompter,
            Path::new("/work/demo"),
            Mode::NewProject,
        )
        .unwrap();
        assert_eq!(identity, ProjectIdentity::default());
        assert_eq!(targets, TargetSet::all());
    }

    #[test]
    fn config_defaults_beat_built_ins() {
        let mut config = AppConfig::default();
        config.defaults.namespace = Some("io.acme.app".into());
        config.defaults.targets = Some("web".into());

        let (identity, targets) = collect_answers(
            &args(),
            &config,
            &DefaultsPrompter,
            Path::new("/work/demo"),
            Mode::NewProject,
        )
        .unwrap();
        assert_eq!(identity.namespace(), "io.acme.app");
        assert_eq!(targets, TargetSet::single(Platform::Web));
    }

    #[test]
    fn flags_are_validated() {
        let bad = InitArgs {
            namespace: Some("example".into()),
            ..args()
        };
        let err = collect_answers(
            &bad,
            &AppConfig::default(),
            &DefaultsPrompter,
            Path::new("/work/demo"),
            Mode::NewProject,
        )
        .unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn module_may_not_match_project_directory() {
        let clash = InitArgs {
            module: Some("shared".into()),
            ..args()
        };
        let new_project = collect_answers(
            &clash,
            &AppConfig::default(),
            &DefaultsPrompter,
            Path::new("/work/shared"),
            Mode::NewProject,
        );
        assert!(new_project.is_err());

        let add_module = collect_answers(
            &clash,
            &AppConfig::default(),
            &DefaultsPrompter,
            Path::new("/work/shared"),
            Mode::AddModule,
        );
        assert!(add_module.is_ok());
    }

    /// Answers each question with the first candidate its validator accepts.
    struct FirstValid(Vec<&'static str>);

    impl Prompter for FirstValid {
        fn input(&self, _prompt: &str, default: &str, validate: Validator<'_>) -> CliResult<String> {
            Ok(self
                .0
                .iter()
                .copied()
                .chain(std::iter::once(default))
                .find(|candidate| validate(*candidate).is_ok())
                .unwrap_or(default)
                .to_string())
        }

        fn targets(&self, _prompt: &str, defaults: &TargetSet) -> CliResult<TargetSet> {
            Ok(defaults.clone())
        }

        fn confirm(&self, _prompt: &str, _default: bool) -> CliResult<bool> {
            Ok(true)
        }

        fn select(&self, _prompt: &str, _items: &[String]) -> CliResult<usize> {
            Ok(0)
        }
    }

    #[test]
    fn existing_module_is_asked_again_when_adding() {
        let temp = tempfile::TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("composeApp")).unwrap();

        let (identity, _) = collect_answers(
            &args(),
            &AppConfig::default(),
            &FirstValid(vec!["composeApp", "second"]),
            temp.path(),
            Mode::AddModule,
        )
        .unwrap();
        assert_eq!(identity.module_name(), "second");
    }

    #[test]
    fn existing_module_flag_is_rejected_when_adding() {
        let temp = tempfile::TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("composeApp")).unwrap();
        let taken = InitArgs {
            module: Some("composeApp".into()),
            ..args()
        };

        let err = collect_answers(
            &taken,
            &AppConfig::default(),
            &DefaultsPrompter,
            temp.path(),
            Mode::AddModule,
        )
        .unwrap_err();
        assert!(err.to_string().contains("composeApp"));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn bad_configured_targets_are_a_config_error() {
        let mut config = AppConfig::default();
        config.defaults.targets = Some("linux".into());
        assert_eq!(default_targets(&config).unwrap_err().exit_code(), 4);
    }
}
