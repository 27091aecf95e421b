//! `composables target`: add a platform to a module of the project in the
//! current directory.

use tracing::{info, instrument};

use composables_core::{
    application::{IdeSync, TargetChanges, TargetOutcome},
    domain::Platform,
};

use crate::{
    cli::TargetArgs,
    commands::{Adapters, current_dir},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
    prompt,
};

/// Execute `composables target`.
#[instrument(skip_all, fields(platform = %args.platform))]
pub fn execute(args: TargetArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let platform = Platform::from(args.platform);
    let root = current_dir()?;
    let service = Adapters::new(&config, &output).target_service(&config);

    let modules = service.detect_modules(&root)?;
    let module = match modules.as_slice() {
        [only] => only.clone(),
        _ => {
            let prompter = prompt::prompter(args.yes);
            let index = prompter.select(
                &format!("Which module should get the {} target?", platform.label()),
                &modules,
            )?;
            modules.get(index).cloned().unwrap_or_else(|| modules[0].clone())
        }
    };

    let report = service.add_target(&root, &module, platform)?;
    match report.outcome {
        TargetOutcome::AlreadyConfigured => {
            output.info(&format!(
                "{} target is already configured in '{module}'",
                platform.label()
            ))?;
        }
        TargetOutcome::Added(changes) => {
            info!(applied = changes.applied.len(), "Target added");
            show_changes(platform, &module, &changes, &output)?;
        }
    }
    Ok(())
}

fn show_changes(
    platform: Platform,
    module: &str,
    changes: &TargetChanges,
    out: &OutputManager,
) -> CliResult<()> {
    for step in &changes.skipped {
        out.warning(&format!(
            "Could not find the {step} in {module}/build.gradle.kts; add the {} part by hand",
            platform.label()
        ))?;
    }
    for path in &changes.patched {
        out.info(&format!("Updated {}", path.display()))?;
    }
    if !changes.seeded.is_empty() {
        out.info(&format!("Created {} source files", changes.seeded.len()))?;
    }
    if let IdeSync::Failed { command, reason } = &changes.ide_sync {
        out.warning(&format!("Could not prepare the iOS project for the IDE: {reason}"))?;
        out.warning(&format!("Run '{command}' in the project directory before opening Xcode"))?;
    }
    out.success(&format!("{} target added to '{module}'", platform.label()))?;
    Ok(())
}
