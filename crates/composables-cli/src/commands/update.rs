//! `composables update`: run the configured self-update script.

use std::process::Command;

use tracing::{debug, instrument};

use crate::{
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip_all)]
pub fn execute(config: AppConfig, output: OutputManager) -> CliResult<()> {
    let command = config.update.command;
    output.info("Updating composables...")?;
    debug!(%command, "Running update script");

    let status = Command::new("bash")
        .arg("-c")
        .arg(&command)
        .status()
        .map_err(|e| CliError::ExternalCommandFailed {
            command: format!("bash -c \"{command}\""),
            source: Some(Box::new(e)),
        })?;

    if !status.success() {
        return Err(CliError::UpdateFailed {
            command,
            code: status.code().unwrap_or(1),
        });
    }

    output.success("composables is up to date")?;
    Ok(())
}
