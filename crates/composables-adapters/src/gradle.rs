//! Gradle wrapper runner.

use std::path::Path;
use std::process::{Command, Stdio};

use tracing::{debug, instrument};

use composables_core::{
    application::{ApplicationError, ports::BuildTool},
    error::ComposablesResult,
};

/// Runs the project's own wrapper script: `gradlew` on Unix, `gradlew.bat`
/// on Windows.
#[derive(Debug, Clone)]
pub struct GradleWrapper {
    script: &'static str,
}

impl GradleWrapper {
    pub fn new() -> Self {
        Self {
            script: if cfg!(windows) { "gradlew.bat" } else { "gradlew" },
        }
    }

    /// How the user would type the wrapper from the project root.
    pub fn invocation(&self) -> String {
        if cfg!(windows) {
            self.script.to_string()
        } else {
            format!("./{}", self.script)
        }
    }
}

impl Default for GradleWrapper {
    fn default() -> Self {
        Self::new()
    }
}

impl BuildTool for GradleWrapper {
    #[instrument(skip(self), fields(root = %project_root.display()))]
    fn run(&self, project_root: &Path, args: &[String]) -> ComposablesResult<bool> {
        let script = project_root.join(self.script);
        let output = Command::new(&script)
            .args(args)
            .current_dir(project_root)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| ApplicationError::BuildToolFailed {
                command: self.command_line(args),
                reason: e.to_string(),
            })?;

        debug!(
            status = %output.status,
            stdout = %String::from_utf8_lossy(&output.stdout),
            stderr = %String::from_utf8_lossy(&output.stderr),
            "Gradle finished"
        );
        Ok(output.status.success())
    }

    fn command_line(&self, args: &[String]) -> String {
        let mut line = self.invocation();
        for arg in args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_wrapper_is_a_spawn_failure() {
        let dir = TempDir::new().unwrap();
        let err = GradleWrapper::new()
            .run(dir.path(), &["tasks".to_string()])
            .unwrap_err();
        assert!(err.to_string().contains("tasks"));
    }

    #[cfg(unix)]
    #[test]
    fn command_line_uses_relative_wrapper() {
        let line = GradleWrapper::new().command_line(&["a".into(), "--quiet".into()]);
        assert_eq!(line, "./gradlew a --quiet");
    }
}
