//! Output management and formatting.

use std::io;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use console::Term;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;

use composables_core::{application::ports::BuildTool, error::ComposablesResult};

use crate::cli::GlobalArgs;
use crate::config::AppConfig;

/// Manages CLI output based on configuration.
#[derive(Clone)]
pub struct OutputManager {
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        Self {
            quiet: args.quiet,
            no_color: args.no_color || config.output.no_color,
            term: Term::stdout(),
        }
    }

    // ── Public write methods ───────────────────────────────────────────────

    /// Generic message; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// Success indicator: `✓ <msg>`.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2713} {msg}") // ✓
        } else {
            format!("{} {}", "\u{2713}".green().bold(), msg.green())
        };
        self.term.write_line(&line)
    }

    /// Error indicator: `✗ <msg>`.  *Not* suppressed in quiet mode; errors
    /// must always be visible.
    pub fn error(&self, msg: &str) -> io::Result<()> {
        let line = if self.no_color {
            format!("\u{2717} {msg}") // ✗
        } else {
            format!("{} {}", "\u{2717}".red().bold(), msg.red())
        };
        self.term.write_line(&line)
    }

    /// Warning indicator: `⚠ <msg>`.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{26a0} {msg}") // ⚠
        } else {
            format!("{} {}", "\u{26a0}".yellow().bold(), msg.yellow())
        };
        self.term.write_line(&line)
    }

    /// Informational indicator: `ℹ <msg>`.
    pub fn info(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2139} {msg}") // ℹ
        } else {
            format!("{} {}", "\u{2139}".blue().bold(), msg.blue())
        };
        self.term.write_line(&line)
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    /// `  Label:   value` row used by summaries.
    pub fn field(&self, label: &str, value: &str) -> io::Result<()> {
        let label = format!("{label}:");
        let line = if self.no_color {
            format!("  {label:<16}{value}")
        } else {
            format!("  {:<16}{}", label.dimmed(), value.bold())
        };
        self.print(&line)
    }

    /// A running spinner, or `None` in quiet mode or without a terminal.
    pub fn spinner(&self, msg: &str) -> Option<ProgressBar> {
        if self.quiet || !self.term.is_term() {
            return None;
        }
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.green} {msg}") {
            pb.set_style(style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// `true` if ANSI colours are enabled.
    pub fn supports_color(&self) -> bool {
        !self.no_color
    }
}

// ── Spinner decorator ─────────────────────────────────────────────────────────

/// [`BuildTool`] wrapper that shows a spinner while the build runs.
pub struct SpinnerBuildTool {
    inner: Arc<dyn BuildTool>,
    output: OutputManager,
}

impl SpinnerBuildTool {
    pub fn new(inner: Arc<dyn BuildTool>, output: OutputManager) -> Self {
        Self { inner, output }
    }
}

impl BuildTool for SpinnerBuildTool {
    fn run(&self, project_root: &Path, args: &[String]) -> ComposablesResult<bool> {
        let pb = self
            .output
            .spinner("Preparing iOS project for the IDE (this may take a while)...");
        let result = self.inner.run(project_root, args);
        if let Some(pb) = pb {
            pb.finish_and_clear();
        }
        result
    }

    fn command_line(&self, args: &[String]) -> String {
        self.inner.command_line(args)
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn make_manager(quiet: bool, no_color: bool) -> OutputManager {
        let args = GlobalArgs {
            verbose: 0,
            quiet,
            no_color,
            config: None,
        };
        OutputManager::new(&args, &AppConfig::default())
    }

    struct Recorder(Mutex<Vec<Vec<String>>>);

    impl BuildTool for Recorder {
        fn run(&self, _root: &Path, args: &[String]) -> ComposablesResult<bool> {
            self.0.lock().unwrap().push(args.to_vec());
            Ok(false)
        }

        fn command_line(&self, args: &[String]) -> String {
            format!("gradle {}", args.join(" "))
        }
    }

    #[test]
    fn quiet_suppresses_print() {
        let out = make_manager(true, true);
        assert!(out.print("hello").is_ok());
        assert!(out.spinner("working").is_none());
    }

    #[test]
    fn error_not_suppressed_in_quiet_mode() {
        let out = make_manager(true, true);
        assert!(out.error("something went wrong").is_ok());
    }

    #[test]
    fn no_color_from_flag_or_config() {
        assert!(make_manager(false, false).supports_color());
        assert!(!make_manager(false, true).supports_color());

        let mut config = AppConfig::default();
        config.output.no_color = true;
        let out = OutputManager::new(&GlobalArgs::default(), &config);
        assert!(!out.supports_color());
    }

    #[test]
    fn spinner_tool_delegates() {
        let inner = Arc::new(Recorder(Mutex::new(Vec::new())));
        let tool = SpinnerBuildTool::new(inner.clone(), make_manager(true, true));
        let args = vec!["tasks".to_string()];

        assert!(!tool.run(Path::new("."), &args).unwrap());
        assert_eq!(tool.command_line(&args), "gradle tasks");
        assert_eq!(inner.0.lock().unwrap().len(), 1);
    }
}
