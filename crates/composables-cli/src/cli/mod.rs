//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use clap::{Args, Parser, Subcommand, ValueEnum};

use composables_core::domain::Platform;

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "composables",
    bin_name = "composables",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Create and extend Compose Multiplatform projects",
    long_about = "Composables generates Compose Multiplatform projects for Android, \
                  JVM desktop, iOS and the web, and adds platforms to existing ones.",
    after_help = "EXAMPLES:\n\
        \x20 composables init my-app\n\
        \x20 composables init my-app --targets android,ios --namespace com.acme.app --yes\n\
        \x20 composables target web\n\
        \x20 composables completions bash > /usr/share/bash-completion/completions/composables",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new Compose Multiplatform project.
    #[command(
        about = "Create a new project, or add a module to an existing Gradle project",
        after_help = "EXAMPLES:\n\
            \x20 composables init my-app\n\
            \x20 composables init .            # use the current directory\n\
            \x20 composables init my-app --targets jvm,web --app-name \"My App\" --yes\n\
            \x20 composables init my-app --dry-run --yes"
    )]
    Init(InitArgs),

    /// Add a platform target to the project in the current directory.
    #[command(
        about = "Add a platform target to an existing project",
        after_help = "EXAMPLES:\n\
            \x20 composables target android\n\
            \x20 composables target ios --yes   # first module when several exist"
    )]
    Target(TargetArgs),

    /// Update composables to the latest release.
    #[command(about = "Update composables to the latest version")]
    Update,

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 composables completions bash > ~/.local/share/bash-completion/completions/composables\n\
            \x20 composables completions zsh  > ~/.zfunc/_composables\n\
            \x20 composables completions fish > ~/.config/fish/completions/composables.fish"
    )]
    Completions(CompletionsArgs),
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `composables init`.
#[derive(Debug, Default, Args)]
pub struct InitArgs {
    /// Project directory.  `.` uses the current directory; anything else is
    /// resolved against it.
    #[arg(value_name = "DIRECTORY", help = "Project directory")]
    pub directory: Option<String>,

    /// Name of the Compose module.
    #[arg(long = "module", value_name = "NAME", help = "Compose module name")]
    pub module: Option<String>,

    /// Display name of the application.
    #[arg(long = "app-name", value_name = "NAME", help = "Application display name")]
    pub app_name: Option<String>,

    /// Package namespace, e.g. `com.example.app`.
    #[arg(
        long = "namespace",
        value_name = "NAMESPACE",
        help = "Package namespace (e.g. com.example.app)"
    )]
    pub namespace: Option<String>,

    /// Comma-separated platform list.
    #[arg(
        long = "targets",
        value_name = "LIST",
        help = "Target platforms: android,jvm,ios,web"
    )]
    pub targets: Option<String>,

    /// Skip every prompt and use flags, configured defaults, or built-ins.
    #[arg(short = 'y', long = "yes", help = "Accept defaults without prompting")]
    pub yes: bool,

    /// Preview what would be created without writing any files.
    #[arg(long = "dry-run", help = "Show what would be created without creating")]
    pub dry_run: bool,
}

// ── target ────────────────────────────────────────────────────────────────────

/// Arguments for `composables target`.
#[derive(Debug, Args)]
pub struct TargetArgs {
    /// Platform to add.
    #[arg(value_enum, value_name = "PLATFORM", help = "Platform to add")]
    pub platform: PlatformArg,

    /// Pick the first Compose module instead of asking.
    #[arg(short = 'y', long = "yes", help = "Do not prompt for the module")]
    pub yes: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `composables completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── value enums ───────────────────────────────────────────────────────────────

/// Platforms accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum PlatformArg {
    Android,
    /// Also accepted as `desktop`.
    #[value(alias = "desktop")]
    Jvm,
    Ios,
    Web,
}

impl From<PlatformArg> for Platform {
    fn from(arg: PlatformArg) -> Self {
        match arg {
            PlatformArg::Android => Platform::Android,
            PlatformArg::Jvm => Platform::Jvm,
            PlatformArg::Ios => Platform::Ios,
            PlatformArg::Web => Platform::Web,
        }
    }
}

impl std::fmt::Display for PlatformArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Platform::from(*self).fmt(f)
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, Parser};

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn platform_display_matches_core() {
        assert_eq!(PlatformArg::Android.to_string(), "android");
        assert_eq!(PlatformArg::Jvm.to_string(), "jvm");
        assert_eq!(PlatformArg::Ios.to_string(), "ios");
        assert_eq!(PlatformArg::Web.to_string(), "web");
    }

    #[test]
    fn parse_init_command() {
        let cli = Cli::parse_from([
            "composables",
            "init",
            "my-app",
            "--targets",
            "android,web",
            "--module",
            "shared",
            "--yes",
        ]);
        let Commands::Init(args) = cli.command else {
            panic!("expected Init command");
        };
        assert_eq!(args.directory.as_deref(), Some("my-app"));
        assert_eq!(args.targets.as_deref(), Some("android,web"));
        assert_eq!(args.module.as_deref(), Some("shared"));
        assert!(args.yes);
        assert!(!args.dry_run);
    }

    #[test]
    fn init_directory_is_optional() {
        let cli = Cli::parse_from(["composables", "init"]);
        assert!(matches!(cli.command, Commands::Init(InitArgs { directory: None, .. })));
    }

    #[test]
    fn desktop_alias() {
        let cli = Cli::parse_from(["composables", "target", "desktop"]);
        let Commands::Target(args) = cli.command else {
            panic!("expected Target command");
        };
        assert_eq!(Platform::from(args.platform), Platform::Jvm);
    }

    #[test]
    fn unknown_platform_is_rejected() {
        assert!(Cli::try_parse_from(["composables", "target", "linux"]).is_err());
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["composables", "--quiet", "--verbose", "update"]);
        assert!(result.is_err());
    }
}
