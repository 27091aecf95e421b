//! Flags shared by `init`, `target`, `update` and `completions`.

use std::path::PathBuf;

use clap::{ArgAction, Args};

#[derive(Debug, Clone, Default, Args)]
pub struct GlobalArgs {
    /// Log more while scaffolding: `-v` progress, `-vv` file-level detail,
    /// `-vvv` everything.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Print errors only; summaries, next steps and spinners are dropped.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Plain output without ANSI colours (also set by `NO_COLOR`).
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Read settings from this TOML file instead of the user config file.
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}
