//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for colony
#[derive(Parser, Debug)]
#[command(name = "colony")]
#[command(
    author,
    version,
    about = "Hierarchical agent colony - autonomous plan/dispatch/consolidate cycles"
)]
#[command(long_about = r#"
Colony drives a fixed-depth agent hierarchy - one planner, one dispatcher,
and a pool of specialized workers - through repeating
plan -> dispatch -> consolidate cycles, time-boxed by a running-time budget.

All file operations are confined to the workspace boundary. An interactive
shell controls the cycle: start, pause, status, inspect, exit.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./colony.toml       Project-level config
3. ~/.config/colony/config.toml   Global config

Example:
  colony --workspace ./sandbox --duration 3600
  colony --start --quiet
"#)]
pub struct Cli {
    /// Workspace root that confines all file operations
    #[arg(short, long, value_name = "PATH")]
    pub workspace: Option<PathBuf>,

    /// Cycle running-time budget, in seconds
    #[arg(short, long, value_name = "SECS")]
    pub duration: Option<u64>,

    /// Delay between cycle iterations, in milliseconds
    #[arg(long, value_name = "MS")]
    pub pacing: Option<u64>,

    /// Start the cycle immediately instead of waiting for the shell command
    #[arg(short, long)]
    pub start: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress the live status ticker
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
