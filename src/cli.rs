use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "viewstack-demo")]
#[command(about = "Drive the page and popup view stacks against in-memory hosts")]
pub struct Cli {
    /// Navigator config file (defaults to the user config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Disable transition animations regardless of the config file
    #[arg(long, global = true)]
    pub no_animations: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a scripted navigation session and print every transition
    Run(RunArgs),
    /// Print the effective navigator configuration as TOML
    Config,
}

#[derive(Args)]
pub struct RunArgs {
    /// Number of detail pages pushed above the home page
    #[arg(long, default_value_t = 3)]
    pub depth: usize,

    /// Number of confirmation popups opened over the pages
    #[arg(long, default_value_t = 2)]
    pub popups: usize,

    /// Simulated transition time of animated operations, in milliseconds
    #[arg(long, default_value_t = 25)]
    pub transition_ms: u64,
}
