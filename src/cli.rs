//! CLI argument parsing module for gemfresh

use clap::Parser;
use std::path::PathBuf;

/// Gemfile freshness checker
#[derive(Parser, Debug, Clone)]
#[command(
    name = "gemfresh",
    version,
    about = "Reports the freshness of the gems in your Gemfile"
)]
pub struct CliArgs {
    /// Path to the Gemfile
    #[arg(default_value = "Gemfile")]
    pub gemfile: PathBuf,

    /// Path to the lockfile
    #[arg(default_value = "Gemfile.lock")]
    pub lockfile: PathBuf,

    /// Output the report in JSON format
    #[arg(long)]
    pub json: bool,

    /// Enable quiet mode - no progress display or banner
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,
}

impl CliArgs {
    /// Whether to show the progress bar during the check
    pub fn show_progress(&self) -> bool {
        !self.quiet && !self.json
    }
}
