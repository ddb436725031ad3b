//! gemfresh - Gemfile freshness checker CLI tool
//!
//! Checks the gems pinned in a Gemfile.lock against their RubyGems sources
//! and reports which are current, updatable, or obsolete.

use clap::Parser;
use gemfresh::cli::CliArgs;
use gemfresh::manifest;
use gemfresh::output::create_formatter;
use gemfresh::reconcile::ReconciliationRun;
use gemfresh::registry::{HttpReaderFactory, SourceRouter};
use std::io::{self, Write};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    if args.verbose {
        eprintln!("gemfresh v{}", env!("CARGO_PKG_VERSION"));
        eprintln!("Gemfile: {}", args.gemfile.display());
        eprintln!("Lockfile: {}", args.lockfile.display());
    }

    let dependencies = manifest::load_dependencies(&args.gemfile, &args.lockfile)?;
    if dependencies.is_empty() {
        println!("No top-level RubyGem dependencies found in your Gemfile.");
        return Ok(ExitCode::SUCCESS);
    }

    if !args.json && !args.quiet {
        println!("Checking the freshness of your Gemfile.");
    }

    let router = SourceRouter::new(Box::new(HttpReaderFactory::new()));
    let mut reconciliation = ReconciliationRun::new(router).with_progress(args.show_progress());
    let report = reconciliation.execute(&dependencies).await;

    let formatter = create_formatter(args.json);
    let mut stdout = io::stdout().lock();
    formatter.format(&report, &mut stdout)?;
    stdout.flush()?;

    // Obsolete gems are information, not failure; unreachable sources are
    if report.unavailable > 0 {
        return Ok(ExitCode::from(2));
    }
    Ok(ExitCode::SUCCESS)
}
