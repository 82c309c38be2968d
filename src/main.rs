//! btree-report CLI
//!
//! Turns a B-tree benchmark results CSV into comparison charts.

use anyhow::Result;
use btree_report::cli::Cli;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging; stdout is kept for the generated file list
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    // Generate the report
    cli.run()?;

    Ok(())
}
