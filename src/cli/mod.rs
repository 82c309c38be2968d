//! CLI argument parsing and command handling

use crate::config::{ReportConfig, DEFAULT_BASELINE, DEFAULT_INPUT_PATH};
use crate::runner::{GeneratedChart, ReportRunner};
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

/// Generate comparison charts from B-tree benchmark results
#[derive(Parser, Debug)]
#[command(name = "btree-report")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Benchmark results CSV
    #[arg(default_value = DEFAULT_INPUT_PATH)]
    pub input: PathBuf,

    /// Directory charts are written to
    #[arg(short, long, env = "BTREE_REPORT_OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Operations per benchmark row; turns fast-path hits into a hit rate
    #[arg(long, env = "BTREE_REPORT_TRIAL_COUNT")]
    pub trial_count: Option<u64>,

    /// Tree type that speedups are measured against
    #[arg(long, default_value = DEFAULT_BASELINE)]
    pub baseline: String,

    /// Also write an SVG copy of every chart
    #[arg(long)]
    pub svg: bool,

    /// Write summary.csv and summary.json with per-configuration means
    #[arg(long)]
    pub summary: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Resolve the run configuration
    pub fn config(&self) -> ReportConfig {
        let mut config = ReportConfig::new(&self.input)
            .with_output_dir(&self.output_dir)
            .with_baseline(&self.baseline)
            .with_vector_output(self.svg)
            .with_summary(self.summary);
        config.trial_count = self.trial_count;
        config
    }

    /// Generate the report based on CLI arguments
    pub fn run(&self) -> Result<()> {
        let config = self.config();
        tracing::info!("Input: {}", config.input.display());
        tracing::info!("Output directory: {}", config.output_dir.display());

        let outcome = ReportRunner::new(&config).run(print_generated)?;

        for path in &outcome.summary_files {
            println!("Generated summary: {}", path.display());
        }
        if outcome.charts.is_empty() {
            tracing::warn!("No charts generated from {}", config.input.display());
        }

        Ok(())
    }
}

/// One confirmation line per chart
fn print_generated(chart: &GeneratedChart) {
    let names: Vec<String> = chart.files.iter().map(|p| p.display().to_string()).collect();
    println!("Generated plot: {}", names.join(", "));
}
