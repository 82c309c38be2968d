//! btree-report - Charts for B-tree benchmark results
//!
//! Loads the CSV written by the B-tree benchmark and renders comparison
//! charts of each tree type across sortedness levels, one panel per read
//! ratio.
//!
//! # Architecture
//!
//! - **Metrics**: results table, derived columns, grouping, summary
//! - **Manifest**: which charts to draw and which columns they need
//! - **Visualization**: chart layout and plotters rendering
//! - **Runner**: load → derive → plan → render pipeline
//! - **Output**: summary export to CSV and JSON
//!
//! # Example
//!
//! ```rust,no_run
//! use btree_report::config::ReportConfig;
//! use btree_report::runner::ReportRunner;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ReportConfig::new("btree_benchmark.csv")
//!         .with_output_dir("charts")
//!         .with_trial_count(100_000);
//!
//!     let outcome = ReportRunner::new(&config).run(|chart| {
//!         println!("{}", chart.file_stem);
//!     })?;
//!     println!("{} charts", outcome.charts.len());
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod manifest;
pub mod metrics;
pub mod output;
pub mod runner;
pub mod visualization;

// Re-export commonly used types
pub use config::ReportConfig;
pub use error::ReportError;
pub use manifest::ChartManifest;
pub use metrics::{BenchmarkRow, BenchmarkTable, DerivedView};
pub use output::{CsvExporter, JsonExporter};
pub use runner::{ReportOutcome, ReportRunner};
pub use visualization::{GroupedChart, GroupedPlotter, UtilizationPlotter};
