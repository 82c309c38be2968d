//! Report configuration types

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Results file written by the benchmark when no path is given
pub const DEFAULT_INPUT_PATH: &str = "btree_benchmark.csv";

/// Tree type that speedups are measured against
pub const DEFAULT_BASELINE: &str = "SimpleBTree";

/// Report configuration
///
/// Resolved once at start-up and passed by reference through the
/// load, derive and render stages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Benchmark results CSV
    pub input: PathBuf,

    /// Directory the charts are written to
    pub output_dir: PathBuf,

    /// Operations per benchmark row, used to turn fast-path hit counts
    /// into a percentage
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trial_count: Option<u64>,

    /// Baseline tree type for speedup charts
    pub baseline: String,

    /// Also write an SVG copy of every chart
    pub vector_output: bool,

    /// Write summary.csv and summary.json
    pub summary: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT_PATH),
            output_dir: PathBuf::from("."),
            trial_count: None,
            baseline: DEFAULT_BASELINE.to_string(),
            vector_output: false,
            summary: false,
        }
    }
}

impl ReportConfig {
    /// Create a config reading from the given input file
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            ..Default::default()
        }
    }

    /// Set the output directory
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Set the trial count
    pub fn with_trial_count(mut self, trials: u64) -> Self {
        self.trial_count = Some(trials);
        self
    }

    /// Set the baseline tree type
    pub fn with_baseline(mut self, baseline: impl Into<String>) -> Self {
        self.baseline = baseline.into();
        self
    }

    /// Enable SVG duplicates
    pub fn with_vector_output(mut self, enabled: bool) -> Self {
        self.vector_output = enabled;
        self
    }

    /// Enable summary export
    pub fn with_summary(mut self, enabled: bool) -> Self {
        self.summary = enabled;
        self
    }

    /// Path of an output file inside the output directory
    pub fn output_path(&self, file_name: &str) -> PathBuf {
        self.output_dir.join(file_name)
    }

    /// Input path as given
    pub fn input(&self) -> &Path {
        &self.input
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(trials) = self.trial_count {
            if trials == 0 {
                return Err(ConfigError::InvalidTrialCount(
                    "trial count must be at least 1".into(),
                ));
            }
        }

        if self.baseline.trim().is_empty() {
            return Err(ConfigError::EmptyBaseline);
        }

        Ok(())
    }
}

/// Configuration validation errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Invalid trial count
    #[error("Invalid trial count: {0}")]
    InvalidTrialCount(String),

    /// Baseline tree type is blank
    #[error("Baseline tree type must not be empty")]
    EmptyBaseline,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ReportConfig::default();
        assert_eq!(config.input, PathBuf::from(DEFAULT_INPUT_PATH));
        assert_eq!(config.output_dir, PathBuf::from("."));
        assert!(config.trial_count.is_none());
        assert_eq!(config.baseline, "SimpleBTree");
        assert!(!config.vector_output);
        assert!(!config.summary);
    }

    #[test]
    fn test_config_builder_pattern() {
        let config = ReportConfig::new("results.csv")
            .with_output_dir("charts")
            .with_trial_count(100_000)
            .with_baseline("LasTree")
            .with_vector_output(true)
            .with_summary(true);

        assert_eq!(config.input(), Path::new("results.csv"));
        assert_eq!(config.output_path("a.png"), PathBuf::from("charts/a.png"));
        assert_eq!(config.trial_count, Some(100_000));
        assert_eq!(config.baseline, "LasTree");
        assert!(config.vector_output);
        assert!(config.summary);
    }

    #[test]
    fn test_config_validation_valid() {
        let config = ReportConfig::new("x.csv").with_trial_count(1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_zero_trial_count() {
        let config = ReportConfig::new("x.csv").with_trial_count(0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidTrialCount(_))
        ));
    }

    #[test]
    fn test_config_validation_blank_baseline() {
        let config = ReportConfig::new("x.csv").with_baseline("  ");
        assert!(matches!(config.validate(), Err(ConfigError::EmptyBaseline)));
    }

    #[test]
    fn test_config_serialization() {
        let config = ReportConfig::new("bench.csv").with_trial_count(500);

        let json = serde_json::to_string(&config).unwrap();
        let deserialized: ReportConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.input, PathBuf::from("bench.csv"));
        assert_eq!(deserialized.trial_count, Some(500));
    }
}
