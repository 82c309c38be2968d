//! Error types for btree-report

use crate::config::ConfigError;
use std::path::PathBuf;
use thiserror::Error;

/// Report error type
#[derive(Error, Debug)]
pub enum ReportError {
    /// Input results file does not exist
    #[error("could not find {}; run the benchmark first to generate results", path.display())]
    MissingInput {
        /// Path that was looked up
        path: PathBuf,
    },

    /// A column the report needs is absent from the header
    #[error("missing column `{column}` in {}", path.display())]
    MissingColumn {
        /// Column name
        column: String,
        /// File the table came from
        path: PathBuf,
    },

    /// A numeric cell could not be parsed
    #[error("line {line}: column `{column}` has non-numeric value {value:?}")]
    InvalidValue {
        /// 1-based line number in the input file
        line: u64,
        /// Column name
        column: String,
        /// Raw cell text
        value: String,
    },

    /// A fraction column holds a value outside [0, 1]
    #[error("line {line}: column `{column}` must be within [0, 1], got {value}")]
    OutOfRange {
        /// 1-based line number in the input file
        line: u64,
        /// Column name
        column: String,
        /// Parsed value
        value: f64,
    },

    /// CSV reader error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ReportError>;
