//! Benchmark results table and loading

pub mod derive;
pub mod group;
pub mod summary;

pub use derive::{DeriveOptions, DerivedView};
pub use group::{group_metric, FloatKey, GroupKey, SeriesPoint};
pub use summary::{Summary, SummaryRow};

use crate::error::{ReportError, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::cmp::Ordering;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Tree type label column
pub const TREE_TYPE: &str = "TreeType";
/// Sortedness fraction column
pub const SORTEDNESS: &str = "Sortedness";
/// Read ratio fraction column
pub const READ_RATIO: &str = "ReadRatio";

pub const INSERT_TIME: &str = "InsertTime";
pub const POINT_LOOKUP_TIME: &str = "PointLookupTime";
pub const SEARCH_TIME: &str = "SearchTime";
pub const RANGE_QUERY_TIME: &str = "RangeQueryTime";
pub const MIXED_WORKLOAD_TIME: &str = "MixedWorkloadTime";
pub const LEAF_COUNT: &str = "LeafCount";
pub const NODE_COUNT: &str = "NodeCount";
pub const LEAF_UTILIZATION: &str = "LeafUtilization";
pub const FAST_PATH_HITS: &str = "FastPathHits";
pub const SORTED_LEAF_SEARCH: &str = "SortedLeafSearch";

/// One benchmark result row
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkRow {
    /// Tree implementation label
    pub tree_type: String,
    /// Fraction of pre-ordered input keys, in [0, 1]
    pub sortedness: f64,
    /// Fraction of reads in the mixed workload, in [0, 1]
    pub read_ratio: f64,
    /// One value per metric column of the owning table; `None` for empty cells
    pub values: Vec<Option<f64>>,
}

impl BenchmarkRow {
    /// Value at a metric column index
    pub fn value(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied().flatten()
    }
}

/// Benchmark results loaded from a CSV file
#[derive(Debug, Clone)]
pub struct BenchmarkTable {
    source: PathBuf,
    columns: Vec<String>,
    rows: Vec<BenchmarkRow>,
}

impl BenchmarkTable {
    /// Create an empty table with the given metric columns
    pub fn new(source: impl Into<PathBuf>, columns: Vec<String>) -> Self {
        Self {
            source: source.into(),
            columns,
            rows: Vec::new(),
        }
    }

    /// Load a results file
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ReportError::MissingInput {
                path: path.to_path_buf(),
            },
            _ => ReportError::Io(e),
        })?;

        let table = Self::from_reader(file, path)?;
        tracing::info!(
            "Loaded {} rows with {} metric columns from {}",
            table.len(),
            table.columns.len(),
            path.display()
        );
        Ok(table)
    }

    /// Parse results from any reader; `source` is used in error messages
    pub fn from_reader<R: Read>(reader: R, source: &Path) -> Result<Self> {
        let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
        let headers = rdr.headers()?.clone();

        let key_index = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| ReportError::MissingColumn {
                    column: name.to_string(),
                    path: source.to_path_buf(),
                })
        };
        let tree_idx = key_index(TREE_TYPE)?;
        let sortedness_idx = key_index(SORTEDNESS)?;
        let read_ratio_idx = key_index(READ_RATIO)?;

        // Unnamed columns come from trailing delimiters
        let metric_indices: Vec<usize> = headers
            .iter()
            .enumerate()
            .filter(|(idx, name)| {
                ![tree_idx, sortedness_idx, read_ratio_idx].contains(idx) && !name.is_empty()
            })
            .map(|(idx, _)| idx)
            .collect();

        let columns = metric_indices
            .iter()
            .map(|&idx| headers[idx].to_string())
            .collect();
        let mut table = Self::new(source, columns);

        for record in rdr.records() {
            let record = record?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);

            let sortedness = parse_fraction(&record, sortedness_idx, &headers, line)?;
            let read_ratio = parse_fraction(&record, read_ratio_idx, &headers, line)?;

            let mut values = Vec::with_capacity(metric_indices.len());
            for &idx in &metric_indices {
                values.push(parse_cell(&record, idx, &headers, line)?);
            }
            if values.iter().all(Option::is_none) && !values.is_empty() {
                tracing::warn!("line {}: row has no metric values", line);
            }

            table.add(BenchmarkRow {
                tree_type: record.get(tree_idx).unwrap_or_default().to_string(),
                sortedness,
                read_ratio,
                values,
            });
        }

        Ok(table)
    }

    /// Add a row; missing trailing values are padded with `None`
    pub fn add(&mut self, mut row: BenchmarkRow) {
        row.values.resize(self.columns.len(), None);
        self.rows.push(row);
    }

    /// Append a metric column, one value per row
    pub(crate) fn push_column(&mut self, name: &str, values: Vec<Option<f64>>) {
        debug_assert_eq!(values.len(), self.rows.len());
        self.columns.push(name.to_string());
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.values.push(value);
        }
    }

    /// File the table was read from
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Metric column names in header order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Index of a metric column
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Check whether a metric column exists
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Get the number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get an iterator over the rows
    pub fn iter(&self) -> impl Iterator<Item = &BenchmarkRow> {
        self.rows.iter()
    }

    /// Values of one metric column, in row order
    pub fn column_values(&self, name: &str) -> Option<Vec<Option<f64>>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(|r| r.value(idx)).collect())
    }

    /// Distinct tree type labels, sorted lexicographically
    pub fn tree_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.rows.iter().map(|r| r.tree_type.as_str()).collect();
        types.sort_unstable();
        types.dedup();
        types
    }

    /// Distinct read ratios, ascending
    pub fn read_ratios(&self) -> Vec<f64> {
        let mut ratios: Vec<f64> = self.rows.iter().map(|r| r.read_ratio).collect();
        ratios.sort_by(|a, b| a.total_cmp(b));
        ratios.dedup_by(|a, b| a.total_cmp(b) == Ordering::Equal);
        ratios
    }
}

fn parse_cell(
    record: &StringRecord,
    idx: usize,
    headers: &StringRecord,
    line: u64,
) -> Result<Option<f64>> {
    let raw = record.get(idx).unwrap_or_default();
    if raw.is_empty() {
        return Ok(None);
    }
    let value = raw.parse::<f64>().map_err(|_| ReportError::InvalidValue {
        line,
        column: headers[idx].to_string(),
        value: raw.to_string(),
    })?;
    // NaN and infinities are treated like empty cells
    Ok(value.is_finite().then_some(value))
}

fn parse_fraction(
    record: &StringRecord,
    idx: usize,
    headers: &StringRecord,
    line: u64,
) -> Result<f64> {
    let value = parse_cell(record, idx, headers, line)?.ok_or_else(|| {
        ReportError::InvalidValue {
            line,
            column: headers[idx].to_string(),
            value: record.get(idx).unwrap_or_default().to_string(),
        }
    })?;
    if !(0.0..=1.0).contains(&value) {
        return Err(ReportError::OutOfRange {
            line,
            column: headers[idx].to_string(),
            value,
        });
    }
    // -0 and 0 must land in the same group
    Ok(value + 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const RESULTS: &str = "\
TreeType,Sortedness,ReadRatio,InsertTime,LeafUtilization,FastPathHits
OptimizedBTree,1,0.5,0.12,0.98,99000
SimpleBTree,1,0.5,0.31,0.51,0
OptimizedBTree,0.5,0.5,0.25,,4000
";

    fn parse(input: &str) -> Result<BenchmarkTable> {
        BenchmarkTable::from_reader(input.as_bytes(), Path::new("test.csv"))
    }

    #[test]
    fn test_load_results() {
        let table = parse(RESULTS).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(
            table.columns(),
            &["InsertTime", "LeafUtilization", "FastPathHits"]
        );

        let first = table.iter().next().unwrap();
        assert_eq!(first.tree_type, "OptimizedBTree");
        assert_eq!(first.sortedness, 1.0);
        assert_eq!(first.read_ratio, 0.5);
        assert_eq!(first.value(0), Some(0.12));
    }

    #[test]
    fn test_empty_cell_is_missing() {
        let table = parse(RESULTS).unwrap();
        let utilization = table.column_values(LEAF_UTILIZATION).unwrap();
        assert_eq!(utilization, vec![Some(0.98), Some(0.51), None]);
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        let table = parse("TreeType , Sortedness , ReadRatio , InsertTime\n A , 0.5 , 0.5 , 1.5\n")
            .unwrap();
        assert!(table.has_column(INSERT_TIME));
        assert_eq!(table.iter().next().unwrap().tree_type, "A");
    }

    #[test]
    fn test_missing_key_column() {
        let err = parse("TreeType,ReadRatio,InsertTime\nA,0.5,1.0\n").unwrap_err();
        assert!(
            matches!(err, ReportError::MissingColumn { ref column, .. } if column == SORTEDNESS)
        );
    }

    #[test]
    fn test_non_numeric_value() {
        let err = parse("TreeType,Sortedness,ReadRatio,InsertTime\nA,0.5,0.5,fast\n").unwrap_err();
        match err {
            ReportError::InvalidValue {
                line,
                column,
                value,
            } => {
                assert_eq!(line, 2);
                assert_eq!(column, INSERT_TIME);
                assert_eq!(value, "fast");
            }
            other => panic!("Expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn test_fraction_out_of_range() {
        let err = parse("TreeType,Sortedness,ReadRatio,InsertTime\nA,95,0.5,1.0\n").unwrap_err();
        assert!(matches!(err, ReportError::OutOfRange { value, .. } if value == 95.0));
    }

    #[test]
    fn test_negative_zero_joins_zero_group() {
        let table = parse(
            "TreeType,Sortedness,ReadRatio,InsertTime\nA,-0,0,1\nA,0,-0,2\nA,0,0,3\n",
        )
        .unwrap();
        assert_eq!(table.read_ratios(), vec![0.0]);
        assert!(table.iter().all(|r| r.sortedness.is_sign_positive()));

        let view = DerivedView::new(&table, &DeriveOptions::default());
        let groups = group_metric(&view, INSERT_TIME);
        assert_eq!(groups.len(), 1);
        let points = groups.values().next().unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].sortedness_percent, 0.0);
        assert!(points[0].sortedness_percent.is_sign_positive());
        assert_eq!(points[0].value, 2.0);
        assert_eq!(points[0].trials, 3);
    }

    #[test]
    fn test_header_only_is_empty_table() {
        let table = parse("TreeType,Sortedness,ReadRatio,InsertTime\n").unwrap();
        assert!(table.is_empty());
        assert!(table.has_column(INSERT_TIME));
    }

    #[test]
    fn test_distinct_dimensions_are_sorted() {
        let table = parse(
            "TreeType,Sortedness,ReadRatio\nb,0,0.9\na,0,0.1\nb,1,0.1\nB,1,0.5\n",
        )
        .unwrap();
        assert_eq!(table.tree_types(), vec!["B", "a", "b"]);
        assert_eq!(table.read_ratios(), vec![0.1, 0.5, 0.9]);
    }

    #[test]
    fn test_from_path_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.csv");
        let err = BenchmarkTable::from_path(&path).unwrap_err();

        assert!(matches!(err, ReportError::MissingInput { .. }));
        let message = err.to_string();
        assert!(message.contains("absent.csv"));
        assert!(message.contains("run the benchmark first"));
    }

    #[test]
    fn test_from_path() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", RESULTS).unwrap();

        let table = BenchmarkTable::from_path(file.path()).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.source(), file.path());
    }
}
