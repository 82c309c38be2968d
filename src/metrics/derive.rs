//! Derived display columns

use super::group::FloatKey;
use super::{
    BenchmarkRow, BenchmarkTable, FAST_PATH_HITS, INSERT_TIME, POINT_LOOKUP_TIME, SEARCH_TIME,
};
use crate::config::{ReportConfig, DEFAULT_BASELINE};
use std::collections::BTreeMap;
use std::ops::Deref;

pub const SORTEDNESS_PERCENT: &str = "SortednessPercent";
pub const FAST_PATH_HIT_RATE: &str = "FastPathHitRate";
pub const INSERT_SPEEDUP: &str = "InsertSpeedup";
pub const POINT_LOOKUP_SPEEDUP: &str = "PointLookupSpeedup";
pub const SEARCH_SPEEDUP: &str = "SearchSpeedup";

/// Inputs to column derivation that do not come from the data
#[derive(Debug, Clone)]
pub struct DeriveOptions {
    /// Operations behind each row; enables the fast-path hit rate column
    pub trial_count: Option<u64>,
    /// Tree type that speedups are relative to
    pub baseline: String,
}

impl Default for DeriveOptions {
    fn default() -> Self {
        Self {
            trial_count: None,
            baseline: DEFAULT_BASELINE.to_string(),
        }
    }
}

impl From<&ReportConfig> for DeriveOptions {
    fn from(config: &ReportConfig) -> Self {
        Self {
            trial_count: config.trial_count,
            baseline: config.baseline.clone(),
        }
    }
}

/// A copy of a [`BenchmarkTable`] with derived columns appended.
///
/// Always carries `SortednessPercent`. `FastPathHitRate` needs both the
/// `FastPathHits` column and a trial count. The speedup columns need the
/// source time column and at least one baseline row.
#[derive(Debug, Clone)]
pub struct DerivedView {
    table: BenchmarkTable,
    sortedness_percent: usize,
}

impl DerivedView {
    /// Build the view; `table` is left untouched
    pub fn new(table: &BenchmarkTable, options: &DeriveOptions) -> Self {
        let mut derived = table.clone();

        let percent = table.iter().map(|r| Some(r.sortedness * 100.0)).collect();
        derived.push_column(SORTEDNESS_PERCENT, percent);
        let sortedness_percent = derived.columns().len() - 1;

        if let (Some(hits), Some(trials)) = (table.column_values(FAST_PATH_HITS), options.trial_count)
        {
            let trials = trials as f64;
            let rate = hits.iter().map(|h| h.map(|h| h * 100.0 / trials)).collect();
            derived.push_column(FAST_PATH_HIT_RATE, rate);
        }

        let speedups = [
            (INSERT_TIME, INSERT_SPEEDUP),
            (POINT_LOOKUP_TIME, POINT_LOOKUP_SPEEDUP),
            (SEARCH_TIME, SEARCH_SPEEDUP),
        ];
        for (source, target) in speedups {
            if let Some(speedup) = speedup_column(table, source, &options.baseline) {
                derived.push_column(target, speedup);
            } else {
                tracing::debug!("No {} column derived", target);
            }
        }

        Self {
            table: derived,
            sortedness_percent,
        }
    }

    /// Sortedness of a row as a percentage
    pub fn sortedness_percent(&self, row: &BenchmarkRow) -> f64 {
        row.value(self.sortedness_percent)
            .unwrap_or(row.sortedness * 100.0)
    }

    /// The augmented table
    pub fn table(&self) -> &BenchmarkTable {
        &self.table
    }
}

impl Deref for DerivedView {
    type Target = BenchmarkTable;

    fn deref(&self) -> &Self::Target {
        &self.table
    }
}

/// Baseline time divided by row time, matched on (sortedness, read ratio).
///
/// Returns `None` when the column is absent or the baseline tree has no
/// values for it.
fn speedup_column(table: &BenchmarkTable, column: &str, baseline: &str) -> Option<Vec<Option<f64>>> {
    let idx = table.column_index(column)?;

    let mut sums: BTreeMap<(FloatKey, FloatKey), (f64, usize)> = BTreeMap::new();
    for row in table.iter().filter(|r| r.tree_type == baseline) {
        if let Some(value) = row.value(idx) {
            let entry = sums
                .entry((FloatKey(row.sortedness), FloatKey(row.read_ratio)))
                .or_insert((0.0, 0));
            entry.0 += value;
            entry.1 += 1;
        }
    }
    if sums.is_empty() {
        return None;
    }

    let speedup = table
        .iter()
        .map(|row| {
            let (sum, n) = sums.get(&(FloatKey(row.sortedness), FloatKey(row.read_ratio)))?;
            let time = row.value(idx)?;
            (time > 0.0).then(|| (sum / *n as f64) / time)
        })
        .collect();
    Some(speedup)
}
