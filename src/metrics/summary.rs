//! Per-configuration summary of repeated trials

use super::group::FloatKey;
use super::DerivedView;
use serde::Serialize;
use std::collections::BTreeMap;

/// Mean metric values for one (tree type, sortedness, read ratio)
#[derive(Debug, Clone, Serialize)]
pub struct SummaryRow {
    pub tree_type: String,
    pub sortedness: f64,
    pub read_ratio: f64,
    /// Rows averaged into this entry
    pub trials: usize,
    /// One mean per column of [`Summary::columns`]; `None` when every
    /// trial left the cell empty
    pub means: Vec<Option<f64>>,
}

/// Summary table, ordered by read ratio, tree type, then sortedness
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub columns: Vec<String>,
    pub rows: Vec<SummaryRow>,
}

type ConfigKey = (FloatKey, String, FloatKey);

impl Summary {
    /// Aggregate every metric column of the view
    pub fn from_view(view: &DerivedView) -> Self {
        let width = view.columns().len();
        let mut acc: BTreeMap<ConfigKey, (usize, Vec<(f64, usize)>)> = BTreeMap::new();

        for row in view.iter() {
            let key = (
                FloatKey(row.read_ratio),
                row.tree_type.clone(),
                FloatKey(row.sortedness),
            );
            let (trials, sums) = acc
                .entry(key)
                .or_insert_with(|| (0, vec![(0.0, 0); width]));
            *trials += 1;
            for (idx, slot) in sums.iter_mut().enumerate() {
                if let Some(value) = row.value(idx) {
                    slot.0 += value;
                    slot.1 += 1;
                }
            }
        }

        let rows = acc
            .into_iter()
            .map(|((read_ratio, tree_type, sortedness), (trials, sums))| SummaryRow {
                tree_type,
                sortedness: sortedness.0,
                read_ratio: read_ratio.0,
                trials,
                means: sums
                    .into_iter()
                    .map(|(sum, n)| (n > 0).then(|| sum / n as f64))
                    .collect(),
            })
            .collect();

        Self {
            columns: view.columns().to_vec(),
            rows,
        }
    }

    /// Get the number of summary rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the summary is empty
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
