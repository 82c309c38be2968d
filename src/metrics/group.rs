//! Grouping rows by (read ratio, tree type)

use super::DerivedView;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// `f64` with a total order, for use as a map key
#[derive(Debug, Clone, Copy)]
pub struct FloatKey(pub f64);

impl PartialEq for FloatKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatKey {}

impl PartialOrd for FloatKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Partition key for plotting: read ratio first, then tree type
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct GroupKey {
    pub read_ratio: FloatKey,
    pub tree_type: String,
}

/// One plotted point, averaged over repeated trials
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesPoint {
    pub sortedness_percent: f64,
    pub value: f64,
    /// Number of rows averaged into this point
    pub trials: usize,
}

/// Group the values of one metric column by [`GroupKey`].
///
/// Points in each group are ordered by sortedness ascending. Rows with an
/// empty cell are skipped, so a group whose rows are all empty does not
/// appear in the result at all. An unknown column yields an empty map.
pub fn group_metric(view: &DerivedView, column: &str) -> BTreeMap<GroupKey, Vec<SeriesPoint>> {
    let Some(idx) = view.column_index(column) else {
        return BTreeMap::new();
    };

    let mut sums: BTreeMap<GroupKey, BTreeMap<FloatKey, (f64, usize)>> = BTreeMap::new();
    for row in view.iter() {
        let Some(value) = row.value(idx) else {
            continue;
        };
        let key = GroupKey {
            read_ratio: FloatKey(row.read_ratio),
            tree_type: row.tree_type.clone(),
        };
        let entry = sums
            .entry(key)
            .or_default()
            .entry(FloatKey(view.sortedness_percent(row)))
            .or_insert((0.0, 0));
        entry.0 += value;
        entry.1 += 1;
    }

    sums.into_iter()
        .map(|(key, points)| {
            let points = points
                .into_iter()
                .map(|(x, (sum, trials))| SeriesPoint {
                    sortedness_percent: x.0,
                    value: sum / trials as f64,
                    trials,
                })
                .collect();
            (key, points)
        })
        .collect()
}
