//! Leaf utilization trend charts

use super::grouped::GroupedPlotter;
use super::layout::{ChartKind, ChartSpec, GroupedChart};
use crate::metrics::{DerivedView, LEAF_UTILIZATION};
use anyhow::Result;
use std::ops::Range;
use std::path::{Path, PathBuf};

/// Utilization is a bounded ratio, so every panel shares this y-axis
pub const Y_RANGE: Range<f64> = 0.0..1.0;

pub const LEAF_UTILIZATION_CHART: ChartSpec = ChartSpec::new(
    LEAF_UTILIZATION,
    "leaf_utilization",
    "Leaf Utilization vs. Sortedness",
    "Leaf Utilization",
    ChartKind::Utilization,
);

pub struct UtilizationPlotter;

impl UtilizationPlotter {
    /// Plot leaf utilization per tree type as lines over sortedness.
    ///
    /// Returns `None` without writing anything when the view has no
    /// utilization values.
    pub fn render(view: &DerivedView, base: &Path, vector: bool) -> Result<Option<Vec<PathBuf>>> {
        let chart = GroupedChart::build(view, &LEAF_UTILIZATION_CHART);
        if chart.is_empty() {
            return Ok(None);
        }
        GroupedPlotter::render(&chart, base, vector).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{BenchmarkTable, DeriveOptions};

    #[test]
    fn test_no_utilization_writes_nothing() {
        let table = BenchmarkTable::from_reader(
            "TreeType,Sortedness,ReadRatio,InsertTime\nA,0,0.5,1\n".as_bytes(),
            Path::new("t.csv"),
        )
        .unwrap();
        let view = DerivedView::new(&table, &DeriveOptions::default());
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("leaf_utilization");

        assert!(UtilizationPlotter::render(&view, &base, true).unwrap().is_none());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_utilization_chart_is_a_line_chart() {
        assert_eq!(LEAF_UTILIZATION_CHART.kind, ChartKind::Utilization);
        assert!(Y_RANGE.contains(&0.0));
        assert_eq!(Y_RANGE.end, 1.0);
    }
}
