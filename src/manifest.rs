//! Declarative list of charts to generate
//!
//! Adding a chart means adding one entry to [`ChartManifest::standard`].

use crate::error::{ReportError, Result};
use crate::metrics::derive::{
    FAST_PATH_HIT_RATE, INSERT_SPEEDUP, POINT_LOOKUP_SPEEDUP, SEARCH_SPEEDUP,
};
use crate::metrics::{
    DerivedView, FAST_PATH_HITS, INSERT_TIME, LEAF_COUNT, MIXED_WORKLOAD_TIME, NODE_COUNT,
    POINT_LOOKUP_TIME, RANGE_QUERY_TIME, SEARCH_TIME, SORTED_LEAF_SEARCH,
};
use crate::visualization::utilization::LEAF_UTILIZATION_CHART;
use crate::visualization::{ChartKind, ChartSpec};

/// How an entry is drawn
#[derive(Debug, Clone, PartialEq)]
pub enum Renderer {
    /// Bar or line chart per read ratio
    Grouped(ChartSpec),
    /// Leaf utilization line chart with a fixed [0, 1] axis
    Utilization,
}

impl Renderer {
    /// Chart specification behind this renderer
    pub fn spec(&self) -> &ChartSpec {
        match self {
            Renderer::Grouped(spec) => spec,
            Renderer::Utilization => &LEAF_UTILIZATION_CHART,
        }
    }
}

/// One chart in the manifest
#[derive(Debug, Clone, PartialEq)]
pub struct ManifestEntry {
    pub renderer: Renderer,
    /// Fail the run when the metric column is absent
    pub required: bool,
    /// Skip this entry when another entry for this column is planned
    pub superseded_by: Option<&'static str>,
}

impl ManifestEntry {
    pub fn required(spec: ChartSpec) -> Self {
        Self {
            renderer: Renderer::Grouped(spec),
            required: true,
            superseded_by: None,
        }
    }

    pub fn optional(spec: ChartSpec) -> Self {
        Self {
            renderer: Renderer::Grouped(spec),
            required: false,
            superseded_by: None,
        }
    }

    pub fn utilization() -> Self {
        Self {
            renderer: Renderer::Utilization,
            required: false,
            superseded_by: None,
        }
    }

    pub fn superseded_by(mut self, metric: &'static str) -> Self {
        self.superseded_by = Some(metric);
        self
    }

    /// Metric column this entry reads
    pub fn metric(&self) -> &'static str {
        self.renderer.spec().metric
    }
}

/// Ordered chart list; the order is the file generation order
#[derive(Debug, Clone)]
pub struct ChartManifest {
    entries: Vec<ManifestEntry>,
}

impl ChartManifest {
    pub fn new(entries: Vec<ManifestEntry>) -> Self {
        Self { entries }
    }

    /// Charts for the B-tree benchmark results
    pub fn standard() -> Self {
        use ChartKind::{Bar, Line};

        Self::new(vec![
            ManifestEntry::required(ChartSpec::new(
                INSERT_TIME,
                "insert_performance",
                "Insert Performance vs. Sortedness",
                "Insert Time (ms/op)",
                Bar,
            )),
            ManifestEntry::optional(ChartSpec::new(
                POINT_LOOKUP_TIME,
                "point_lookup_performance",
                "Point Lookup Performance vs. Sortedness",
                "Point Lookup Time (ms/op)",
                Bar,
            )),
            ManifestEntry::optional(ChartSpec::new(
                SEARCH_TIME,
                "search_performance",
                "Search Performance vs. Sortedness",
                "Search Time (ms)",
                Bar,
            )),
            ManifestEntry::optional(ChartSpec::new(
                RANGE_QUERY_TIME,
                "range_query_performance",
                "Range Query Performance vs. Sortedness",
                "Range Query Time (ms/query)",
                Bar,
            )),
            ManifestEntry::optional(ChartSpec::new(
                MIXED_WORKLOAD_TIME,
                "mixed_workload_performance",
                "Mixed Workload Performance vs. Sortedness",
                "Mixed Workload Time (ms/op)",
                Bar,
            )),
            ManifestEntry::optional(
                ChartSpec::new(
                    INSERT_SPEEDUP,
                    "insert_speedup",
                    "Insert Speedup vs. Sortedness",
                    "Speedup Factor",
                    Line,
                )
                .with_reference_line(1.0),
            ),
            ManifestEntry::optional(
                ChartSpec::new(
                    POINT_LOOKUP_SPEEDUP,
                    "point_lookup_speedup",
                    "Point Lookup Speedup vs. Sortedness",
                    "Speedup Factor",
                    Line,
                )
                .with_reference_line(1.0),
            ),
            ManifestEntry::optional(
                ChartSpec::new(
                    SEARCH_SPEEDUP,
                    "search_speedup",
                    "Search Speedup vs. Sortedness",
                    "Speedup Factor",
                    Line,
                )
                .with_reference_line(1.0),
            ),
            ManifestEntry::optional(ChartSpec::new(
                FAST_PATH_HIT_RATE,
                "fast_path_hit_rate",
                "Fast Path Hit Rate vs. Sortedness",
                "Fast Path Hit Rate (%)",
                Bar,
            )),
            ManifestEntry::optional(ChartSpec::new(
                FAST_PATH_HITS,
                "fast_path_hits",
                "Fast Path Usage vs. Sortedness",
                "Fast Path Hits",
                Bar,
            ))
            .superseded_by(FAST_PATH_HIT_RATE),
            ManifestEntry::optional(ChartSpec::new(
                SORTED_LEAF_SEARCH,
                "sorted_leaf_search",
                "Sorted Leaf Searches vs. Sortedness",
                "Sorted Leaf Searches",
                Bar,
            )),
            ManifestEntry::optional(ChartSpec::new(
                LEAF_COUNT,
                "leaf_count",
                "Leaf Count vs. Sortedness",
                "Leaf Count",
                Bar,
            )),
            ManifestEntry::optional(ChartSpec::new(
                NODE_COUNT,
                "node_count",
                "Node Count vs. Sortedness",
                "Node Count",
                Bar,
            )),
            ManifestEntry::utilization(),
        ])
    }

    /// All entries, in order
    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    /// Entries that can be drawn from this view, in manifest order.
    ///
    /// Fails on the first required entry whose column is absent, before
    /// anything is rendered.
    pub fn plan(&self, view: &DerivedView) -> Result<Vec<&ManifestEntry>> {
        if let Some(missing) = self
            .entries
            .iter()
            .find(|e| e.required && !view.has_column(e.metric()))
        {
            return Err(ReportError::MissingColumn {
                column: missing.metric().to_string(),
                path: view.source().to_path_buf(),
            });
        }

        let planned = self
            .entries
            .iter()
            .filter(|entry| {
                if !view.has_column(entry.metric()) {
                    tracing::info!(
                        "Skipping {}: no {} column",
                        entry.renderer.spec().file_stem,
                        entry.metric()
                    );
                    return false;
                }
                match entry.superseded_by {
                    Some(other) if view.has_column(other) => {
                        tracing::info!(
                            "Skipping {}: {} is plotted instead",
                            entry.renderer.spec().file_stem,
                            other
                        );
                        false
                    }
                    _ => true,
                }
            })
            .collect();
        Ok(planned)
    }
}

impl Default for ChartManifest {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{BenchmarkTable, DeriveOptions};
    use std::collections::HashSet;
    use std::path::Path;

    fn view(input: &str, options: &DeriveOptions) -> DerivedView {
        let table = BenchmarkTable::from_reader(input.as_bytes(), Path::new("t.csv")).unwrap();
        DerivedView::new(&table, options)
    }

    fn stems(plan: &[&ManifestEntry]) -> Vec<&'static str> {
        plan.iter().map(|e| e.renderer.spec().file_stem).collect()
    }

    const FULL: &str = "\
TreeType,Sortedness,ReadRatio,InsertTime,PointLookupTime,RangeQueryTime,MixedWorkloadTime,LeafCount,LeafUtilization,FastPathHits,SortedLeafSearch
SimpleBTree,1,0.5,0.3,0.2,0.5,0.4,100,0.5,0,0
OptimizedBTree,1,0.5,0.1,0.2,0.5,0.3,60,0.9,99000,10
";

    #[test]
    fn test_file_stems_are_unique() {
        let manifest = ChartManifest::standard();
        let stems: HashSet<_> = manifest
            .entries()
            .iter()
            .map(|e| e.renderer.spec().file_stem)
            .collect();
        assert_eq!(stems.len(), manifest.entries().len());
    }

    #[test]
    fn test_full_dataset_plan_order() {
        let view = view(FULL, &DeriveOptions::default());
        let manifest = ChartManifest::standard();
        let plan = manifest.plan(&view).unwrap();

        assert_eq!(
            stems(&plan),
            vec![
                "insert_performance",
                "point_lookup_performance",
                "range_query_performance",
                "mixed_workload_performance",
                "insert_speedup",
                "point_lookup_speedup",
                "fast_path_hits",
                "sorted_leaf_search",
                "leaf_count",
                "leaf_utilization",
            ]
        );
    }

    #[test]
    fn test_hit_rate_replaces_raw_hits() {
        let options = DeriveOptions {
            trial_count: Some(100_000),
            ..Default::default()
        };
        let view = view(FULL, &options);
        let manifest = ChartManifest::standard();
        let plan = stems(&manifest.plan(&view).unwrap());

        assert!(plan.contains(&"fast_path_hit_rate"));
        assert!(!plan.contains(&"fast_path_hits"));
    }

    #[test]
    fn test_search_charts_follow_search_time() {
        let view = view(
            "TreeType,Sortedness,ReadRatio,InsertTime,SearchTime\nSimpleBTree,0.5,0.5,1,2\nLasTree,0.5,0.5,1,1\n",
            &DeriveOptions::default(),
        );
        let manifest = ChartManifest::standard();
        let plan = manifest.plan(&view).unwrap();
        assert_eq!(
            stems(&plan),
            vec![
                "insert_performance",
                "search_performance",
                "insert_speedup",
                "search_speedup",
            ]
        );
        let entry = plan.iter().find(|e| e.metric() == SEARCH_SPEEDUP).unwrap();
        assert_eq!(entry.renderer.spec().reference_line, Some(1.0));
    }

    #[test]
    fn test_missing_optional_column_is_skipped() {
        let view = view(
            "TreeType,Sortedness,ReadRatio,InsertTime\nA,0.5,0.5,1\n",
            &DeriveOptions::default(),
        );
        let manifest = ChartManifest::standard();
        let plan = manifest.plan(&view).unwrap();
        assert_eq!(stems(&plan), vec!["insert_performance"]);
    }

    #[test]
    fn test_missing_required_column_fails() {
        let view = view(
            "TreeType,Sortedness,ReadRatio,LeafCount\nA,0.5,0.5,1\n",
            &DeriveOptions::default(),
        );
        let err = ChartManifest::standard().plan(&view).unwrap_err();
        assert!(
            matches!(err, ReportError::MissingColumn { ref column, .. } if column == INSERT_TIME)
        );
    }

    #[test]
    fn test_utilization_entry_uses_fixed_spec() {
        let entry = ManifestEntry::utilization();
        assert_eq!(entry.renderer.spec().kind, ChartKind::Utilization);
        assert_eq!(entry.metric(), crate::metrics::LEAF_UTILIZATION);
    }
}
