//! Chart layout: subplots, series order and bar geometry
//!
//! Everything here is computed before any drawing happens, so the layout
//! of a chart can be checked without a font or an image backend.

use super::style::SeriesStyle;
use crate::metrics::{group_metric, DerivedView, SeriesPoint};

/// Share of one x tick taken by a group of bars
pub const BAR_GROUP_WIDTH: f64 = 0.8;

/// How a metric is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    /// Grouped bars, one bar per tree type at each sortedness tick
    Bar,
    /// One polyline per tree type
    Line,
    /// Line chart with the y-axis fixed to [0, 1]
    Utilization,
}

/// What to plot and where
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    /// Metric column
    pub metric: &'static str,
    /// Output file name without extension
    pub file_stem: &'static str,
    pub title: &'static str,
    pub y_label: &'static str,
    pub kind: ChartKind,
    /// Dashed horizontal reference line, e.g. 1.0 for speedups
    pub reference_line: Option<f64>,
}

impl ChartSpec {
    pub const fn new(
        metric: &'static str,
        file_stem: &'static str,
        title: &'static str,
        y_label: &'static str,
        kind: ChartKind,
    ) -> Self {
        Self {
            metric,
            file_stem,
            title,
            y_label,
            kind,
            reference_line: None,
        }
    }

    pub const fn with_reference_line(self, y: f64) -> Self {
        Self {
            reference_line: Some(y),
            ..self
        }
    }
}

/// One tree type's points in a subplot
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub tree_type: String,
    pub style: SeriesStyle,
    pub points: Vec<SeriesPoint>,
}

/// One panel of a chart, for a single read ratio
#[derive(Debug, Clone, PartialEq)]
pub struct Subplot {
    pub read_ratio: f64,
    /// Distinct sortedness percentages, ascending
    pub ticks: Vec<f64>,
    /// Series sorted by tree type
    pub series: Vec<Series>,
}

impl Subplot {
    /// Index of a sortedness value among the ticks
    pub fn tick_index(&self, sortedness_percent: f64) -> Option<usize> {
        self.ticks
            .iter()
            .position(|t| t.total_cmp(&sortedness_percent).is_eq())
    }

    /// Largest plotted value, 0 when there are none
    pub fn max_value(&self) -> f64 {
        self.series
            .iter()
            .flat_map(|s| s.points.iter().map(|p| p.value))
            .fold(0.0, f64::max)
    }

    /// Tree type labels in legend order
    pub fn legend(&self) -> Vec<&str> {
        self.series.iter().map(|s| s.tree_type.as_str()).collect()
    }
}

/// Full layout of one chart
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedChart {
    pub spec: ChartSpec,
    pub subplots: Vec<Subplot>,
}

impl GroupedChart {
    /// Partition the view by (read ratio, tree type) for one metric.
    ///
    /// Read ratios with no values for the metric get no subplot.
    pub fn build(view: &DerivedView, spec: &ChartSpec) -> Self {
        let mut subplots: Vec<Subplot> = Vec::new();

        // BTreeMap order: read ratio ascending, then tree type ascending
        for (key, points) in group_metric(view, spec.metric) {
            let read_ratio = key.read_ratio.0;
            let new_panel = subplots
                .last()
                .map_or(true, |s| s.read_ratio.total_cmp(&read_ratio).is_ne());
            if new_panel {
                subplots.push(Subplot {
                    read_ratio,
                    ticks: Vec::new(),
                    series: Vec::new(),
                });
            }
            let Some(subplot) = subplots.last_mut() else {
                continue;
            };
            let index = subplot.series.len();
            subplot.series.push(Series {
                style: SeriesStyle::for_label(&key.tree_type, index),
                tree_type: key.tree_type,
                points,
            });
        }

        for subplot in &mut subplots {
            let mut ticks: Vec<f64> = subplot
                .series
                .iter()
                .flat_map(|s| s.points.iter().map(|p| p.sortedness_percent))
                .collect();
            ticks.sort_by(|a, b| a.total_cmp(b));
            ticks.dedup_by(|a, b| a.total_cmp(b).is_eq());
            subplot.ticks = ticks;
        }

        for tree in view.tree_types() {
            for subplot in &subplots {
                if !subplot.legend().contains(&tree) {
                    tracing::debug!(
                        "{}: no {} values for {} at read ratio {}",
                        spec.file_stem,
                        spec.metric,
                        tree,
                        subplot.read_ratio
                    );
                }
            }
        }

        Self {
            spec: spec.clone(),
            subplots,
        }
    }

    /// True when no subplot has any data
    pub fn is_empty(&self) -> bool {
        self.subplots.is_empty()
    }
}

/// Horizontal extent `(left, right)` of the bar for series `series` of
/// `series_count` at tick index `tick`.
///
/// Bars at one tick are adjacent and centered on the tick.
pub fn bar_span(tick: usize, series: usize, series_count: usize) -> (f64, f64) {
    let n = series_count.max(1) as f64;
    let width = BAR_GROUP_WIDTH / n;
    let center = tick as f64 + (series as f64 - (n - 1.0) / 2.0) * width;
    (center - width / 2.0, center + width / 2.0)
}
