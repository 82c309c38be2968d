//! Report pipeline
//!
//! Load, derive, plan, render. Charts are written one after another in
//! manifest order, so the set and order of generated files only depends
//! on the input and the configuration.

use crate::config::ReportConfig;
use crate::manifest::{ChartManifest, ManifestEntry, Renderer};
use crate::metrics::{BenchmarkTable, DeriveOptions, DerivedView, Summary};
use crate::output::{CsvExporter, JsonExporter};
use crate::visualization::{GroupedChart, GroupedPlotter, UtilizationPlotter};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// One rendered chart
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedChart {
    pub file_stem: &'static str,
    /// Written files, PNG first
    pub files: Vec<PathBuf>,
}

/// Everything a run produced
#[derive(Debug, Clone, Default)]
pub struct ReportOutcome {
    pub charts: Vec<GeneratedChart>,
    pub summary_files: Vec<PathBuf>,
}

/// Runs the report for one configuration
pub struct ReportRunner<'a> {
    config: &'a ReportConfig,
    manifest: ChartManifest,
}

impl<'a> ReportRunner<'a> {
    /// Create a runner with the standard chart manifest
    pub fn new(config: &'a ReportConfig) -> Self {
        Self::with_manifest(config, ChartManifest::standard())
    }

    pub fn with_manifest(config: &'a ReportConfig, manifest: ChartManifest) -> Self {
        Self { config, manifest }
    }

    /// Load the input and derive the display columns
    pub fn prepare(&self) -> Result<DerivedView> {
        self.config.validate()?;
        let table = BenchmarkTable::from_path(self.config.input())?;
        Ok(DerivedView::new(&table, &DeriveOptions::from(self.config)))
    }

    /// Run the whole pipeline.
    ///
    /// `on_chart` is called after each chart is written.
    pub fn run(&self, mut on_chart: impl FnMut(&GeneratedChart)) -> Result<ReportOutcome> {
        let view = self.prepare()?;
        let plan = self.manifest.plan(&view)?;
        tracing::info!("Planned {} charts", plan.len());

        std::fs::create_dir_all(&self.config.output_dir).with_context(|| {
            format!(
                "Failed to create output directory: {}",
                self.config.output_dir.display()
            )
        })?;

        let mut outcome = ReportOutcome::default();
        for entry in plan {
            if let Some(chart) = self.render(&view, entry)? {
                on_chart(&chart);
                outcome.charts.push(chart);
            }
        }

        if self.config.summary {
            outcome.summary_files = self.export_summary(&view)?;
        }

        Ok(outcome)
    }

    fn render(&self, view: &DerivedView, entry: &ManifestEntry) -> Result<Option<GeneratedChart>> {
        let spec = entry.renderer.spec();
        let base = self.config.output_path(spec.file_stem);
        let vector = self.config.vector_output;

        let files = match &entry.renderer {
            Renderer::Grouped(spec) => {
                let chart = GroupedChart::build(view, spec);
                if chart.is_empty() {
                    None
                } else {
                    Some(GroupedPlotter::render(&chart, &base, vector)?)
                }
            }
            Renderer::Utilization => UtilizationPlotter::render(view, &base, vector)?,
        };

        let Some(files) = files else {
            tracing::info!("Skipping {}: no {} values", spec.file_stem, spec.metric);
            return Ok(None);
        };
        tracing::debug!("Rendered {} to {} files", spec.file_stem, files.len());

        Ok(Some(GeneratedChart {
            file_stem: spec.file_stem,
            files,
        }))
    }

    fn export_summary(&self, view: &DerivedView) -> Result<Vec<PathBuf>> {
        let summary = Summary::from_view(view);

        let csv_path = self.config.output_path("summary.csv");
        CsvExporter::export_summary(&summary, &csv_path)
            .with_context(|| format!("Failed to export CSV summary to: {}", csv_path.display()))?;

        let json_path = self.config.output_path("summary.json");
        JsonExporter::export_summary(&summary, &json_path)
            .with_context(|| format!("Failed to export JSON summary to: {}", json_path.display()))?;

        Ok(vec![csv_path, json_path])
    }
}
