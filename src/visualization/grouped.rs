//! Grouped bar and line charts, one panel per read ratio

use super::layout::{bar_span, ChartKind, ChartSpec, GroupedChart, Subplot};
use super::style::{Marker, SeriesStyle};
use super::utilization;
use anyhow::Result;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::ops::Range;
use std::path::{Path, PathBuf};

const PANEL_SIZE: (u32, u32) = (1200, 800);
const TITLE_FONT_SIZE: u32 = 40;
const CAPTION_FONT_SIZE: u32 = 28;
const LEGEND_FONT_SIZE: u32 = 20;
const AXIS_FONT_SIZE: u32 = 16;
const MARKER_SIZE: i32 = 5;
const DASH_COUNT: usize = 25;
/// Room above the tallest value for the legend
const Y_HEADROOM: f64 = 1.3;

/// Sortedness axis for line charts, in percent
const SORTEDNESS_RANGE: Range<f64> = -5.0..105.0;

pub struct GroupedPlotter;

impl GroupedPlotter {
    /// Write `<base>.png`, and `<base>.svg` when `vector` is set.
    ///
    /// Returns the written paths, PNG first.
    pub fn render(chart: &GroupedChart, base: &Path, vector: bool) -> Result<Vec<PathBuf>> {
        let png = base.with_extension("png");
        Self::plot(chart, &png)?;
        let mut written = vec![png];

        if vector {
            let svg = base.with_extension("svg");
            Self::plot_svg(chart, &svg)?;
            written.push(svg);
        }
        Ok(written)
    }

    /// Render the chart to a PNG file
    pub fn plot(chart: &GroupedChart, path: &Path) -> Result<()> {
        let root = BitMapBackend::new(path, Self::canvas_size(chart)).into_drawing_area();
        Self::draw(&root, chart)?;
        root.present()?;
        Ok(())
    }

    /// Render the chart to an SVG file
    pub fn plot_svg(chart: &GroupedChart, path: &Path) -> Result<()> {
        let root = SVGBackend::new(path, Self::canvas_size(chart)).into_drawing_area();
        Self::draw(&root, chart)?;
        root.present()?;
        Ok(())
    }

    /// One panel width per subplot
    pub fn canvas_size(chart: &GroupedChart) -> (u32, u32) {
        let panels = chart.subplots.len().max(1) as u32;
        (PANEL_SIZE.0 * panels, PANEL_SIZE.1)
    }

    fn draw<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, chart: &GroupedChart) -> Result<()>
    where
        DB::ErrorType: 'static,
    {
        root.fill(&WHITE)?;
        if chart.is_empty() {
            return Ok(());
        }

        let body = root.titled(chart.spec.title, ("sans-serif", TITLE_FONT_SIZE))?;
        let panels = body.split_evenly((1, chart.subplots.len()));

        for (panel, subplot) in panels.iter().zip(&chart.subplots) {
            match chart.spec.kind {
                ChartKind::Bar => Self::draw_bars(panel, &chart.spec, subplot)?,
                ChartKind::Line | ChartKind::Utilization => {
                    Self::draw_lines(panel, &chart.spec, subplot)?
                }
            }
        }
        Ok(())
    }

    fn draw_bars<DB: DrawingBackend>(
        area: &DrawingArea<DB, Shift>,
        spec: &ChartSpec,
        subplot: &Subplot,
    ) -> Result<()>
    where
        DB::ErrorType: 'static,
    {
        let num_ticks = subplot.ticks.len();
        let x_range = -0.5..(num_ticks as f64 - 0.5);

        let mut chart = ChartBuilder::on(area)
            .caption(panel_caption(subplot), ("sans-serif", CAPTION_FONT_SIZE))
            .margin(15)
            .x_label_area_size(50)
            .y_label_area_size(70)
            .build_cartesian_2d(x_range.clone(), y_range(spec, subplot))?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(num_ticks)
            .x_label_formatter(&|x| {
                let idx = x.round();
                if idx >= 0.0 && (x - idx).abs() < 0.3 {
                    subplot
                        .ticks
                        .get(idx as usize)
                        .map(|t| format!("{:.0}", t))
                        .unwrap_or_default()
                } else {
                    String::new()
                }
            })
            .x_desc("Sortedness (%)")
            .y_desc(spec.y_label)
            .label_style(("sans-serif", AXIS_FONT_SIZE))
            .draw()?;

        let count = subplot.series.len();
        for (idx, series) in subplot.series.iter().enumerate() {
            let style = bar_style(&series.style);
            let bars = series.points.iter().filter_map(|p| {
                let tick = subplot.tick_index(p.sortedness_percent)?;
                let (left, right) = bar_span(tick, idx, count);
                Some(Rectangle::new([(left, 0.0), (right, p.value)], style))
            });

            chart
                .draw_series(bars)?
                .label(series.tree_type.as_str())
                .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 20, y + 5)], style));
        }

        if let Some(y) = spec.reference_line {
            chart.draw_series(dashes(x_range, y))?;
        }

        draw_legend(&mut chart)
    }

    fn draw_lines<DB: DrawingBackend>(
        area: &DrawingArea<DB, Shift>,
        spec: &ChartSpec,
        subplot: &Subplot,
    ) -> Result<()>
    where
        DB::ErrorType: 'static,
    {
        let mut chart = ChartBuilder::on(area)
            .caption(panel_caption(subplot), ("sans-serif", CAPTION_FONT_SIZE))
            .margin(15)
            .x_label_area_size(50)
            .y_label_area_size(70)
            .build_cartesian_2d(SORTEDNESS_RANGE, y_range(spec, subplot))?;

        chart
            .configure_mesh()
            .x_desc("Sortedness (%)")
            .y_desc(spec.y_label)
            .x_label_formatter(&|x| format!("{:.0}", x))
            .y_label_formatter(&|y| format!("{:.2}", y))
            .label_style(("sans-serif", AXIS_FONT_SIZE))
            .draw()?;

        for series in &subplot.series {
            let color = series.style.color;
            let points: Vec<(f64, f64)> = series
                .points
                .iter()
                .map(|p| (p.sortedness_percent, p.value))
                .collect();

            chart
                .draw_series(LineSeries::new(points.clone(), color.stroke_width(2)))?
                .label(series.tree_type.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));

            let points = points.into_iter();
            match series.style.marker {
                Marker::Circle => {
                    chart.draw_series(points.map(|c| Circle::new(c, MARKER_SIZE, color.filled())))?;
                }
                Marker::Square => {
                    chart.draw_series(points.map(|c| {
                        EmptyElement::at(c)
                            + Rectangle::new(
                                [(-MARKER_SIZE, -MARKER_SIZE), (MARKER_SIZE, MARKER_SIZE)],
                                color.filled(),
                            )
                    }))?;
                }
                Marker::Triangle => {
                    chart.draw_series(
                        points.map(|c| TriangleMarker::new(c, MARKER_SIZE + 1, color.filled())),
                    )?;
                }
                Marker::Cross => {
                    chart.draw_series(
                        points.map(|c| Cross::new(c, MARKER_SIZE, color.stroke_width(2))),
                    )?;
                }
            }
        }

        if let Some(y) = spec.reference_line {
            chart.draw_series(dashes(SORTEDNESS_RANGE, y))?;
        }

        draw_legend(&mut chart)
    }
}

fn draw_legend<'a, DB: DrawingBackend + 'a>(
    chart: &mut ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font(("sans-serif", LEGEND_FONT_SIZE))
        .draw()?;
    Ok(())
}

fn panel_caption(subplot: &Subplot) -> String {
    format!("Read ratio {:.2}", subplot.read_ratio)
}

fn bar_style(style: &SeriesStyle) -> ShapeStyle {
    if style.hollow {
        style.color.stroke_width(3)
    } else {
        style.color.filled()
    }
}

/// Y-axis range: fixed for utilization, otherwise from 0 to the largest
/// value (or the reference line) plus headroom for the legend
fn y_range(spec: &ChartSpec, subplot: &Subplot) -> Range<f64> {
    if spec.kind == ChartKind::Utilization {
        return utilization::Y_RANGE;
    }
    let top = subplot
        .max_value()
        .max(spec.reference_line.unwrap_or(0.0));
    if top > 0.0 {
        0.0..top * Y_HEADROOM
    } else {
        0.0..1.0
    }
}

/// Dashed horizontal line across `x`, as short path segments
fn dashes(x: Range<f64>, y: f64) -> impl Iterator<Item = PathElement<(f64, f64)>> {
    let start = x.start;
    let dash = (x.end - x.start) / (2 * DASH_COUNT) as f64;
    let style = BLACK.mix(0.7).stroke_width(1);
    (0..DASH_COUNT).map(move |i| {
        let left = start + 2.0 * dash * i as f64;
        PathElement::new(vec![(left, y), (left + dash, y)], style)
    })
}
