//! Static Chart Renderer
//! Draws EDA figures with plotters into in-memory SVG documents.
//!
//! Figures:
//! 1. Histogram grid: one panel per numeric column, ceil(sqrt(n)) panels per row
//! 2. Correlation heatmap: coolwarm cells over [-1, 1], annotated with 2 decimals

use super::{ChartError, Figure};
use crate::stats::{CorrelationMatrix, Histogram};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

// Colors
const BAR_FILL: RGBColor = RGBColor(91, 155, 213);
const BAR_EDGE: RGBColor = RGBColor(47, 85, 151);
const NAN_CELL: RGBColor = RGBColor(200, 200, 200);

// Coolwarm anchors at -1, 0 and 1
const COOL: (f64, f64, f64) = (59.0, 76.0, 192.0);
const NEUTRAL: (f64, f64, f64) = (221.0, 221.0, 221.0);
const WARM: (f64, f64, f64) = (180.0, 4.0, 38.0);

pub const HISTOGRAM_TITLE: &str = "Histograms";
pub const HEATMAP_TITLE: &str = "Correlation Heatmap";

fn render_err<E: std::fmt::Display>(e: E) -> ChartError {
    ChartError::Render(e.to_string())
}

pub struct ChartRenderer;

impl ChartRenderer {
    /// Grid of histograms, one panel per `(column name, histogram)` pair.
    pub fn render_histogram_grid(
        histograms: &[(String, Histogram)],
        size: (u32, u32),
    ) -> Result<Figure, ChartError> {
        if histograms.is_empty() {
            return Err(ChartError::NothingToDraw);
        }

        let (rows, cols) = Self::grid_shape(histograms.len());
        log::debug!(
            "Rendering {} histograms in a {}x{} grid at {}x{}",
            histograms.len(),
            rows,
            cols,
            size.0,
            size.1
        );

        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
            root.fill(&WHITE).map_err(render_err)?;

            let panels = root.split_evenly((rows, cols));
            for (panel, (name, hist)) in panels.iter().zip(histograms) {
                Self::draw_histogram_panel(panel, name, hist)?;
            }

            root.present().map_err(render_err)?;
        }

        Ok(Figure {
            title: HISTOGRAM_TITLE.to_string(),
            svg,
        })
    }

    fn draw_histogram_panel<DB: DrawingBackend>(
        area: &DrawingArea<DB, plotters::coord::Shift>,
        name: &str,
        hist: &Histogram,
    ) -> Result<(), ChartError> {
        let x_min = hist.edges.first().copied().unwrap_or(0.0);
        let x_max = hist.edges.last().copied().unwrap_or(1.0);
        let y_max = hist.counts.iter().copied().max().unwrap_or(0).max(1) as f64 * 1.05;

        let mut chart = ChartBuilder::on(area)
            .caption(name, ("sans-serif", 14))
            .margin(8)
            .x_label_area_size(22)
            .y_label_area_size(34)
            .build_cartesian_2d(x_min..x_max, 0.0..y_max)
            .map_err(render_err)?;

        chart
            .configure_mesh()
            .x_labels(5)
            .y_labels(5)
            .label_style(("sans-serif", 10))
            .draw()
            .map_err(render_err)?;

        let bars = hist
            .counts
            .iter()
            .zip(hist.edges.windows(2))
            .map(|(&count, edge)| (edge[0], edge[1], count as f64));

        chart
            .draw_series(
                bars.clone()
                    .map(|(x0, x1, c)| Rectangle::new([(x0, 0.0), (x1, c)], BAR_FILL.filled())),
            )
            .map_err(render_err)?;
        chart
            .draw_series(bars.map(|(x0, x1, c)| {
                Rectangle::new([(x0, 0.0), (x1, c)], BAR_EDGE.stroke_width(1))
            }))
            .map_err(render_err)?;

        Ok(())
    }

    /// Annotated correlation heatmap. Row 0 is drawn at the top.
    pub fn render_correlation_heatmap(
        matrix: &CorrelationMatrix,
        size: (u32, u32),
    ) -> Result<Figure, ChartError> {
        if matrix.is_empty() {
            return Err(ChartError::NothingToDraw);
        }
        let n = matrix.len();
        let names = &matrix.columns;
        let extent = n as f64;

        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
            root.fill(&WHITE).map_err(render_err)?;

            // Unit cells on [0, n] x [0, n]; names are drawn at cell centres below.
            let mut chart = ChartBuilder::on(&root)
                .caption(HEATMAP_TITLE, ("sans-serif", 22))
                .margin(16)
                .x_label_area_size(60)
                .y_label_area_size(110)
                .build_cartesian_2d(0.0..extent, 0.0..extent)
                .map_err(render_err)?;

            let cells = Self::heatmap_cells(matrix);

            chart
                .draw_series(cells.iter().map(|&(x, y, value)| {
                    Rectangle::new([(x, y), (x + 1.0, y + 1.0)], Self::coolwarm(value).filled())
                }))
                .map_err(render_err)?;

            chart
                .draw_series(cells.iter().map(|&(x, y, value)| {
                    let color = if value.abs() > 0.6 { WHITE } else { BLACK };
                    let style = ("sans-serif", 13)
                        .into_font()
                        .color(&color)
                        .pos(Pos::new(HPos::Center, VPos::Center));
                    Text::new(Self::annotation(value), (x + 0.5, y + 0.5), style)
                }))
                .map_err(render_err)?;

            for (i, name) in names.iter().enumerate() {
                let centre = i as f64 + 0.5;

                let (px, py) = chart.backend_coord(&(centre, 0.0));
                let below = ("sans-serif", 12)
                    .into_font()
                    .color(&BLACK)
                    .pos(Pos::new(HPos::Center, VPos::Top));
                root.draw(&Text::new(name.clone(), (px, py + 8), below))
                    .map_err(render_err)?;

                let (px, py) = chart.backend_coord(&(0.0, extent - centre));
                let left = ("sans-serif", 12)
                    .into_font()
                    .color(&BLACK)
                    .pos(Pos::new(HPos::Right, VPos::Center));
                root.draw(&Text::new(name.clone(), (px - 8, py), left))
                    .map_err(render_err)?;
            }

            root.present().map_err(render_err)?;
        }

        Ok(Figure {
            title: HEATMAP_TITLE.to_string(),
            svg,
        })
    }

    /// (rows, cols) for `n` panels with ceil(sqrt(n)) columns.
    pub fn grid_shape(n: usize) -> (usize, usize) {
        let cols = ((n as f64).sqrt().ceil() as usize).max(1);
        let rows = n.div_ceil(cols).max(1);
        (rows, cols)
    }

    /// Two-decimal cell text; undefined correlations read "nan".
    pub fn annotation(value: f64) -> String {
        if value.is_nan() {
            "nan".to_string()
        } else {
            format!("{:.2}", value)
        }
    }

    /// Diverging blue-grey-red scale over [-1, 1].
    pub fn coolwarm(value: f64) -> RGBColor {
        if value.is_nan() {
            return NAN_CELL;
        }
        let v = value.clamp(-1.0, 1.0);
        let (from, to, t) = if v < 0.0 {
            (COOL, NEUTRAL, v + 1.0)
        } else {
            (NEUTRAL, WARM, v)
        };
        let lerp = |a: f64, b: f64| (a + (b - a) * t).round() as u8;
        RGBColor(lerp(from.0, to.0), lerp(from.1, to.1), lerp(from.2, to.2))
    }

    /// `(x, y, value)` per cell, where `(x, y)` is the lower-left corner of a
    /// unit square. Row 0 lands on the top row.
    pub fn heatmap_cells(matrix: &CorrelationMatrix) -> Vec<(f64, f64, f64)> {
        let n = matrix.len();
        (0..n)
            .flat_map(|row| (0..n).map(move |col| (row, col)))
            .map(|(row, col)| {
                let value = matrix.get(row, col).unwrap_or(f64::NAN);
                (col as f64, (n - 1 - row) as f64, value)
            })
            .collect()
    }
}
