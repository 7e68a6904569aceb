//! Exploratory Data Analysis
//! Summary table, missing-value count, histogram grid and correlation heatmap.

use crate::charts::{ChartError, ChartRenderer, FigureSink, SystemViewer};
use crate::data::Dataset;
use crate::stats::{ColumnStats, CorrelationMatrix, Histogram, StatsCalculator, DEFAULT_BINS};
use polars::prelude::*;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

const SUMMARY_ROWS: [&str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

#[derive(Error, Debug)]
pub enum EdaError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Dataset has no numeric columns")]
    NoNumericColumns,
    #[error(transparent)]
    Chart(#[from] ChartError),
}

/// Rendering settings
#[derive(Debug, Clone, Copy)]
pub struct EdaOptions {
    pub histogram_bins: usize,
    pub histogram_size: (u32, u32),
    pub heatmap_size: (u32, u32),
}

impl Default for EdaOptions {
    fn default() -> Self {
        Self {
            histogram_bins: DEFAULT_BINS,
            histogram_size: (1000, 800),
            heatmap_size: (800, 700),
        }
    }
}

/// Per-column descriptive statistics, in table order.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub columns: Vec<ColumnStats>,
}

impl Summary {
    pub fn column(&self, name: &str) -> Option<&ColumnStats> {
        self.columns.iter().find(|c| c.column == name)
    }

    /// One row per statistic, one column per dataset column.
    pub fn to_frame(&self) -> PolarsResult<DataFrame> {
        let mut columns = vec![Column::new(self.header().into(), SUMMARY_ROWS.to_vec())];
        for stats in &self.columns {
            let values = vec![
                stats.count as f64,
                stats.mean,
                stats.std,
                stats.min,
                stats.p25,
                stats.median,
                stats.p75,
                stats.max,
            ];
            columns.push(Column::new(stats.column.as_str().into(), values));
        }
        DataFrame::new(columns)
    }

    /// Name of the row-label column, suffixed with `_` until it clashes with no
    /// dataset column.
    fn header(&self) -> String {
        let mut header = String::from("statistic");
        while self.columns.iter().any(|c| c.column == header) {
            header.push('_');
        }
        header
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_frame() {
            Ok(frame) => write!(f, "{}", frame),
            Err(e) => write!(f, "<summary unavailable: {}>", e),
        }
    }
}

/// Everything the EDA step computed.
#[derive(Debug, Clone, Serialize)]
pub struct EdaReport {
    pub summary: Summary,
    pub missing_values: usize,
    pub correlation: CorrelationMatrix,
}

impl EdaReport {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Run the EDA with default options and show figures in the system viewer.
pub fn conduct_eda(dataset: &Dataset) -> Result<EdaReport, EdaError> {
    conduct_eda_with(dataset, &EdaOptions::default(), &mut SystemViewer::new())
}

/// Run the EDA, sending each rendered figure to `sink`.
pub fn conduct_eda_with(
    dataset: &Dataset,
    options: &EdaOptions,
    sink: &mut dyn FigureSink,
) -> Result<EdaReport, EdaError> {
    let numeric = dataset.numeric_columns();
    if numeric.is_empty() {
        return Err(EdaError::NoNumericColumns);
    }

    let mut columns: Vec<(String, Vec<Option<f64>>)> = Vec::with_capacity(numeric.len());
    for name in numeric {
        let values = dataset.numeric_values(&name)?;
        columns.push((name, values));
    }

    let summary = summarize(&columns);
    println!("Summary:");
    println!("{}", summary);

    let missing_values = dataset.missing_count()?;
    println!("Missing Values: {}", missing_values);

    let histograms: Vec<(String, Histogram)> = columns
        .iter()
        .map(|(name, values)| {
            let present = present_values(values);
            (
                name.clone(),
                StatsCalculator::histogram(&present, options.histogram_bins),
            )
        })
        .collect();
    let figure = ChartRenderer::render_histogram_grid(&histograms, options.histogram_size)?;
    sink.show(&figure)?;

    let correlation = StatsCalculator::correlation_matrix(&columns);
    let figure = ChartRenderer::render_correlation_heatmap(&correlation, options.heatmap_size)?;
    sink.show(&figure)?;

    log::info!(
        "EDA complete: {} numeric columns, {} missing values",
        correlation.len(),
        missing_values
    );

    Ok(EdaReport {
        summary,
        missing_values,
        correlation,
    })
}

fn summarize(columns: &[(String, Vec<Option<f64>>)]) -> Summary {
    let columns = columns
        .iter()
        .map(|(name, values)| {
            let mut stats = StatsCalculator::compute_descriptive_stats(&present_values(values));
            stats.column = name.clone();
            stats
        })
        .collect();
    Summary { columns }
}

fn present_values(values: &[Option<f64>]) -> Vec<f64> {
    values
        .iter()
        .filter_map(|v| *v)
        .filter(|v| !v.is_nan())
        .collect()
}
