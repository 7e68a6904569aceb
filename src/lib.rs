//! Tabular EDA - remote CSV exploratory analysis helper
//!
//! Loads a single CSV dataset over HTTP(S) and runs the usual first-pass
//! analysis steps on it. Each step is an independent function:
//!
//! - [`load_dataset`]: fetch and parse the CSV into a [`Dataset`]
//! - [`split_data`]: features/label split plus a seeded train/test partition
//! - [`power_analysis`]: minimum sample size for a regression F-test
//! - [`conduct_eda`]: summary table, missing-value count, histograms and a
//!   correlation heatmap

pub mod charts;
pub mod data;
pub mod eda;
pub mod stats;

pub use charts::{ChartError, Figure, FigureCollector, FigureSink, SystemViewer};
pub use data::{load_dataset, split_data, Dataset, DatasetLoader, LoaderError, Split, SplitError, SplitOptions};
pub use eda::{conduct_eda, conduct_eda_with, EdaError, EdaOptions, EdaReport, Summary};
pub use stats::{power_analysis, ColumnStats, CorrelationMatrix, FTestPower, PowerError};

/// Result type for this library
pub type Result<T> = std::result::Result<T, Error>;

/// Library error type
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Load(#[from] LoaderError),

    #[error(transparent)]
    Split(#[from] SplitError),

    #[error(transparent)]
    Power(#[from] PowerError),

    #[error(transparent)]
    Eda(#[from] EdaError),
}
