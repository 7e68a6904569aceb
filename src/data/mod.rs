//! Data module - remote CSV loading and train/test splitting

mod dataset;
mod loader;
mod splitter;

pub use dataset::Dataset;
pub use loader::{load_dataset, DatasetLoader, LoaderError};
pub use splitter::{split_data, Split, SplitError, SplitOptions};
