//! CSV Data Loader Module
//! Fetches a raw CSV over HTTP(S) and parses it with Polars.

use super::Dataset;
use polars::prelude::*;
use std::io::Cursor;
use thiserror::Error;

/// Rows scanned when inferring column types.
const INFER_SCHEMA_LENGTH: usize = 10_000;

/// Any failure between issuing the request and holding a parsed table.
#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Error loading dataset: request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Error loading dataset: server responded with HTTP {0}")]
    Status(reqwest::StatusCode),
    #[error("Error loading dataset: failed to parse CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("Error loading dataset: no rows or columns in response")]
    EmptyDataset,
}

/// Fetch `url` and parse it into a [`Dataset`] with a default loader.
pub fn load_dataset(url: &str) -> Result<Dataset, LoaderError> {
    DatasetLoader::new().fetch(url)
}

/// Blocking HTTP fetch + CSV parse.
pub struct DatasetLoader {
    client: reqwest::blocking::Client,
    infer_schema_length: usize,
}

impl Default for DatasetLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetLoader {
    pub fn new() -> Self {
        Self::with_client(reqwest::blocking::Client::new())
    }

    pub fn with_client(client: reqwest::blocking::Client) -> Self {
        Self {
            client,
            infer_schema_length: INFER_SCHEMA_LENGTH,
        }
    }

    /// Fetch a CSV resource and parse it. Nothing is returned unless the
    /// whole body parsed into a non-empty table.
    pub fn fetch(&self, url: &str) -> Result<Dataset, LoaderError> {
        println!("Fetching dataset from: {}", url);

        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(LoaderError::Status(status));
        }
        let body = response.bytes()?;
        log::debug!("Received {} bytes from {}", body.len(), url);

        let dataset = self.parse_csv(body.to_vec())?;
        println!("Dataset loaded!");
        log::info!(
            "Loaded dataset with {} rows x {} columns",
            dataset.height(),
            dataset.width()
        );
        Ok(dataset)
    }

    /// Parse an in-memory CSV body. The first line must be the header.
    pub fn parse_csv(&self, bytes: Vec<u8>) -> Result<Dataset, LoaderError> {
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(self.infer_schema_length))
            .into_reader_with_file_handle(Cursor::new(bytes))
            .finish()?;

        let dataset = Dataset::new(df);
        if dataset.is_empty() {
            return Err(LoaderError::EmptyDataset);
        }
        Ok(dataset)
    }
}
