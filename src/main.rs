//! Tabular EDA - runs the full analysis on one remote CSV
//!
//! Usage: `tabular_eda [URL]`. Without a URL the project dataset is used.

use anyhow::Context;
use tabular_eda::{conduct_eda, load_dataset, power_analysis, split_data, SplitOptions};

const DEFAULT_DATASET_URL: &str = "https://raw.githubusercontent.com/rajivsraman/aipi510finalproject/refs/heads/main/dataset/SABRE_SHEATH_Dataset.csv";

// Power analysis inputs: medium effect (Cohen's f2), 5% significance, 80% power
const EFFECT_SIZE: f64 = 0.15;
const ALPHA: f64 = 0.05;
const POWER: f64 = 0.8;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_DATASET_URL.to_string());

    let dataset = load_dataset(&url)?;
    let (rows, cols) = dataset.shape();
    println!("Dataset shape: ({}, {})", rows, cols);

    let split = split_data(&dataset, SplitOptions::default())?;
    println!("Training features shape: {:?}", split.train_features.shape());
    println!("Test features shape: {:?}", split.test_features.shape());
    println!("Training labels shape: ({},)", split.train_labels.len());
    println!("Test labels shape: ({},)", split.test_labels.len());

    let num_predictors = cols.saturating_sub(1);
    let sample_size = power_analysis(EFFECT_SIZE, ALPHA, POWER, num_predictors)
        .with_context(|| format!("power analysis with {} predictors", num_predictors))?;
    println!("Required sample size for power analysis: {:.2}", sample_size);

    let report = conduct_eda(&dataset)?;
    log::debug!("EDA report:\n{}", report.to_json()?);

    Ok(())
}
