//! Statistics module - Descriptive statistics, correlation and power analysis

mod calculator;
mod power;

pub use calculator::{ColumnStats, CorrelationMatrix, Histogram, StatsCalculator, DEFAULT_BINS};
pub use power::{cohens_f2_from_r2, power_analysis, FTestPower, PowerError};
