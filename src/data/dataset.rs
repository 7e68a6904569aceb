//! Dataset Module
//! In-memory table wrapper: rightmost column is the label, the rest are features.

use polars::prelude::*;

/// A loaded table. Read-only once created.
#[derive(Debug, Clone)]
pub struct Dataset {
    frame: DataFrame,
}

impl From<DataFrame> for Dataset {
    fn from(frame: DataFrame) -> Self {
        Self::new(frame)
    }
}

impl Dataset {
    pub fn new(frame: DataFrame) -> Self {
        Self { frame }
    }

    /// Get a reference to the underlying DataFrame.
    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        self.frame.shape()
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn width(&self) -> usize {
        self.frame.width()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0 || self.frame.width() == 0
    }

    /// Get list of column names in order.
    pub fn column_names(&self) -> Vec<String> {
        self.frame
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    /// Get list of numeric column names, in table order.
    pub fn numeric_columns(&self) -> Vec<String> {
        self.frame
            .get_columns()
            .iter()
            .filter(|col| is_numeric(col.dtype()))
            .map(|col| col.name().to_string())
            .collect()
    }

    /// Name of the label (rightmost) column.
    pub fn label_name(&self) -> Option<String> {
        self.frame
            .get_columns()
            .last()
            .map(|col| col.name().to_string())
    }

    /// All columns except the label.
    pub fn features(&self) -> PolarsResult<DataFrame> {
        match self.label_name() {
            Some(label) => self.frame.drop(&label),
            None => Ok(self.frame.clone()),
        }
    }

    /// The label column as a Series.
    pub fn label(&self) -> Option<Series> {
        self.frame
            .get_columns()
            .last()
            .map(|col| col.as_materialized_series().clone())
    }

    /// Values of a column cast to f64. Nulls stay `None`.
    pub fn numeric_values(&self, column: &str) -> PolarsResult<Vec<Option<f64>>> {
        let casted = self.frame.column(column)?.cast(&DataType::Float64)?;
        let values = casted.f64()?.into_iter().collect();
        Ok(values)
    }

    /// Count of missing cells over the whole table: nulls plus NaN floats.
    pub fn missing_count(&self) -> PolarsResult<usize> {
        let mut missing = 0;
        for col in self.frame.get_columns() {
            missing += col.null_count();
            if matches!(col.dtype(), DataType::Float32 | DataType::Float64) {
                let casted = col.cast(&DataType::Float64)?;
                missing += casted
                    .f64()?
                    .into_iter()
                    .filter(|v| v.is_some_and(f64::is_nan))
                    .count();
            }
        }
        Ok(missing)
    }
}

pub(crate) fn is_numeric(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Float32
            | DataType::Float64
            | DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        let frame = df!(
            "f1" => &[1.0, 2.0, 3.0],
            "name" => &["a", "b", "c"],
            "label" => &[0i64, 1, 0]
        )
        .unwrap();
        Dataset::new(frame)
    }

    #[test]
    fn test_label_is_rightmost_column() {
        let ds = sample();
        assert_eq!(ds.label_name().as_deref(), Some("label"));
        assert_eq!(ds.label().unwrap().len(), 3);

        let features = ds.features().unwrap();
        assert_eq!(features.width(), 2);
        assert!(features.column("label").is_err());
    }

    #[test]
    fn test_numeric_columns_skip_strings() {
        let ds = sample();
        assert_eq!(ds.numeric_columns(), vec!["f1", "label"]);
        assert_eq!(ds.column_names(), vec!["f1", "name", "label"]);
        assert_eq!(ds.shape(), (3, 3));
    }

    #[test]
    fn test_missing_count_includes_nulls_and_nan() {
        let frame = df!(
            "a" => &[Some(1.0), None, Some(f64::NAN)],
            "b" => &[Some("x"), None, Some("z")]
        )
        .unwrap();
        let ds = Dataset::new(frame);
        assert_eq!(ds.missing_count().unwrap(), 3);

        assert_eq!(sample().missing_count().unwrap(), 0);
    }

    #[test]
    fn test_numeric_values_cast_integers() {
        let ds = sample();
        let values = ds.numeric_values("label").unwrap();
        assert_eq!(values, vec![Some(0.0), Some(1.0), Some(0.0)]);
    }
}
