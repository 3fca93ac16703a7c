//! Common types used throughout the Conil framework.
//!
//! This module defines the key column names of a factor dataset and the
//! dataset wrapper the report engine reads from.

use polars::prelude::*;

// Re-export date type from chrono
pub use chrono::NaiveDate as Date;

/// Name of the time-bucket column every factor dataset must carry.
pub const DATE_COL: &str = "date";

/// Name of the entity column every factor dataset must carry.
pub const ASSET_COL: &str = "asset";

/// Default name of the precomputed factor-quantile column.
///
/// Quantile buckets are assigned externally by ranking factor values per
/// time bucket; the report engine only consumes them. Bucket labels must
/// be integer-valued so the buckets are totally ordered.
pub const FACTOR_QUANTILE: &str = "factor_quantile";

/// Container for a factor dataset.
///
/// `FactorDataset` wraps a Polars DataFrame with one row per
/// (date, asset) pair. The report engine only ever reads the frame;
/// the caller owns it for its entire lifetime.
///
/// # Expected Schema
///
/// - `date`: trading date (Date dtype)
/// - `asset`: entity identifier
/// - one numeric factor column (caller-named)
/// - one or more numeric forward-return columns (caller-named)
/// - a discrete factor-quantile column, by default [`FACTOR_QUANTILE`]
///
/// # Example
///
/// ```no_run
/// use conil_traits::FactorDataset;
/// use polars::prelude::*;
///
/// let df = df! {
///     "asset" => &["AAPL", "MSFT"],
///     "momentum" => &[0.8, -0.2],
///     "fwd_ret_1" => &[0.01, -0.005],
/// }.unwrap();
///
/// let dataset = FactorDataset::new(df);
/// ```
#[derive(Debug, Clone)]
pub struct FactorDataset {
    /// The underlying DataFrame.
    data: DataFrame,
}

impl FactorDataset {
    /// Creates a new `FactorDataset` from a DataFrame.
    pub const fn new(data: DataFrame) -> Self {
        Self { data }
    }

    /// Returns a reference to the underlying DataFrame.
    pub const fn data(&self) -> &DataFrame {
        &self.data
    }

    /// Consumes self and returns the underlying DataFrame.
    pub fn into_inner(self) -> DataFrame {
        self.data
    }

    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.data.height()
    }

    /// Returns whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Checks if a column exists.
    ///
    /// # Arguments
    ///
    /// * `name` - The column name to check
    pub fn has_column(&self, name: &str) -> bool {
        self.data
            .get_column_names()
            .iter()
            .any(|s| s.as_str() == name)
    }
}

impl From<DataFrame> for FactorDataset {
    fn from(data: DataFrame) -> Self {
        Self::new(data)
    }
}

impl AsRef<DataFrame> for FactorDataset {
    fn as_ref(&self) -> &DataFrame {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factor_dataset_new() {
        let df = DataFrame::default();
        let dataset = FactorDataset::new(df);
        assert!(dataset.is_empty());
    }

    #[test]
    fn test_factor_dataset_from_dataframe() {
        let df = df! {
            "asset" => &["AAPL", "MSFT"],
            "momentum" => &[0.8, -0.2],
        }
        .unwrap();

        let dataset = FactorDataset::from(df);
        assert_eq!(dataset.len(), 2);
        assert!(dataset.has_column("asset"));
        assert!(dataset.has_column("momentum"));
        assert!(!dataset.has_column("value"));
    }

    #[test]
    fn test_column_constants() {
        assert_eq!(DATE_COL, "date");
        assert_eq!(ASSET_COL, "asset");
        assert_eq!(FACTOR_QUANTILE, "factor_quantile");
    }

    #[test]
    fn test_date_type() {
        use chrono::Datelike;
        let date: Date = Date::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(date.year(), 2024);
    }
}
