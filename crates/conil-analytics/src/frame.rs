//! Column extraction helpers for factor datasets.
//!
//! The transforms in this crate read Polars columns into plain vectors,
//! compute in Rust, and reassemble DataFrames from the results. These
//! helpers centralize the extraction and the date conversions.

use chrono::Datelike;
use conil_traits::{ConilError, DATE_COL, Date, Result};
use polars::prelude::*;

/// Days from the common era to the Unix epoch, the offset between
/// `chrono` day counts and the Polars Date representation.
const EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Fails with [`ConilError::MissingColumn`] if any named column is absent.
pub fn ensure_columns(df: &DataFrame, names: &[&str]) -> Result<()> {
    for name in names {
        if !df.get_column_names().iter().any(|s| s.as_str() == *name) {
            return Err(ConilError::MissingColumn((*name).to_string()));
        }
    }
    Ok(())
}

/// Reads the per-row dates of the `date` column.
///
/// The column must have the Date dtype and contain no nulls.
pub fn date_rows(df: &DataFrame) -> Result<Vec<Date>> {
    ensure_columns(df, &[DATE_COL])?;
    let series = df.column(DATE_COL)?.as_materialized_series();
    let dates = series.date().map_err(|_| {
        ConilError::InvalidArgument(format!("column '{DATE_COL}' must have Date dtype"))
    })?;

    dates
        .into_iter()
        .map(|d| {
            d.map(days_to_date).ok_or_else(|| {
                ConilError::InvalidArgument(format!("column '{DATE_COL}' contains nulls"))
            })
        })
        .collect()
}

/// Reads a numeric column as `Vec<Option<f64>>`, casting if needed.
pub fn f64_col(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let series = df
        .column(name)
        .map_err(|_| ConilError::MissingColumn(name.to_string()))?
        .as_materialized_series()
        .cast(&DataType::Float64)?;
    Ok(series.f64()?.into_iter().collect())
}

/// Reads a string column as owned `Vec<String>`; nulls become empty strings.
pub fn str_col(df: &DataFrame, name: &str) -> Result<Vec<String>> {
    let column = df
        .column(name)
        .map_err(|_| ConilError::MissingColumn(name.to_string()))?;
    Ok(column
        .as_materialized_series()
        .str()?
        .into_iter()
        .map(|s| s.unwrap_or_default().to_string())
        .collect())
}

/// Reads a discrete bucket column as `Vec<Option<i32>>`, casting if needed.
///
/// Quantile bucket labels must be integer-valued so buckets are totally
/// ordered; non-castable columns fail here.
pub fn i32_col(df: &DataFrame, name: &str) -> Result<Vec<Option<i32>>> {
    let series = df
        .column(name)
        .map_err(|_| ConilError::MissingColumn(name.to_string()))?
        .as_materialized_series();
    // Non-strict casts turn non-numeric labels into nulls; require a
    // numeric dtype up front so bad bucket columns fail loudly.
    if !(series.dtype().is_integer() || series.dtype().is_float()) {
        return Err(ConilError::InvalidArgument(format!(
            "column '{name}' must hold integer bucket labels, got dtype {}",
            series.dtype()
        )));
    }
    let cast = series.cast(&DataType::Int32).map_err(|_| {
        ConilError::InvalidArgument(format!("column '{name}' must hold integer bucket labels"))
    })?;
    Ok(cast.i32()?.into_iter().collect())
}

/// Deduplicates and sorts a list of per-row dates into a time index.
pub fn unique_sorted_dates(dates: &[Date]) -> Vec<Date> {
    let mut index = dates.to_vec();
    index.sort();
    index.dedup();
    index
}

/// Builds a Date-typed column from a slice of dates.
pub fn date_column(name: &str, dates: &[Date]) -> Result<Column> {
    let days: Vec<i32> = dates.iter().map(|d| date_to_days(*d)).collect();
    let series = Series::new(name.into(), days).cast(&DataType::Date)?;
    Ok(series.into_column())
}

/// Converts a Polars day count into a calendar date.
pub fn days_to_date(days: i32) -> Date {
    // Out-of-range day counts clamp to the Unix epoch.
    Date::from_num_days_from_ce_opt(days + EPOCH_DAYS_FROM_CE).unwrap_or_default()
}

/// Converts a calendar date into a Polars day count.
pub fn date_to_days(date: Date) -> i32 {
    date.num_days_from_ce() - EPOCH_DAYS_FROM_CE
}
