//! Quantile turnover and factor autocorrelation.
//!
//! Both series measure factor stability across holding horizons: turnover
//! as the fraction of entities leaving a quantile bucket, autocorrelation
//! as the rank correlation of factor values across a lag.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use conil_traits::{ASSET_COL, ConilError, DATE_COL, Date, Result};
use polars::prelude::*;

use crate::frame;
use crate::ic::spearman;

fn validate_periods(periods: &[usize]) -> Result<()> {
    if periods.is_empty() {
        return Err(ConilError::InvalidArgument(
            "periods must be a non-empty sequence".to_string(),
        ));
    }
    if periods.contains(&0) {
        return Err(ConilError::InvalidArgument(
            "periods must be positive integers".to_string(),
        ));
    }
    Ok(())
}

/// Calculate quantile-bucket turnover for every requested holding period.
///
/// For each (date, bucket, period) the turnover is the fraction of the
/// bucket's current members that were NOT members `period` dates earlier.
/// The first `period` dates of each sub-series are NaN.
///
/// # Arguments
///
/// * `df` - Factor dataset with `date`, `asset` and the quantile column
/// * `periods` - Non-empty ordered sequence of positive holding periods
/// * `quantile_col` - Factor-quantile column name
///
/// # Returns
///
/// A DataFrame ordered by (date, bucket) with the quantile column and one
/// `P{period}` column per requested period.
pub fn calc_quantile_turnover(
    df: &DataFrame,
    periods: &[usize],
    quantile_col: &str,
) -> Result<DataFrame> {
    validate_periods(periods)?;
    frame::ensure_columns(df, &[DATE_COL, ASSET_COL, quantile_col])?;

    let dates = frame::date_rows(df)?;
    let assets = frame::str_col(df, ASSET_COL)?;
    let quantiles = frame::i32_col(df, quantile_col)?;

    let index = frame::unique_sorted_dates(&dates);
    let n = index.len();
    let pos: HashMap<Date, usize> = index.iter().enumerate().map(|(i, d)| (*d, i)).collect();

    let mut members: Vec<BTreeMap<i32, HashSet<&str>>> = vec![BTreeMap::new(); n];
    for row in 0..dates.len() {
        if let Some(q) = quantiles[row] {
            members[pos[&dates[row]]]
                .entry(q)
                .or_default()
                .insert(assets[row].as_str());
        }
    }

    let buckets: BTreeSet<i32> = members.iter().flat_map(|m| m.keys().copied()).collect();

    let mut out_dates = Vec::with_capacity(n * buckets.len());
    let mut out_buckets = Vec::with_capacity(n * buckets.len());
    let mut out_turnover: Vec<Vec<f64>> = vec![Vec::with_capacity(n * buckets.len()); periods.len()];

    for (t, date) in index.iter().enumerate() {
        for q in &buckets {
            out_dates.push(*date);
            out_buckets.push(*q);
            for (p_idx, period) in periods.iter().enumerate() {
                let value = if t < *period {
                    f64::NAN
                } else {
                    match (members[t].get(q), members[t - period].get(q)) {
                        (Some(current), Some(previous)) if !current.is_empty() => {
                            let kept = current.intersection(previous).count();
                            1.0 - kept as f64 / current.len() as f64
                        }
                        _ => f64::NAN,
                    }
                };
                out_turnover[p_idx].push(value);
            }
        }
    }

    let mut columns = vec![
        frame::date_column(DATE_COL, &out_dates)?,
        Column::new(quantile_col.into(), out_buckets),
    ];
    for (p_idx, period) in periods.iter().enumerate() {
        columns.push(Column::new(
            format!("P{period}").into(),
            std::mem::take(&mut out_turnover[p_idx]),
        ));
    }

    Ok(DataFrame::new(columns)?)
}

/// Calculate factor rank autocorrelation for every requested holding period.
///
/// For each date and period the Spearman correlation between factor
/// values at that date and `period` dates earlier is computed over the
/// entities present at both dates; fewer than two common entities yields
/// NaN for that date.
///
/// # Arguments
///
/// * `df` - Factor dataset with `date`, `asset` and the factor column
/// * `factor` - Factor column name
/// * `periods` - Non-empty ordered sequence of positive lags
///
/// # Returns
///
/// A DataFrame ordered by date with one `AC{period}` column per period.
pub fn calc_auto_correlation(
    df: &DataFrame,
    factor: &str,
    periods: &[usize],
) -> Result<DataFrame> {
    validate_periods(periods)?;
    frame::ensure_columns(df, &[DATE_COL, ASSET_COL, factor])?;

    let dates = frame::date_rows(df)?;
    let assets = frame::str_col(df, ASSET_COL)?;
    let values = frame::f64_col(df, factor)?;

    let index = frame::unique_sorted_dates(&dates);
    let n = index.len();
    let pos: HashMap<Date, usize> = index.iter().enumerate().map(|(i, d)| (*d, i)).collect();

    let mut values_at: Vec<HashMap<&str, f64>> = vec![HashMap::new(); n];
    for row in 0..dates.len() {
        if let Some(v) = values[row]
            && v.is_finite()
        {
            values_at[pos[&dates[row]]].insert(assets[row].as_str(), v);
        }
    }

    let mut columns = vec![frame::date_column(DATE_COL, &index)?];
    for period in periods {
        let series: Vec<f64> = (0..n)
            .map(|t| {
                if t < *period {
                    return f64::NAN;
                }
                let (xs, ys): (Vec<f64>, Vec<f64>) = values_at[t]
                    .iter()
                    .filter_map(|(asset, &now)| {
                        values_at[t - period].get(asset).map(|&then| (then, now))
                    })
                    .unzip();
                spearman(&xs, &ys)
            })
            .collect();
        columns.push(Column::new(format!("AC{period}").into(), series));
    }

    Ok(DataFrame::new(columns)?)
}

/// Resolve the numerically maximum quantile bucket present in a turnover
/// output.
///
/// The label is taken from the data rather than assuming a canonical
/// top-bucket name, so callers get the right panel even for datasets
/// bucketed 0..k-1, 1..k, or sparsely.
pub fn max_quantile(df: &DataFrame, quantile_col: &str) -> Result<i32> {
    let quantiles = frame::i32_col(df, quantile_col)?;
    quantiles
        .into_iter()
        .flatten()
        .max()
        .ok_or_else(|| ConilError::InvalidArgument("no quantile buckets present".to_string()))
}
