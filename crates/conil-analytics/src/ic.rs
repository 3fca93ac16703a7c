//! Information Coefficient (IC) calculations.
//!
//! IC measures the Spearman rank correlation between factor values and
//! forward returns within one time bucket. The per-date IC series is the
//! primary input of the report sheets.

use std::collections::HashMap;

use conil_traits::{DATE_COL, Result};
use polars::prelude::*;

use crate::frame;

/// Calculate the per-date IC series for every (factor, forward-return) pair.
///
/// For each time bucket the cross-sectional Spearman rank correlation
/// between factor values and forward returns is computed. Rows with a
/// missing factor value or forward return are excluded from that bucket
/// only; a bucket with fewer than two usable rows yields NaN rather than
/// failing the whole call.
///
/// # Arguments
///
/// * `df` - Factor dataset with `date` plus the named columns
/// * `factors` - Factor column names
/// * `forward_returns` - Forward-return column names
///
/// # Returns
///
/// A DataFrame ordered by date with one row per time bucket and one
/// `{factor}__{forward_return}` column per pair.
///
/// # Errors
///
/// Fails with `ConilError::MissingColumn` if any named column is absent.
pub fn calc_ic(df: &DataFrame, factors: &[&str], forward_returns: &[&str]) -> Result<DataFrame> {
    let mut required = vec![DATE_COL];
    required.extend_from_slice(factors);
    required.extend_from_slice(forward_returns);
    frame::ensure_columns(df, &required)?;

    let dates = frame::date_rows(df)?;
    let index = frame::unique_sorted_dates(&dates);
    let pos: HashMap<_, _> = index.iter().enumerate().map(|(i, d)| (*d, i)).collect();

    // Row indices grouped per time bucket.
    let mut groups: Vec<Vec<usize>> = vec![Vec::new(); index.len()];
    for (row, date) in dates.iter().enumerate() {
        groups[pos[date]].push(row);
    }

    let factor_values: Vec<(&str, Vec<Option<f64>>)> = factors
        .iter()
        .map(|name| frame::f64_col(df, name).map(|v| (*name, v)))
        .collect::<Result<_>>()?;
    let return_values: Vec<(&str, Vec<Option<f64>>)> = forward_returns
        .iter()
        .map(|name| frame::f64_col(df, name).map(|v| (*name, v)))
        .collect::<Result<_>>()?;

    let mut columns = vec![frame::date_column(DATE_COL, &index)?];
    for (factor, fv) in &factor_values {
        for (fwd_ret, rv) in &return_values {
            let ics: Vec<f64> = groups
                .iter()
                .map(|rows| {
                    let (xs, ys): (Vec<f64>, Vec<f64>) = rows
                        .iter()
                        .filter_map(|&r| match (fv[r], rv[r]) {
                            (Some(x), Some(y)) if x.is_finite() && y.is_finite() => Some((x, y)),
                            _ => None,
                        })
                        .unzip();
                    spearman(&xs, &ys)
                })
                .collect();
            columns.push(Column::new(format!("{factor}__{fwd_ret}").into(), ics));
        }
    }

    Ok(DataFrame::new(columns)?)
}

/// Spearman rank correlation between two paired samples.
///
/// Non-finite pairs are excluded; fewer than two usable pairs, or zero
/// variance in either sample, yields NaN.
pub fn spearman(xs: &[f64], ys: &[f64]) -> f64 {
    if xs.len() != ys.len() {
        return f64::NAN;
    }

    let pairs: Vec<(f64, f64)> = xs
        .iter()
        .zip(ys.iter())
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .map(|(&x, &y)| (x, y))
        .collect();

    if pairs.len() < 2 {
        return f64::NAN;
    }

    let x_ranks = compute_ranks(&pairs.iter().map(|(x, _)| *x).collect::<Vec<_>>());
    let y_ranks = compute_ranks(&pairs.iter().map(|(_, y)| *y).collect::<Vec<_>>());

    rank_correlation(&x_ranks, &y_ranks)
}

/// Compute ranks of values (handling ties with average rank).
fn compute_ranks(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    let mut indexed: Vec<(usize, f64)> = values.iter().enumerate().map(|(i, &v)| (i, v)).collect();

    indexed.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

    let mut ranks = vec![0.0; n];
    let mut i = 0;

    while i < n {
        let mut j = i;
        // Find ties
        while j < n && (indexed[j].1 - indexed[i].1).abs() < f64::EPSILON {
            j += 1;
        }

        // Average rank for ties
        let avg_rank = (i + j - 1) as f64 / 2.0;
        for k in i..j {
            ranks[indexed[k].0] = avg_rank;
        }

        i = j;
    }

    ranks
}

/// Pearson correlation of two rank vectors.
fn rank_correlation(ranks_x: &[f64], ranks_y: &[f64]) -> f64 {
    let n = ranks_x.len() as f64;

    if n < 2.0 {
        return f64::NAN;
    }

    let mean_x: f64 = ranks_x.iter().sum::<f64>() / n;
    let mean_y: f64 = ranks_y.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;

    for i in 0..n as usize {
        let dx = ranks_x[i] - mean_x;
        let dy = ranks_y[i] - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return f64::NAN;
    }

    cov / (var_x.sqrt() * var_y.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use conil_traits::{ConilError, Date};

    fn d(day: u32) -> Date {
        Date::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn sample_df() -> DataFrame {
        // Two dates, three assets each. Factor and return perfectly
        // aligned on the first date, inverted on the second.
        let dates = vec![d(2), d(2), d(2), d(3), d(3), d(3)];
        DataFrame::new(vec![
            frame::date_column(DATE_COL, &dates).unwrap(),
            Column::new("asset".into(), &["A", "B", "C", "A", "B", "C"]),
            Column::new("alpha".into(), &[1.0, 2.0, 3.0, 1.0, 2.0, 3.0]),
            Column::new("fwd_ret_1".into(), &[0.01, 0.02, 0.03, 0.03, 0.02, 0.01]),
        ])
        .unwrap()
    }

    #[test]
    fn test_calc_ic_values() {
        let df_ic = calc_ic(&sample_df(), &["alpha"], &["fwd_ret_1"]).unwrap();
        assert_eq!(df_ic.height(), 2);

        let ics: Vec<f64> = df_ic
            .column("alpha__fwd_ret_1")
            .unwrap()
            .as_materialized_series()
            .f64()
            .unwrap()
            .into_iter()
            .flatten()
            .collect();
        assert!((ics[0] - 1.0).abs() < 1e-10);
        assert!((ics[1] + 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_calc_ic_missing_column() {
        let err = calc_ic(&sample_df(), &["alpha"], &["fwd_ret_5"]).unwrap_err();
        assert!(matches!(err, ConilError::MissingColumn(name) if name == "fwd_ret_5"));
    }

    #[test]
    fn test_calc_ic_small_bucket_is_nan() {
        // One asset on the second date: correlation undefined, not an error.
        let dates = vec![d(2), d(2), d(3)];
        let df = DataFrame::new(vec![
            frame::date_column(DATE_COL, &dates).unwrap(),
            Column::new("asset".into(), &["A", "B", "A"]),
            Column::new("alpha".into(), &[1.0, 2.0, 1.0]),
            Column::new("fwd_ret_1".into(), &[0.01, 0.02, 0.01]),
        ])
        .unwrap();

        let df_ic = calc_ic(&df, &["alpha"], &["fwd_ret_1"]).unwrap();
        assert_eq!(df_ic.height(), 2);

        let ics: Vec<Option<f64>> = df_ic
            .column("alpha__fwd_ret_1")
            .unwrap()
            .as_materialized_series()
            .f64()
            .unwrap()
            .into_iter()
            .collect();
        assert!(ics[1].unwrap().is_nan());
    }

    #[test]
    fn test_calc_ic_tolerates_missing_returns() {
        let dates = vec![d(2), d(2), d(2)];
        let df = DataFrame::new(vec![
            frame::date_column(DATE_COL, &dates).unwrap(),
            Column::new("asset".into(), &["A", "B", "C"]),
            Column::new("alpha".into(), &[1.0, 2.0, 3.0]),
            Column::new("fwd_ret_1".into(), &[Some(0.01), None, Some(0.03)]),
        ])
        .unwrap();

        let df_ic = calc_ic(&df, &["alpha"], &["fwd_ret_1"]).unwrap();
        let ic = df_ic
            .column("alpha__fwd_ret_1")
            .unwrap()
            .as_materialized_series()
            .f64()
            .unwrap()
            .get(0)
            .unwrap();
        assert!((ic - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_spearman_perfect_correlation() {
        let xs = [1.0, 2.0, 3.0, 4.0, 5.0];
        let ys = [0.01, 0.02, 0.03, 0.04, 0.05];
        assert!((spearman(&xs, &ys) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_spearman_negative_correlation() {
        let xs = [5.0, 4.0, 3.0, 2.0, 1.0];
        let ys = [0.01, 0.02, 0.03, 0.04, 0.05];
        assert!((spearman(&xs, &ys) + 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_spearman_with_nans() {
        let xs = [1.0, 2.0, f64::NAN, 4.0];
        let ys = [0.01, 0.02, 0.03, 0.04];
        assert!(spearman(&xs, &ys).is_finite());
    }

    #[test]
    fn test_spearman_zero_variance() {
        let xs = [1.0, 1.0, 1.0];
        let ys = [0.01, 0.02, 0.03];
        assert!(spearman(&xs, &ys).is_nan());
    }

    #[test]
    fn test_compute_ranks_with_ties() {
        let values = vec![1.0, 2.0, 2.0, 3.0];
        let ranks = compute_ranks(&values);
        assert!((ranks[0] - 0.0).abs() < 1e-10);
        assert!((ranks[1] - 1.5).abs() < 1e-10);
        assert!((ranks[2] - 1.5).abs() < 1e-10);
        assert!((ranks[3] - 3.0).abs() < 1e-10);
    }
}
