//! Quantile portfolio cumulative returns.
//!
//! Builds one equal-weight hypothetical portfolio per factor-quantile
//! bucket and tracks its compounded value through time under a fixed
//! rebalancing horizon.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use conil_traits::{ASSET_COL, ConilError, DATE_COL, Date, Result};
use polars::prelude::*;

use crate::frame;

/// Calculate cumulative returns per factor-quantile bucket.
///
/// Capital is split into `period` equal staggered sub-funds. Sub-fund `j`
/// re-reads bucket membership at date indices congruent to `j` modulo
/// `period` and holds those entities until its next turn; every day each
/// sub-fund compounds the equal-weight mean of its members' one-period
/// forward returns. The bucket curve is the mean of the sub-fund values.
///
/// Every curve starts at 1.0 at the first time bucket; with a flat
/// all-zero return column the curve stays at 1.0 throughout.
///
/// # Arguments
///
/// * `df` - Factor dataset with `date`, `asset`, the return and quantile columns
/// * `fwd_ret` - One-period forward-return column name
/// * `period` - Holding horizon in time buckets, must be >= 1
/// * `quantile_col` - Factor-quantile column name
///
/// # Returns
///
/// A DataFrame ordered by date with one `q{bucket}` column per quantile
/// bucket present in the dataset.
pub fn calc_cum_return_by_quantile(
    df: &DataFrame,
    fwd_ret: &str,
    period: usize,
    quantile_col: &str,
) -> Result<DataFrame> {
    if period == 0 {
        return Err(ConilError::InvalidArgument(
            "period must be a positive integer".to_string(),
        ));
    }
    frame::ensure_columns(df, &[DATE_COL, ASSET_COL, fwd_ret, quantile_col])?;

    let dates = frame::date_rows(df)?;
    let assets = frame::str_col(df, ASSET_COL)?;
    let returns = frame::f64_col(df, fwd_ret)?;
    let quantiles = frame::i32_col(df, quantile_col)?;

    let index = frame::unique_sorted_dates(&dates);
    let n = index.len();
    let pos: HashMap<Date, usize> = index.iter().enumerate().map(|(i, d)| (*d, i)).collect();

    // Bucket membership and per-asset returns, grouped per time bucket.
    let mut members: Vec<BTreeMap<i32, Vec<usize>>> = vec![BTreeMap::new(); n];
    let mut returns_at: Vec<HashMap<&str, f64>> = vec![HashMap::new(); n];
    for row in 0..dates.len() {
        let t = pos[&dates[row]];
        if let Some(q) = quantiles[row] {
            members[t].entry(q).or_default().push(row);
        }
        if let Some(r) = returns[row]
            && r.is_finite()
        {
            returns_at[t].insert(assets[row].as_str(), r);
        }
    }

    let buckets: BTreeSet<i32> = members.iter().flat_map(|m| m.keys().copied()).collect();

    let mut columns = vec![frame::date_column(DATE_COL, &index)?];
    for q in buckets {
        let mut curve = vec![f64::NAN; n.max(1)];
        curve[0] = 1.0;

        let mut navs = vec![1.0_f64; period];
        let mut held: Vec<Vec<&str>> = vec![Vec::new(); period];

        for t in 1..n {
            let prev = t - 1;
            for (j, nav) in navs.iter_mut().enumerate() {
                if prev % period == j {
                    held[j] = members[prev]
                        .get(&q)
                        .map(|rows| rows.iter().map(|&r| assets[r].as_str()).collect())
                        .unwrap_or_default();
                }

                let mut sum = 0.0;
                let mut count = 0usize;
                for asset in &held[j] {
                    if let Some(r) = returns_at[prev].get(asset) {
                        sum += r;
                        count += 1;
                    }
                }
                if count > 0 {
                    *nav *= 1.0 + sum / count as f64;
                }
            }
            curve[t] = navs.iter().sum::<f64>() / period as f64;
        }

        columns.push(Column::new(format!("q{q}").into(), &curve[..n]));
    }

    Ok(DataFrame::new(columns)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> Date {
        Date::from_ymd_opt(2024, 1, day).unwrap()
    }

    /// Two buckets over four dates; bucket 2 always earns +1%, bucket 1
    /// always loses 1%.
    fn sample_df() -> DataFrame {
        let mut dates = Vec::new();
        let mut assets = Vec::new();
        let mut rets = Vec::new();
        let mut quants = Vec::new();
        for day in 2..6 {
            for (asset, q, r) in [("A", 1, -0.01), ("B", 1, -0.01), ("C", 2, 0.01), ("D", 2, 0.01)]
            {
                dates.push(d(day));
                assets.push(asset);
                rets.push(r);
                quants.push(q);
            }
        }
        DataFrame::new(vec![
            frame::date_column(DATE_COL, &dates).unwrap(),
            Column::new(ASSET_COL.into(), assets),
            Column::new("fwd_ret_1".into(), rets),
            Column::new("factor_quantile".into(), quants),
        ])
        .unwrap()
    }

    fn curve(df: &DataFrame, name: &str) -> Vec<f64> {
        df.column(name)
            .unwrap()
            .as_materialized_series()
            .f64()
            .unwrap()
            .into_iter()
            .flatten()
            .collect()
    }

    #[test]
    fn test_curves_start_at_baseline() {
        let out = calc_cum_return_by_quantile(&sample_df(), "fwd_ret_1", 2, "factor_quantile")
            .unwrap();
        assert_eq!(out.height(), 4);
        assert!((curve(&out, "q1")[0] - 1.0).abs() < 1e-12);
        assert!((curve(&out, "q2")[0] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_high_bucket_dominates() {
        let out = calc_cum_return_by_quantile(&sample_df(), "fwd_ret_1", 1, "factor_quantile")
            .unwrap();
        let low = curve(&out, "q1");
        let high = curve(&out, "q2");
        for t in 1..4 {
            assert!(high[t] > low[t], "high bucket not above low at t={t}");
        }
        // Compounded +1% per day.
        assert!((high[3] - 1.01_f64.powi(3)).abs() < 1e-12);
    }

    #[test]
    fn test_flat_returns_stay_at_baseline() {
        let df = sample_df()
            .lazy()
            .with_column(lit(0.0).alias("fwd_ret_1"))
            .collect()
            .unwrap();
        let out = calc_cum_return_by_quantile(&df, "fwd_ret_1", 3, "factor_quantile").unwrap();
        for name in ["q1", "q2"] {
            for v in curve(&out, name) {
                assert!((v - 1.0).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_zero_period_rejected() {
        let err = calc_cum_return_by_quantile(&sample_df(), "fwd_ret_1", 0, "factor_quantile")
            .unwrap_err();
        assert!(matches!(err, ConilError::InvalidArgument(_)));
    }

    #[test]
    fn test_missing_return_column() {
        let err = calc_cum_return_by_quantile(&sample_df(), "fwd_ret_5", 1, "factor_quantile")
            .unwrap_err();
        assert!(matches!(err, ConilError::MissingColumn(name) if name == "fwd_ret_5"));
    }
}
