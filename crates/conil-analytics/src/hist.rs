//! Histogram binning and distribution moments.

use conil_traits::{ConilError, Result};
use ndarray::Array1;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::frame;

/// Equal-width histogram of a finite sample.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Histogram {
    /// Bin edges, `counts.len() + 1` entries in ascending order.
    pub edges: Vec<f64>,
    /// Observations per bin.
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Largest bin count, 0 for an empty histogram.
    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}

/// Distribution moments of a sample.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Moments {
    /// Arithmetic mean.
    pub mean: f64,
    /// Standard deviation with one delta degree of freedom.
    pub std: f64,
    /// Fisher skewness, 0 for a symmetric sample.
    pub skew: f64,
    /// Excess kurtosis, 0 for a normal sample.
    pub kurt: f64,
}

/// Bin a sample into `bins` equal-width buckets.
///
/// Non-finite values must be filtered out by the caller; the sample and
/// the bin count must both be non-empty. A constant sample gets a unit
/// span centred on its value so the single occupied bin still renders.
pub fn histogram(values: &[f64], bins: usize) -> Result<Histogram> {
    if bins == 0 {
        return Err(ConilError::InvalidArgument(
            "bins must be a positive integer".to_string(),
        ));
    }
    if values.is_empty() {
        return Err(ConilError::InvalidArgument(
            "cannot bin an empty sample".to_string(),
        ));
    }

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in values {
        if !v.is_finite() {
            return Err(ConilError::InvalidArgument(
                "sample contains non-finite values".to_string(),
            ));
        }
        min = min.min(v);
        max = max.max(v);
    }
    if min == max {
        min -= 0.5;
        max += 0.5;
    }

    let width = (max - min) / bins as f64;
    let edges: Vec<f64> = (0..=bins).map(|i| min + width * i as f64).collect();

    let mut counts = vec![0usize; bins];
    for &v in values {
        let bin = (((v - min) / width) as usize).min(bins - 1);
        counts[bin] += 1;
    }

    Ok(Histogram { edges, counts })
}

/// Compute mean, standard deviation, skewness and excess kurtosis.
///
/// Standard deviation uses one delta degree of freedom. Samples too small
/// for a moment yield NaN for that moment instead of failing.
pub fn moments(values: &[f64]) -> Moments {
    let arr = Array1::from_iter(values.iter().copied());
    let n = arr.len() as f64;

    let mean = arr.mean().unwrap_or(f64::NAN);
    let std = if arr.len() > 1 { arr.std(1.0) } else { f64::NAN };

    let (skew, kurt) = if arr.len() > 2 && std.is_finite() && std > 0.0 {
        let mut m3 = 0.0;
        let mut m4 = 0.0;
        for &v in arr.iter() {
            let z = (v - mean) / std;
            m3 += z.powi(3);
            m4 += z.powi(4);
        }
        (m3 / n, m4 / n - 3.0)
    } else {
        (f64::NAN, f64::NAN)
    };

    Moments { mean, std, skew, kurt }
}

/// Extract the finite values of a numeric column.
///
/// Nulls and NaNs are dropped; the remainder feeds [`histogram`] and
/// [`moments`].
pub fn finite_column_values(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    Ok(frame::f64_col(df, name)?
        .into_iter()
        .flatten()
        .filter(|v| v.is_finite())
        .collect())
}
