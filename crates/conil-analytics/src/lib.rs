//! Analytic transforms for the Conil factor report framework.
//!
//! This crate provides the numeric series behind the report panels:
//! - Information Coefficient (IC) series per (factor, forward return) pair
//! - Quantile portfolio cumulative returns under a holding horizon
//! - Quantile turnover and factor rank autocorrelation
//! - Histogram binning and distribution moments
//!
//! # Example
//!
//! ```rust,ignore
//! use conil_analytics::{calc_ic, calc_cum_return_by_quantile};
//! use conil_traits::FACTOR_QUANTILE;
//!
//! let df_ic = calc_ic(&df, &["alpha"], &["fwd_ret_5"])?;
//! let curves = calc_cum_return_by_quantile(&df, "fwd_ret_1", 5, FACTOR_QUANTILE)?;
//! ```

pub mod frame;
pub mod hist;
pub mod ic;
pub mod portfolio;
pub mod turnover;

// Re-export main entry points
pub use hist::{Histogram, Moments, finite_column_values, histogram, moments};
pub use ic::{calc_ic, spearman};
pub use portfolio::calc_cum_return_by_quantile;
pub use turnover::{calc_auto_correlation, calc_quantile_turnover, max_quantile};
