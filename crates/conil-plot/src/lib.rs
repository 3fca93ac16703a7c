//! Panel renderers for the Conil factor report framework.
//!
//! Every renderer draws into a caller-supplied drawing area and is
//! generic over the plotters backend, so the same panels compose into
//! report sheets or render standalone.
//!
//! # Example
//!
//! ```rust,ignore
//! use conil_plot::plot_ic_ts;
//! use plotters::prelude::*;
//!
//! let mut svg = String::new();
//! let area = SVGBackend::with_string(&mut svg, (640, 480)).into_drawing_area();
//! let summary = plot_ic_ts(&df_ic, "alpha__fwd_ret_5", &area, &[])?;
//! ```

pub mod hist;
pub mod ic;
pub mod portfolio;
pub mod turnover;

mod style;

// Re-export the panel renderers
pub use hist::plot_hist;
pub use ic::{plot_ic_heatmap_monthly, plot_ic_ts};
pub use portfolio::plot_quantile_portfolio;
pub use turnover::{plot_factor_auto_correlation, plot_turnover_quantile};
