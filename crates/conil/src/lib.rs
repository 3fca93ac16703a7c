#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/conil/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! # conil
//!
//! Factor report composition for equity signal research.
//!
//! conil is an umbrella crate that re-exports all conil sub-crates for
//! convenience. It provides a unified API for deriving factor analytics,
//! rendering report panels, and composing multi-panel report sheets.
//!
//! ## Quick Start
//!
//! ```ignore
//! use conil::report::{SheetOptions, create_1x3_sheet};
//! use conil::types::FACTOR_QUANTILE;
//!
//! # fn main() -> conil::Result<()> {
//! let opts = SheetOptions::default();
//! let (sheet, ic_summary, hist_summary, curves) =
//!     create_1x3_sheet(&df, "alpha", "fwd_ret_5", "fwd_ret_1", 5, &opts)?;
//! println!("IR: {:.2}", ic_summary.get("ir").unwrap_or(f64::NAN));
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Organization
//!
//! - [`types`] - Core types, column constants and errors
//! - [`analytics`] - IC, cumulative return, turnover and histogram transforms
//! - [`plot`] - Panel renderers over a generic drawing backend
//! - [`report`] - Sheet orchestrators and HTML/notebook export
//!
//! ## Architecture
//!
//! conil follows a layered architecture:
//!
//! 1. **Analytics** derive per-date series from the factor dataset
//! 2. **Panels** render one series each into a drawing area
//! 3. **Sheets** compose panels into fixed grid layouts
//! 4. **Export** embeds sheets into HTML or drives notebook conversion

/// Version information for the conil crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core types, column constants and errors.
pub mod types {
    pub use conil_traits::*;
}

/// Analytic transforms: IC, cumulative returns, turnover, histograms.
pub mod analytics {
    pub use conil_analytics::*;
}

/// Panel renderers over a generic drawing backend.
pub mod plot {
    pub use conil_plot::*;
}

/// Sheet orchestrators and export adapters.
pub mod report {
    pub use conil_report::*;
}

// Re-export error and summary types
pub use conil_traits::{ConilError, PanelSummary, Result};

// Re-export common types
pub use conil_traits::{ASSET_COL, DATE_COL, Date, FACTOR_QUANTILE, FactorDataset};

/// Prelude module for convenient imports.
///
/// ```ignore
/// use conil::prelude::*;
/// ```
pub mod prelude {
    pub use crate::analytics::{
        calc_auto_correlation, calc_cum_return_by_quantile, calc_ic, calc_quantile_turnover,
    };
    pub use crate::report::{
        Sheet, SheetOptions, create_1x3_sheet, create_2x2_sheet, create_2x3_sheet,
        create_3x2_sheet, fig_to_img, ipynb_to_html, render_html,
    };
    pub use crate::{ConilError, Date, FACTOR_QUANTILE, PanelSummary, Result};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        let parts: Vec<&str> = VERSION.split('.').collect();
        assert!(parts.len() >= 2, "Version should have at least major.minor");
    }

    #[test]
    fn test_error_types() {
        let _result: Result<()> = Ok(());
        let _error: ConilError = ConilError::InvalidArgument("test".to_string());
    }
}
