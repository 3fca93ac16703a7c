#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core types for the Conil factor report framework.
//!
//! This crate provides the foundational pieces shared by the analytic
//! transforms, the panel renderers, and the report composition engine:
//! the dataset contract, the error type, and the per-panel summary map.

/// The version of the conil-traits crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod error;
pub mod summary;
pub mod types;

// Re-exports
pub use error::{ConilError, Result};
pub use summary::PanelSummary;
pub use types::{ASSET_COL, DATE_COL, Date, FACTOR_QUANTILE, FactorDataset};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        assert!(VERSION.contains('.'));
    }
}
