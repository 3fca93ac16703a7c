//! Error types for the Conil framework.
//!
//! This module defines the error types used throughout the Conil ecosystem,
//! covering column validation, analytic transforms, drawing surfaces, and
//! report export.

use thiserror::Error;

/// The main error type for Conil operations.
///
/// This enum encompasses all error cases that can occur when deriving
/// analytic series from a factor dataset, composing report sheets, and
/// exporting them.
#[derive(Debug, Error)]
pub enum ConilError {
    /// A required column name is absent from the input table.
    ///
    /// Raised at the analytic-adapter boundary and surfaced unmodified to
    /// the caller: a missing column makes the entire sheet meaningless.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// An argument is out of its valid range (e.g. a zero holding period
    /// or an empty period list).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A notebook template path lacks the required `.ipynb` extension.
    ///
    /// Raised before any external process is spawned.
    #[error("Invalid template: {0}")]
    InvalidTemplate(String),

    /// Error from Polars operations.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Error from the drawing surface while rendering a panel.
    #[error("Drawing error: {0}")]
    Draw(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error for other cases.
    #[error("Error: {0}")]
    Other(String),
}

impl From<String> for ConilError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for ConilError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

/// A specialized Result type for Conil operations.
///
/// This is a convenience type that uses [`ConilError`] as the error type.
pub type Result<T> = std::result::Result<T, ConilError>;
