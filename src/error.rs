//! Classified pipeline errors.
//!
//! Every stage returns these as values; no stage raises past its own
//! boundary. The host decides how to surface them.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SeasonError>;

/// Failures while turning a delimited file into a normalized quote table.
/// Any one of these fails the whole load; there are no partial tables.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("input is empty")]
    EmptyInput,

    #[error("unparseable date {value:?} on line {line} (expected day.month.year)")]
    BadDate { value: String, line: usize },

    #[error("non-numeric close price {value:?} on line {line}")]
    BadPrice { value: String, line: usize },

    #[error("missing required column: {0}")]
    MissingColumn(String),
}

/// Top-level error taxonomy of the seasonality pipeline.
#[derive(Debug, Error)]
pub enum SeasonError {
    #[error("data loading error: {0}")]
    Load(#[from] LoadError),

    #[error("insufficient data: {rows} priced row(s), need at least 2 to form a delta")]
    InsufficientData { rows: usize },

    #[error("seasonality curve has no variation, cannot derive a display scale")]
    DegenerateScale,
}
