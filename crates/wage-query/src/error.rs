//! Error types for tidy table queries.

use std::path::PathBuf;
use thiserror::Error;

/// A query had no single answer. Not a failure of the table itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MissingData {
    /// No row matched one side of a comparison.
    #[error("no {side} observation")]
    NoRows { side: String },

    /// More than one row matched where exactly one was expected.
    #[error("{count} {side} observations where one was expected")]
    Ambiguous { side: String, count: usize },

    /// The single matching row has a missing (NaN) value.
    #[error("{side} observation has no value")]
    MissingValue { side: String },

    /// The base of a percentage gap is zero.
    #[error("{side} earnings are zero")]
    ZeroBase { side: String },

    /// No year has a defined gap.
    #[error("no year with comparable observations")]
    NoComparableYear,

    #[error("no data for country '{0}'")]
    UnknownCountry(String),

    #[error("cannot compare '{0}' with itself")]
    SameCountry(String),
}

#[derive(Debug, Error)]
pub enum QueryError {
    /// Failed to read the tidy file.
    #[error("failed to load tidy table {path}: {message}")]
    Load { path: PathBuf, message: String },

    /// Table columns differ from the shared tidy schema.
    #[error("tidy table schema mismatch: {message}")]
    Schema { message: String },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },

    #[error("no data available: {0}")]
    NoData(#[from] MissingData),
}

impl From<polars::prelude::PolarsError> for QueryError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

impl QueryError {
    /// The "no data" outcome, if this is one.
    pub fn missing_data(&self) -> Option<&MissingData> {
        match self {
            Self::NoData(missing) => Some(missing),
            _ => None,
        }
    }
}

/// Result type for query operations.
pub type Result<T> = std::result::Result<T, QueryError>;

/// Turn a "no data" outcome into `None`, passing real failures through.
pub fn no_data_as_none<T>(result: Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(QueryError::NoData(_)) => Ok(None),
        Err(err) => Err(err),
    }
}
