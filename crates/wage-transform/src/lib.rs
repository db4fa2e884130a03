//! Tidy-data transform for ILOSTAT wage exports.
//!
//! - **normalization**: area-type prefix stripping, year and earnings coercion
//! - **clean**: raw row to tidy record
//! - **write**: tidy CSV serialization in schema order
//! - **pipeline**: load, clean and write as one all-or-nothing batch

pub mod clean;
pub mod error;
pub mod normalization;
pub mod pipeline;
pub mod write;

// Re-export common functions for external use
pub use clean::{CleanOptions, clean_row, clean_row_with};
pub use error::{ConversionError, ConversionReason, Result, RowFailure, TransformError};
pub use normalization::{MissingEarnings, strip_area_prefix};
pub use pipeline::{
    DEFAULT_RAW_PATH, FailurePolicy, ProcessOptions, ProcessReport, RowOutcome, clean_rows,
    collect_outcomes, process,
};
pub use write::{tidy_csv_bytes, write_tidy};
