use std::path::PathBuf;

use thiserror::Error;
use wage_ingest::IngestError;

/// Why a single field could not be coerced to its numeric type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConversionReason {
    #[error("empty value")]
    Empty,
    #[error("not a base-10 integer")]
    NotAnInteger,
    #[error("not a 4-digit year")]
    YearOutOfRange,
    #[error("not a floating-point number")]
    NotANumber,
}

/// A field of one raw row that failed type coercion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot convert {field} value '{value}': {reason}")]
pub struct ConversionError {
    /// Tidy column name.
    pub field: &'static str,
    pub value: String,
    pub reason: ConversionReason,
}

/// A conversion failure tagged with its 1-based data row number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("row {row}: {error}")]
pub struct RowFailure {
    pub row: usize,
    #[source]
    pub error: ConversionError,
}

#[derive(Debug, Error)]
pub enum TransformError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// First failing row under the abort-on-first policy.
    #[error("type conversion failed at {0}")]
    TypeConversion(#[source] RowFailure),

    /// Every failing row under the collect-all policy.
    #[error(
        "type conversion failed for {} rows, first at {}",
        .failures.len(),
        .failures.first().map(ToString::to_string).unwrap_or_default()
    )]
    Failures { failures: Vec<RowFailure> },

    #[error("failed to serialize tidy records: {0}")]
    Serialize(#[source] csv::Error),

    #[error("failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TransformError {
    /// Row failures carried by this error, empty for I/O and input errors.
    pub fn row_failures(&self) -> &[RowFailure] {
        match self {
            Self::TypeConversion(failure) => std::slice::from_ref(failure),
            Self::Failures { failures } => failures,
            _ => &[],
        }
    }
}

pub type Result<T> = std::result::Result<T, TransformError>;
