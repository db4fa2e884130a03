//! Error types for raw export ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading the raw export.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Input file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Malformed Input ===
    /// File uses a byte-order mark for an encoding other than UTF-8.
    #[error("unsupported encoding {encoding} in {path}")]
    UnsupportedEncoding {
        path: PathBuf,
        encoding: &'static str,
    },

    /// File has no header row.
    #[error("CSV file is empty: {path}")]
    EmptyInput { path: PathBuf },

    /// Header row lacks one or more labeled columns.
    #[error("malformed input {path}: missing required columns {}", .columns.join(", "))]
    MissingColumns { path: PathBuf, columns: Vec<String> },

    /// CSV syntax error or a row whose field count differs from the header.
    #[error("failed to parse CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl IngestError {
    pub(crate) fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound { path }
        } else {
            Self::FileRead { path, source }
        }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            source,
        }
    }

    /// True for errors caused by the file's shape rather than I/O.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedEncoding { .. }
                | Self::EmptyInput { .. }
                | Self::MissingColumns { .. }
                | Self::Csv { .. }
        )
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
