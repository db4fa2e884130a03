//! Tidy CSV serialization.

use std::path::Path;

use tracing::debug;
use wage_model::{TidyRecord, schema};

use crate::error::{Result, TransformError};

/// Serialize records to tidy CSV text: header row of tidy names in schema
/// order, then one line per record.
pub fn tidy_csv_bytes(records: &[TidyRecord]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer
        .write_record(schema::tidy_headers())
        .map_err(TransformError::Serialize)?;
    for record in records {
        writer.serialize(record).map_err(TransformError::Serialize)?;
    }
    writer
        .into_inner()
        .map_err(|e| TransformError::Serialize(e.into_error().into()))
}

/// Write records to `path` as tidy CSV.
///
/// The whole file is rendered in memory first, so a serialization failure
/// never leaves a partial file behind.
pub fn write_tidy(records: &[TidyRecord], path: &Path) -> Result<()> {
    let bytes = tidy_csv_bytes(records)?;
    std::fs::write(path, &bytes).map_err(|source| TransformError::FileWrite {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(
        path = %path.display(),
        record_count = records.len(),
        byte_count = bytes.len(),
        "wrote tidy file"
    );
    Ok(())
}
