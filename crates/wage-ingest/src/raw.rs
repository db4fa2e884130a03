//! Loading the raw export.
//!
//! Columns are resolved by header label, never by position, so the export may
//! carry extra columns in any order.

use std::path::Path;

use csv::StringRecord;
use tracing::{debug, info};
use wage_model::{COLUMNS, RawRecord};

use crate::error::{IngestError, Result};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Header positions of the labeled columns, in schema order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawColumns {
    indices: [usize; COLUMNS.len()],
}

impl RawColumns {
    /// Resolve every required label against a header row.
    ///
    /// Returns the labels that could not be found when resolution fails.
    pub fn resolve(headers: &StringRecord) -> std::result::Result<Self, Vec<String>> {
        let mut indices = [0usize; COLUMNS.len()];
        let mut missing = Vec::new();
        for (slot, spec) in indices.iter_mut().zip(COLUMNS.iter()) {
            match header_index(headers, spec.raw) {
                Some(idx) => *slot = idx,
                None => missing.push(spec.raw.to_string()),
            }
        }
        if missing.is_empty() {
            Ok(Self { indices })
        } else {
            Err(missing)
        }
    }

    /// Build a raw record from one data row.
    pub fn extract(&self, row: &StringRecord) -> RawRecord {
        let get = |slot: usize| -> String {
            row.get(self.indices[slot]).unwrap_or_default().to_string()
        };
        RawRecord {
            ref_area: get(0),
            source: get(1),
            indicator: get(2),
            sex: get(3),
            classif1: get(4),
            classif2: get(5),
            time: get(6),
            obs_value: get(7),
            obs_status: get(8),
            note_indicator: get(9),
            note_source: get(10),
        }
    }
}

fn header_index(headers: &StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h.trim() == name)
}

/// Reject byte-order marks of encodings we cannot read.
fn check_encoding(path: &Path, bytes: &[u8]) -> Result<()> {
    let encoding = match bytes {
        [0xFF, 0xFE, ..] => "UTF-16 LE",
        [0xFE, 0xFF, ..] => "UTF-16 BE",
        _ => return Ok(()),
    };
    Err(IngestError::UnsupportedEncoding {
        path: path.to_path_buf(),
        encoding,
    })
}

/// Parse raw export bytes. `path` is used for error reporting only.
pub fn parse_raw(path: &Path, bytes: &[u8]) -> Result<Vec<RawRecord>> {
    check_encoding(path, bytes)?;
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(IngestError::EmptyInput {
            path: path.to_path_buf(),
        });
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(bytes);
    let headers = reader
        .headers()
        .map_err(|e| IngestError::csv(path, e))?
        .clone();
    let columns =
        RawColumns::resolve(&headers).map_err(|columns| IngestError::MissingColumns {
            path: path.to_path_buf(),
            columns,
        })?;
    debug!(
        path = %path.display(),
        header_count = headers.len(),
        "resolved raw header"
    );

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| IngestError::csv(path, e))?;
        records.push(columns.extract(&row));
    }
    Ok(records)
}

/// Load every row of the raw export at `path`.
///
/// A leading UTF-8 byte-order mark is skipped. Fails before any row is read
/// when the header is missing one of the labeled columns.
pub fn load_raw(path: &Path) -> Result<Vec<RawRecord>> {
    let bytes = std::fs::read(path).map_err(|e| IngestError::read(path, e))?;
    let records = parse_raw(path, &bytes)?;
    info!(
        path = %path.display(),
        record_count = records.len(),
        "loaded raw export"
    );
    Ok(records)
}
