//! Raw export ingestion.
//!
//! Reads the ILOSTAT earnings export (`EAR_4MTH_SEX_GEO_CUR_NB_A`) into
//! [`RawRecord`](wage_model::RawRecord)s, resolving the labeled header
//! columns declared in [`wage_model::schema`].
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use wage_ingest::load_raw;
//!
//! let rows = load_raw(Path::new("data-raw/EAR_4MTH_SEX_GEO_CUR_NB_A-filtered-2025-06-01.csv"))?;
//! ```

mod error;
mod raw;

// === Error Types ===
pub use error::{IngestError, Result};

// === Raw Reading ===
pub use raw::{RawColumns, load_raw, parse_raw};
