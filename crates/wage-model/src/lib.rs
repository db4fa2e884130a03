//! Data model for ILOSTAT wage statistics.
//!
//! - **schema**: the single raw-to-tidy column declaration
//! - **record**: raw export rows and cleaned tidy rows
//! - **enums**: typed `Sex` and `AreaType` filter values

pub mod enums;
pub mod error;
pub mod record;
pub mod schema;

pub use enums::{AreaType, Sex};
pub use error::{ModelError, Result};
pub use record::{RawRecord, TidyRecord};
pub use schema::{AREA_TYPE_PREFIX, COLUMNS, ColumnKind, ColumnSpec, DEFAULT_TIDY_PATH};
