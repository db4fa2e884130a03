//! Read-only queries over the tidy wage table.
//!
//! The table is loaded once through a [`TableSource`] and cached in a
//! [`CachedTable`]. Every query returns new values; the table is never
//! modified. Queries without a single answer return
//! [`QueryError::NoData`] carrying a [`MissingData`] reason.

pub mod error;
pub mod filter;
pub mod gap;
pub mod source;
pub mod stats;
pub mod table;

pub use error::{MissingData, QueryError, Result, no_data_as_none};
pub use filter::QueryFilter;
pub use gap::{Gap, GapKind, gap_between, percent_gap};
pub use source::{CachedTable, CsvTableSource, StaticSource, TableSource};
pub use stats::{CountryProfile, CountrySummary, Comparison, SeriesPoint};
pub use table::{TidyTable, tidy_schema};
