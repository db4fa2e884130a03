//! Field-level normalization applied while cleaning a raw row.

pub mod numeric;
pub mod text;

pub use numeric::{MissingEarnings, parse_earnings, parse_year};
pub use text::strip_area_prefix;
