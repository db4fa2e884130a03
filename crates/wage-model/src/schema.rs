//! Shared column schema for the tidy wage table.
//!
//! The raw ILOSTAT export addresses columns by label (`ref_area.label`,
//! `time`, ...). The tidy file renames them and fixes their order. Both the
//! transform (writer) and the query layer (reader) resolve column names and
//! types through [`COLUMNS`], so the file contract is declared exactly once.

use serde::{Deserialize, Serialize};

/// Logical type of a tidy column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnKind {
    /// Free text, written verbatim.
    Text,
    /// Base-10 integer.
    Integer,
    /// Floating point; NaN marks a missing observation.
    Float,
}

/// One entry of the raw-to-tidy rename mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColumnSpec {
    /// Header label in the raw export.
    pub raw: &'static str,
    /// Column name in the tidy file.
    pub tidy: &'static str,
    pub kind: ColumnKind,
}

pub const COUNTRY: &str = "country";
pub const SOURCE: &str = "source";
pub const INDICATOR: &str = "indicator";
pub const SEX: &str = "sex";
pub const AREA_TYPE: &str = "area_type";
pub const CURRENCY_INFO: &str = "currency_info";
pub const YEAR: &str = "year";
pub const EARNINGS_PPP: &str = "earnings_ppp";
pub const OBS_STATUS: &str = "obs_status";
pub const NOTE_INDICATOR: &str = "note_indicator";
pub const NOTE_SOURCE: &str = "note_source";

/// Relative path the tidy file is written to and read from.
pub const DEFAULT_TIDY_PATH: &str = "ilostat_wage.csv";

/// Literal label prefix carried by `classif1.label` values in the export.
pub const AREA_TYPE_PREFIX: &str = "Area type: ";

/// Rename mapping in tidy output order.
pub const COLUMNS: [ColumnSpec; 11] = [
    ColumnSpec {
        raw: "ref_area.label",
        tidy: COUNTRY,
        kind: ColumnKind::Text,
    },
    ColumnSpec {
        raw: "source.label",
        tidy: SOURCE,
        kind: ColumnKind::Text,
    },
    ColumnSpec {
        raw: "indicator.label",
        tidy: INDICATOR,
        kind: ColumnKind::Text,
    },
    ColumnSpec {
        raw: "sex.label",
        tidy: SEX,
        kind: ColumnKind::Text,
    },
    ColumnSpec {
        raw: "classif1.label",
        tidy: AREA_TYPE,
        kind: ColumnKind::Text,
    },
    ColumnSpec {
        raw: "classif2.label",
        tidy: CURRENCY_INFO,
        kind: ColumnKind::Text,
    },
    ColumnSpec {
        raw: "time",
        tidy: YEAR,
        kind: ColumnKind::Integer,
    },
    ColumnSpec {
        raw: "obs_value",
        tidy: EARNINGS_PPP,
        kind: ColumnKind::Float,
    },
    ColumnSpec {
        raw: "obs_status.label",
        tidy: OBS_STATUS,
        kind: ColumnKind::Text,
    },
    ColumnSpec {
        raw: "note_indicator.label",
        tidy: NOTE_INDICATOR,
        kind: ColumnKind::Text,
    },
    ColumnSpec {
        raw: "note_source.label",
        tidy: NOTE_SOURCE,
        kind: ColumnKind::Text,
    },
];

/// Raw header labels the export must provide, in mapping order.
pub fn raw_headers() -> impl Iterator<Item = &'static str> {
    COLUMNS.iter().map(|spec| spec.raw)
}

/// Tidy header names in output order.
pub fn tidy_headers() -> impl Iterator<Item = &'static str> {
    COLUMNS.iter().map(|spec| spec.tidy)
}

/// Look up a column by its tidy name.
pub fn column(tidy: &str) -> Option<&'static ColumnSpec> {
    COLUMNS.iter().find(|spec| spec.tidy == tidy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapping_is_one_to_one() {
        let mut raw: Vec<_> = raw_headers().collect();
        let mut tidy: Vec<_> = tidy_headers().collect();
        raw.sort_unstable();
        raw.dedup();
        tidy.sort_unstable();
        tidy.dedup();
        assert_eq!(raw.len(), COLUMNS.len());
        assert_eq!(tidy.len(), COLUMNS.len());
    }

    #[test]
    fn numeric_columns_are_year_and_earnings() {
        assert_eq!(column(YEAR).map(|c| c.kind), Some(ColumnKind::Integer));
        assert_eq!(column(EARNINGS_PPP).map(|c| c.kind), Some(ColumnKind::Float));
        assert_eq!(column("time"), None);
    }
}
