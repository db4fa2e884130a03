//! Raw-to-tidy row cleaning.

use serde::{Deserialize, Serialize};
use wage_model::{RawRecord, TidyRecord};

use crate::error::ConversionError;
use crate::normalization::{MissingEarnings, parse_earnings, parse_year, strip_area_prefix};

/// Per-row cleaning options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanOptions {
    pub missing_earnings: MissingEarnings,
}

/// Clean one raw row with the default (strict) options.
pub fn clean_row(raw: RawRecord) -> Result<TidyRecord, ConversionError> {
    clean_row_with(raw, CleanOptions::default())
}

/// Rename the fields of `raw` to the tidy schema, strip the area-type
/// prefix and coerce `year` and `earnings_ppp`.
///
/// Text fields are moved, not copied, and are otherwise left untouched.
pub fn clean_row_with(
    raw: RawRecord,
    options: CleanOptions,
) -> Result<TidyRecord, ConversionError> {
    let year = parse_year(&raw.time)?;
    let earnings_ppp = parse_earnings(&raw.obs_value, options.missing_earnings)?;

    let mut area_type = raw.classif1;
    let cut = area_type.len() - strip_area_prefix(&area_type).len();
    if cut > 0 {
        area_type.replace_range(..cut, "");
    }

    Ok(TidyRecord {
        country: raw.ref_area,
        source: raw.source,
        indicator: raw.indicator,
        sex: raw.sex,
        area_type,
        currency_info: raw.classif2,
        year,
        earnings_ppp,
        obs_status: raw.obs_status,
        note_indicator: raw.note_indicator,
        note_source: raw.note_source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConversionReason;

    fn raw(area: &str, time: &str, value: &str) -> RawRecord {
        RawRecord {
            ref_area: "Chad".to_string(),
            source: "HIES - Household Income and Expenditure Survey".to_string(),
            indicator: "Average monthly earnings of employees".to_string(),
            sex: "Male".to_string(),
            classif1: area.to_string(),
            classif2: "Currency: 2021 PPP $".to_string(),
            time: time.to_string(),
            obs_value: value.to_string(),
            obs_status: String::new(),
            note_indicator: "Break in series".to_string(),
            note_source: String::new(),
        }
    }

    #[test]
    fn cleans_prefixed_rural_row() {
        let tidy = clean_row(raw("Area type: Rural", "2021", "120.5")).expect("clean row");
        assert_eq!(tidy.country, "Chad");
        assert_eq!(tidy.sex, "Male");
        assert_eq!(tidy.area_type, "Rural");
        assert_eq!(tidy.currency_info, "Currency: 2021 PPP $");
        assert_eq!(tidy.year, 2021);
        assert_eq!(tidy.earnings_ppp, 120.5);
        assert_eq!(tidy.note_indicator, "Break in series");
        assert_eq!(tidy.obs_status, "");
    }

    #[test]
    fn unprefixed_area_is_unchanged() {
        let tidy = clean_row(raw("National", "2019", "88")).expect("clean row");
        assert_eq!(tidy.area_type, "National");
    }

    #[test]
    fn bad_year_is_reported_before_earnings() {
        let err = clean_row(raw("National", "twenty", "N/A")).expect_err("bad year");
        assert_eq!(err.field, "year");
        assert_eq!(err.reason, ConversionReason::NotAnInteger);
    }

    #[test]
    fn empty_earnings_respect_options() {
        let strict = clean_row(raw("Urban", "2020", "")).expect_err("strict");
        assert_eq!(strict.reason, ConversionReason::Empty);

        let lenient = clean_row_with(
            raw("Urban", "2020", ""),
            CleanOptions {
                missing_earnings: MissingEarnings::AsNan,
            },
        )
        .expect("lenient");
        assert!(lenient.earnings_ppp.is_nan());
        assert_eq!(lenient.earnings(), None);
    }
}
