//! Numeric coercion of the `time` and `obs_value` fields.

use serde::{Deserialize, Serialize};
use wage_model::schema::{EARNINGS_PPP, YEAR};

use crate::error::{ConversionError, ConversionReason};

/// How an empty `obs_value` is treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissingEarnings {
    /// Empty values fail conversion like any other non-numeric text.
    #[default]
    Reject,
    /// Empty values become NaN, the tidy table's missing marker.
    AsNan,
}

const YEAR_RANGE: std::ops::RangeInclusive<i32> = 1000..=9999;

fn conversion_error(field: &'static str, value: &str, reason: ConversionReason) -> ConversionError {
    ConversionError {
        field,
        value: value.to_string(),
        reason,
    }
}

/// Parses a raw `time` value as a 4-digit base-10 year.
pub fn parse_year(value: &str) -> Result<i32, ConversionError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(conversion_error(YEAR, value, ConversionReason::Empty));
    }
    let year = trimmed
        .parse::<i32>()
        .map_err(|_| conversion_error(YEAR, value, ConversionReason::NotAnInteger))?;
    if !YEAR_RANGE.contains(&year) {
        return Err(conversion_error(YEAR, value, ConversionReason::YearOutOfRange));
    }
    Ok(year)
}

/// Parses a raw `obs_value` as floating point.
///
/// `NaN` text is accepted as-is. Empty text follows `missing`.
pub fn parse_earnings(value: &str, missing: MissingEarnings) -> Result<f64, ConversionError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return match missing {
            MissingEarnings::AsNan => Ok(f64::NAN),
            MissingEarnings::Reject => {
                Err(conversion_error(EARNINGS_PPP, value, ConversionReason::Empty))
            }
        };
    }
    trimmed
        .parse::<f64>()
        .map_err(|_| conversion_error(EARNINGS_PPP, value, ConversionReason::NotANumber))
}
