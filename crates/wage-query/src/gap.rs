//! Wage gap derivation.
//!
//! A gap compares two single-row subsets for the same country and year:
//! `(a - b) / a * 100`. Anything other than exactly one non-missing row on
//! each side is "no data"; the division is never attempted.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use tracing::debug;
use wage_model::{AreaType, Sex};

use crate::error::{MissingData, QueryError, Result};
use crate::filter::QueryFilter;
use crate::table::TidyTable;

/// The two comparisons the dashboard draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GapKind {
    /// Male vs Female, national scope.
    Gender,
    /// Urban vs Rural, both sexes.
    Regional,
}

impl GapKind {
    pub const ALL: [GapKind; 2] = [GapKind::Gender, GapKind::Regional];

    pub fn as_str(&self) -> &'static str {
        match self {
            GapKind::Gender => "Gender",
            GapKind::Regional => "Urban-Rural",
        }
    }

    /// Labels of the base side and the compared side.
    pub fn labels(&self) -> (&'static str, &'static str) {
        match self {
            GapKind::Gender => (Sex::Male.as_str(), Sex::Female.as_str()),
            GapKind::Regional => (AreaType::Urban.as_str(), AreaType::Rural.as_str()),
        }
    }

    /// Filters selecting the base side and the compared side for `country`.
    pub fn sides(&self, country: &str) -> (QueryFilter, QueryFilter) {
        let base = QueryFilter::new().country(country);
        match self {
            GapKind::Gender => {
                let national = base.area_type(AreaType::National);
                (national.clone().sex(Sex::Male), national.sex(Sex::Female))
            }
            GapKind::Regional => {
                let total = base.sex(Sex::Total);
                (
                    total.clone().area_type(AreaType::Urban),
                    total.area_type(AreaType::Rural),
                )
            }
        }
    }

    /// Filter covering both sides, for series extraction.
    pub fn both_sides(&self, country: &str) -> QueryFilter {
        let base = QueryFilter::new().country(country);
        match self {
            GapKind::Gender => base
                .area_type(AreaType::National)
                .sex(Sex::Male)
                .sex(Sex::Female),
            GapKind::Regional => base
                .sex(Sex::Total)
                .area_type(AreaType::Urban)
                .area_type(AreaType::Rural),
        }
    }
}

/// A computed gap for one country and year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gap {
    pub kind: GapKind,
    pub country: String,
    pub year: i32,
    /// Earnings of the base side (Male or Urban).
    pub base: f64,
    /// Earnings of the compared side (Female or Rural).
    pub other: f64,
    /// `(base - other) / base * 100`.
    pub percent: f64,
}

/// The single non-missing earnings value of `subset`.
///
/// Rows with a missing (NaN) value are dropped before counting.
fn single_earnings(subset: &TidyTable, side: &str) -> Result<f64> {
    let rows = subset.earnings()?;
    let values: Vec<f64> = rows.iter().flatten().copied().collect();
    match (rows.len(), values.as_slice()) {
        (0, _) => Err(MissingData::NoRows {
            side: side.to_string(),
        }
        .into()),
        (_, []) => Err(MissingData::MissingValue {
            side: side.to_string(),
        }
        .into()),
        (_, [value]) => Ok(*value),
        (_, many) => Err(MissingData::Ambiguous {
            side: side.to_string(),
            count: many.len(),
        }
        .into()),
    }
}

/// Percentage gap between two subsets that must each hold exactly one value.
///
/// `labels` name the sides in the "no data" reason.
pub fn gap_between(a: &TidyTable, b: &TidyTable, labels: (&str, &str)) -> Result<f64> {
    measure(a, b, labels).map(|(_, _, percent)| percent)
}

/// Base value, compared value and percentage gap.
fn measure(a: &TidyTable, b: &TidyTable, labels: (&str, &str)) -> Result<(f64, f64, f64)> {
    let base = single_earnings(a, labels.0)?;
    let other = single_earnings(b, labels.1)?;
    let percent = percent_gap(base, other).ok_or_else(|| MissingData::ZeroBase {
        side: labels.0.to_string(),
    })?;
    Ok((base, other, percent))
}

/// `(base - other) / base * 100`, undefined for a zero base.
pub fn percent_gap(base: f64, other: f64) -> Option<f64> {
    if base == 0.0 {
        return None;
    }
    Some((base - other) / base * 100.0)
}

impl TidyTable {
    /// Gap of `kind` for one country and year.
    pub fn gap_for_year(&self, country: &str, year: i32, kind: GapKind) -> Result<Gap> {
        let (base_filter, other_filter) = kind.sides(country);
        let base = self.filter(&base_filter.year(year))?;
        let other = self.filter(&other_filter.year(year))?;
        let (base, other, percent) = measure(&base, &other, kind.labels())?;
        Ok(Gap {
            kind,
            country: country.to_string(),
            year,
            base,
            other,
            percent,
        })
    }

    /// Gaps for every year in `years` that has one, ascending by year.
    pub fn gap_trend(
        &self,
        country: &str,
        kind: GapKind,
        years: RangeInclusive<i32>,
    ) -> Result<Vec<Gap>> {
        let candidates = self
            .filter(&kind.both_sides(country).years(years))?
            .distinct_years()?;
        let mut gaps = Vec::new();
        for year in candidates {
            match self.gap_for_year(country, year, kind) {
                Ok(gap) => gaps.push(gap),
                Err(QueryError::NoData(reason)) => {
                    debug!(country, year, kind = kind.as_str(), %reason, "no gap");
                }
                Err(other) => return Err(other),
            }
        }
        Ok(gaps)
    }

    /// The gap for the latest year that has one.
    pub fn latest_gap(&self, country: &str, kind: GapKind) -> Result<Gap> {
        self.gap_trend(country, kind, i32::MIN..=i32::MAX)?
            .pop()
            .ok_or_else(|| MissingData::NoComparableYear.into())
    }
}
