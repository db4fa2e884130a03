//! Per-country aggregates: earnings series, summaries and comparisons.

use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use wage_model::{AreaType, Sex};

use crate::error::{MissingData, Result, no_data_as_none};
use crate::filter::QueryFilter;
use crate::gap::{Gap, GapKind};
use crate::table::TidyTable;

/// One point of an earnings line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// Line label: a side of a gap, or the country for national series.
    pub group: String,
    pub year: i32,
    pub earnings: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountrySummary {
    pub country: String,
    /// Mean over `sex = Total` rows with a value; `None` when there are none.
    pub average_earnings: Option<f64>,
    pub years_of_data: usize,
    pub latest_year: Option<i32>,
    pub data_points: usize,
}

/// Everything the comparison view shows for one country.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryProfile {
    pub summary: CountrySummary,
    /// National, both-sexes earnings by year.
    pub national: Vec<SeriesPoint>,
    /// Male and female earnings over the country's years.
    pub gender_series: Vec<SeriesPoint>,
    /// Urban and rural earnings over the country's years.
    pub regional_series: Vec<SeriesPoint>,
    pub gender_gap: Option<Gap>,
    pub regional_gap: Option<Gap>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub first: CountryProfile,
    pub second: CountryProfile,
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

impl TidyTable {
    /// Rows of `country`, or "no data" when it has none.
    fn country_rows(&self, country: &str) -> Result<TidyTable> {
        let rows = self.filter(&QueryFilter::new().country(country))?;
        if rows.is_empty() {
            return Err(MissingData::UnknownCountry(country.to_string()).into());
        }
        Ok(rows)
    }

    /// Non-missing earnings of `filter`, labelled by `group`, ascending by year.
    fn series(
        &self,
        filter: &QueryFilter,
        group: impl Fn(&str, &str) -> String,
    ) -> Result<Vec<SeriesPoint>> {
        let mut points: Vec<SeriesPoint> = self
            .filter(filter)?
            .records()?
            .into_iter()
            .filter_map(|record| {
                let earnings = record.earnings()?;
                Some(SeriesPoint {
                    group: group(&record.sex, &record.area_type),
                    year: record.year,
                    earnings,
                })
            })
            .collect();
        points.sort_by(|a, b| a.year.cmp(&b.year).then_with(|| a.group.cmp(&b.group)));
        Ok(points)
    }

    /// Both sides of a `kind` comparison, one point per side and year.
    pub fn earnings_series(
        &self,
        country: &str,
        kind: GapKind,
        years: RangeInclusive<i32>,
    ) -> Result<Vec<SeriesPoint>> {
        let filter = kind.both_sides(country).years(years);
        self.series(&filter, |sex, area| match kind {
            GapKind::Gender => sex.to_string(),
            GapKind::Regional => area.to_string(),
        })
    }

    /// National, both-sexes earnings of `country` by year.
    pub fn national_series(&self, country: &str) -> Result<Vec<SeriesPoint>> {
        let filter = QueryFilter::new()
            .country(country)
            .sex(Sex::Total)
            .area_type(AreaType::National);
        self.series(&filter, |_, _| country.to_string())
    }

    pub fn summary(&self, country: &str) -> Result<CountrySummary> {
        let rows = self.country_rows(country)?;
        let totals = rows.filter(&QueryFilter::new().sex(Sex::Total))?;
        let values: Vec<f64> = totals.earnings()?.into_iter().flatten().collect();
        let years: BTreeSet<i32> = rows.years()?.into_iter().collect();
        Ok(CountrySummary {
            country: country.to_string(),
            average_earnings: mean(&values),
            years_of_data: years.len(),
            latest_year: years.last().copied(),
            data_points: rows.height(),
        })
    }

    /// Earliest and latest year with any row for `country`.
    pub fn year_bounds(&self, country: &str) -> Result<(i32, i32)> {
        let years = self.country_rows(country)?.distinct_years()?;
        match (years.first(), years.last()) {
            (Some(first), Some(last)) => Ok((*first, *last)),
            _ => Err(MissingData::UnknownCountry(country.to_string()).into()),
        }
    }

    pub fn profile(&self, country: &str) -> Result<CountryProfile> {
        let (first, last) = self.year_bounds(country)?;
        Ok(CountryProfile {
            summary: self.summary(country)?,
            national: self.national_series(country)?,
            gender_series: self.earnings_series(country, GapKind::Gender, first..=last)?,
            regional_series: self.earnings_series(country, GapKind::Regional, first..=last)?,
            gender_gap: no_data_as_none(self.latest_gap(country, GapKind::Gender))?,
            regional_gap: no_data_as_none(self.latest_gap(country, GapKind::Regional))?,
        })
    }

    /// Side-by-side profiles of two different countries.
    pub fn compare(&self, first: &str, second: &str) -> Result<Comparison> {
        if first == second {
            return Err(MissingData::SameCountry(first.to_string()).into());
        }
        Ok(Comparison {
            first: self.profile(first)?,
            second: self.profile(second)?,
        })
    }
}
