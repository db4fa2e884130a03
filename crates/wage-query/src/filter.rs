//! Row filters over the tidy table.

use std::ops::RangeInclusive;

use polars::prelude::{Expr, col, lit};
use serde::{Deserialize, Serialize};
use wage_model::schema::{AREA_TYPE, COUNTRY, SEX, YEAR};
use wage_model::{AreaType, Sex};

use crate::error::Result;
use crate::table::TidyTable;

/// Exact-match criteria. Unset criteria match every row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryFilter {
    pub country: Option<String>,
    /// Any of these sexes; empty means all.
    pub sexes: Vec<Sex>,
    /// Any of these area types; empty means all.
    pub area_types: Vec<AreaType>,
    /// Inclusive year range.
    pub years: Option<RangeInclusive<i32>>,
}

impl QueryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    #[must_use]
    pub fn sex(mut self, sex: Sex) -> Self {
        self.sexes.push(sex);
        self
    }

    #[must_use]
    pub fn area_type(mut self, area_type: AreaType) -> Self {
        self.area_types.push(area_type);
        self
    }

    #[must_use]
    pub fn year(self, year: i32) -> Self {
        self.years(year..=year)
    }

    #[must_use]
    pub fn years(mut self, years: RangeInclusive<i32>) -> Self {
        self.years = Some(years);
        self
    }

    /// Combined predicate, or `None` when the filter is empty.
    fn predicate(&self) -> Option<Expr> {
        let mut parts = Vec::new();
        if let Some(country) = &self.country {
            parts.push(col(COUNTRY).eq(lit(country.as_str())));
        }
        if let Some(expr) = any_of(SEX, self.sexes.iter().map(Sex::as_str)) {
            parts.push(expr);
        }
        if let Some(expr) = any_of(AREA_TYPE, self.area_types.iter().map(AreaType::as_str)) {
            parts.push(expr);
        }
        if let Some(years) = &self.years {
            parts.push(
                col(YEAR)
                    .gt_eq(lit(i64::from(*years.start())))
                    .and(col(YEAR).lt_eq(lit(i64::from(*years.end())))),
            );
        }
        parts.into_iter().reduce(Expr::and)
    }
}

fn any_of<'a>(column: &str, values: impl Iterator<Item = &'a str>) -> Option<Expr> {
    values
        .map(|value| col(column).eq(lit(value)))
        .reduce(Expr::or)
}

impl TidyTable {
    /// Rows matching every criterion of `filter`.
    pub fn filter(&self, filter: &QueryFilter) -> Result<TidyTable> {
        match filter.predicate() {
            Some(predicate) => self.filter_expr(predicate),
            None => Ok(self.clone()),
        }
    }
}
