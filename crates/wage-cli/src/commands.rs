//! Subcommand implementations.
//!
//! Query commands take a [`CachedTable`] so tests can run them over an
//! in-memory table. Each returns the text to print.

use std::time::Instant;

use anyhow::{Context, Result, bail};
use serde::Serialize;
use tracing::{info, info_span};

use wage_query::{
    CachedTable, Gap, GapKind, QueryError, SeriesPoint, TableSource, TidyTable, no_data_as_none,
};
use wage_transform::{FailurePolicy, MissingEarnings, ProcessOptions, process};

use crate::cli::{ProcessArgs, TrendsArgs};
use crate::summary::{
    render_comparison, render_countries, render_disparity, render_failures,
    render_process_report, render_trends,
};

/// Printed when a query has no single answer.
pub const NO_DATA: &str = "No data available";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryCoverage {
    pub country: String,
    pub first_year: i32,
    pub last_year: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisparityReport {
    pub country: String,
    pub gender: Option<Gap>,
    pub regional: Option<Gap>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendsReport {
    pub country: String,
    pub from: i32,
    pub to: i32,
    pub gender: Vec<Gap>,
    pub regional: Vec<Gap>,
    pub gender_series: Vec<SeriesPoint>,
    pub regional_series: Vec<SeriesPoint>,
}

pub fn process_options(args: &ProcessArgs) -> ProcessOptions {
    let failure_policy = if args.collect_failures {
        FailurePolicy::CollectAll
    } else {
        FailurePolicy::AbortOnFirst
    };
    let missing_earnings = if args.allow_missing_earnings {
        MissingEarnings::AsNan
    } else {
        MissingEarnings::Reject
    };
    ProcessOptions::new(&args.input, &args.output)
        .with_failure_policy(failure_policy)
        .with_missing_earnings(missing_earnings)
}

pub fn run_process(args: &ProcessArgs) -> Result<String> {
    let options = process_options(args);
    match process(&options) {
        Ok(report) => Ok(render_process_report(&report)),
        Err(error) => {
            let failures = error.row_failures();
            if failures.len() > 1 {
                eprintln!("{}", render_failures(failures));
            }
            Err(error).with_context(|| format!("process {}", args.input.display()))
        }
    }
}

pub fn run_countries<S: TableSource>(cache: &CachedTable<S>, json: bool) -> Result<String> {
    let _span = info_span!("countries").entered();
    let table = load(cache)?;
    let mut coverage = Vec::new();
    for country in table.countries()? {
        let (first_year, last_year) = table.year_bounds(&country)?;
        coverage.push(CountryCoverage {
            country,
            first_year,
            last_year,
        });
    }
    info!(country_count = coverage.len(), "listed countries");
    if json {
        to_json(&coverage)
    } else {
        Ok(render_countries(&coverage))
    }
}

pub fn run_disparity<S: TableSource>(
    cache: &CachedTable<S>,
    country: &str,
    json: bool,
) -> Result<String> {
    let _span = info_span!("disparity", country).entered();
    let table = load(cache)?;
    let report = answer(|| {
        table.year_bounds(country)?;
        Ok(DisparityReport {
            country: country.to_string(),
            gender: no_data_as_none(table.latest_gap(country, GapKind::Gender))?,
            regional: no_data_as_none(table.latest_gap(country, GapKind::Regional))?,
        })
    })?;
    match report {
        Some(report) => render(&report, json, render_disparity),
        None => Ok(NO_DATA.to_string()),
    }
}

pub fn run_trends<S: TableSource>(cache: &CachedTable<S>, args: &TrendsArgs) -> Result<String> {
    let country = args.country.as_str();
    let _span = info_span!("trends", country).entered();
    let table = load(cache)?;
    let Some((first, last)) = answer(|| table.year_bounds(country))? else {
        return Ok(NO_DATA.to_string());
    };
    let from = args.from.unwrap_or(first);
    let to = args.to.unwrap_or(last);
    if from > to {
        bail!("--from {from} is after --to {to}");
    }
    let report = TrendsReport {
        country: country.to_string(),
        from,
        to,
        gender: table.gap_trend(country, GapKind::Gender, from..=to)?,
        regional: table.gap_trend(country, GapKind::Regional, from..=to)?,
        gender_series: table.earnings_series(country, GapKind::Gender, from..=to)?,
        regional_series: table.earnings_series(country, GapKind::Regional, from..=to)?,
    };
    render(&report, args.table.json, render_trends)
}

pub fn run_compare<S: TableSource>(
    cache: &CachedTable<S>,
    first: &str,
    second: &str,
    json: bool,
) -> Result<String> {
    let _span = info_span!("compare", first, second).entered();
    let table = load(cache)?;
    match answer(|| table.compare(first, second))? {
        Some(comparison) => render(&comparison, json, render_comparison),
        None => Ok(NO_DATA.to_string()),
    }
}

fn load<S: TableSource>(cache: &CachedTable<S>) -> Result<&TidyTable> {
    let start = Instant::now();
    let table = cache.get().context("load tidy table")?;
    info!(
        row_count = table.height(),
        duration_ms = start.elapsed().as_millis(),
        "tidy table ready"
    );
    Ok(table)
}

/// Run a query, mapping "no data" to `None`.
fn answer<T>(query: impl FnOnce() -> wage_query::Result<T>) -> Result<Option<T>> {
    match query() {
        Ok(value) => Ok(Some(value)),
        Err(QueryError::NoData(reason)) => {
            info!(%reason, "query has no answer");
            Ok(None)
        }
        Err(error) => Err(error.into()),
    }
}

fn render<T: Serialize>(
    value: &T,
    json: bool,
    table: impl FnOnce(&T) -> String,
) -> Result<String> {
    if json {
        to_json(value)
    } else {
        Ok(table(value))
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("serialize JSON output")
}
