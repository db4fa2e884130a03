//! The in-memory tidy table.
//!
//! [`TidyTable`] wraps a Polars `DataFrame` whose columns follow
//! [`wage_model::schema::COLUMNS`]. It is never mutated after construction;
//! filters return new tables sharing the same column buffers.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use polars::prelude::*;
use wage_model::schema::{self, COUNTRY, ColumnKind, EARNINGS_PPP, YEAR};
use wage_model::TidyRecord;

use crate::error::{QueryError, Result};

fn polars_dtype(kind: ColumnKind) -> DataType {
    match kind {
        ColumnKind::Text => DataType::String,
        ColumnKind::Integer => DataType::Int64,
        ColumnKind::Float => DataType::Float64,
    }
}

/// Polars schema derived from the shared column declaration.
pub fn tidy_schema() -> Schema {
    Schema::from_iter(
        schema::COLUMNS
            .iter()
            .map(|spec| Field::new(spec.tidy.into(), polars_dtype(spec.kind))),
    )
}

#[derive(Debug, Clone)]
pub struct TidyTable {
    df: DataFrame,
}

impl TidyTable {
    /// Wrap a frame, checking that its columns match the tidy schema in
    /// name and order. Numeric columns are cast to their schema types.
    pub fn from_frame(df: DataFrame) -> Result<Self> {
        let names: Vec<&str> = df
            .get_column_names()
            .into_iter()
            .map(PlSmallStr::as_str)
            .collect();
        let expected: Vec<&str> = schema::tidy_headers().collect();
        if names != expected {
            return Err(QueryError::Schema {
                message: format!(
                    "expected columns [{}], found [{}]",
                    expected.join(", "),
                    names.join(", ")
                ),
            });
        }
        let mut df = df;
        for spec in schema::COLUMNS.iter() {
            let dtype = polars_dtype(spec.kind);
            if df.column(spec.tidy)?.dtype() != &dtype {
                let cast = df.column(spec.tidy)?.cast(&dtype)?;
                df.with_column(cast)?;
            }
        }
        Ok(Self { df })
    }

    /// Build a table from cleaned records.
    pub fn from_records(records: &[TidyRecord]) -> Result<Self> {
        let mut columns = Vec::with_capacity(schema::COLUMNS.len());
        for spec in schema::COLUMNS.iter() {
            let name: PlSmallStr = spec.tidy.into();
            let column = match spec.kind {
                ColumnKind::Text => {
                    let values: Vec<&str> = records
                        .iter()
                        .map(|record| record.text(spec.tidy).unwrap_or_default())
                        .collect();
                    Series::new(name, values).into_column()
                }
                ColumnKind::Integer => {
                    let values: Vec<i64> = records.iter().map(|r| i64::from(r.year)).collect();
                    Series::new(name, values).into_column()
                }
                ColumnKind::Float => {
                    let values: Vec<f64> = records.iter().map(|r| r.earnings_ppp).collect();
                    Series::new(name, values).into_column()
                }
            };
            columns.push(column);
        }
        Self::from_frame(DataFrame::new(columns)?)
    }

    /// Read the tidy CSV at `path`.
    pub fn read_csv(path: &Path) -> Result<Self> {
        let load_error = |e: PolarsError| QueryError::Load {
            path: path.to_path_buf(),
            message: e.to_string(),
        };
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_schema_overwrite(Some(Arc::new(tidy_schema())))
            .try_into_reader_with_file_path(Some(path.to_path_buf()))
            .map_err(load_error)?
            .finish()
            .map_err(load_error)?;
        Self::from_frame(df)
    }

    pub fn frame(&self) -> &DataFrame {
        &self.df
    }

    pub fn height(&self) -> usize {
        self.df.height()
    }

    pub fn is_empty(&self) -> bool {
        self.df.height() == 0
    }

    /// Keep the rows matching `predicate`.
    pub(crate) fn filter_expr(&self, predicate: Expr) -> Result<Self> {
        let df = self.df.clone().lazy().filter(predicate).collect()?;
        Ok(Self { df })
    }

    pub(crate) fn text_values(&self, column: &str) -> Result<Vec<String>> {
        let values = self.df.column(column)?.str()?;
        Ok(values
            .into_iter()
            .map(|value| value.unwrap_or_default().to_string())
            .collect())
    }

    pub(crate) fn years(&self) -> Result<Vec<i32>> {
        let values = self.df.column(YEAR)?.i64()?;
        values
            .into_iter()
            .map(|value| {
                value
                    .and_then(|year| i32::try_from(year).ok())
                    .ok_or_else(|| QueryError::Schema {
                        message: format!("invalid {YEAR} value"),
                    })
            })
            .collect()
    }

    /// Earnings per row; null and NaN both read as `None`.
    pub(crate) fn earnings(&self) -> Result<Vec<Option<f64>>> {
        let values = self.df.column(EARNINGS_PPP)?.f64()?;
        Ok(values
            .into_iter()
            .map(|value| value.filter(|v| !v.is_nan()))
            .collect())
    }

    /// Materialize the rows as records.
    pub fn records(&self) -> Result<Vec<TidyRecord>> {
        let text = |column: &str| self.text_values(column);
        let country = text(COUNTRY)?;
        let source = text(schema::SOURCE)?;
        let indicator = text(schema::INDICATOR)?;
        let sex = text(schema::SEX)?;
        let area_type = text(schema::AREA_TYPE)?;
        let currency_info = text(schema::CURRENCY_INFO)?;
        let obs_status = text(schema::OBS_STATUS)?;
        let note_indicator = text(schema::NOTE_INDICATOR)?;
        let note_source = text(schema::NOTE_SOURCE)?;
        let years = self.years()?;
        let earnings = self.earnings()?;

        let mut records = Vec::with_capacity(self.height());
        for idx in 0..self.height() {
            records.push(TidyRecord {
                country: country[idx].clone(),
                source: source[idx].clone(),
                indicator: indicator[idx].clone(),
                sex: sex[idx].clone(),
                area_type: area_type[idx].clone(),
                currency_info: currency_info[idx].clone(),
                year: years[idx],
                earnings_ppp: earnings[idx].unwrap_or(f64::NAN),
                obs_status: obs_status[idx].clone(),
                note_indicator: note_indicator[idx].clone(),
                note_source: note_source[idx].clone(),
            });
        }
        Ok(records)
    }

    /// Distinct countries, sorted.
    pub fn countries(&self) -> Result<Vec<String>> {
        let unique: BTreeSet<String> = self
            .text_values(COUNTRY)?
            .into_iter()
            .filter(|country| !country.is_empty())
            .collect();
        Ok(unique.into_iter().collect())
    }

    /// Distinct years, ascending.
    pub fn distinct_years(&self) -> Result<Vec<i32>> {
        let unique: BTreeSet<i32> = self.years()?.into_iter().collect();
        Ok(unique.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(country: &str, year: i32, earnings: f64) -> TidyRecord {
        TidyRecord {
            country: country.to_string(),
            source: "LFS".to_string(),
            indicator: "Earnings".to_string(),
            sex: "Total".to_string(),
            area_type: "National".to_string(),
            currency_info: "PPP".to_string(),
            year,
            earnings_ppp: earnings,
            obs_status: String::new(),
            note_indicator: String::new(),
            note_source: String::new(),
        }
    }

    #[test]
    fn records_survive_frame_conversion() {
        let input = vec![record("Peru", 2020, 410.5), record("Chad", 2021, f64::NAN)];
        let table = TidyTable::from_records(&input).expect("table");

        let output = table.records().expect("records");

        assert_eq!(output.len(), 2);
        assert_eq!(output[0], input[0]);
        assert_eq!(output[1].country, "Chad");
        assert!(output[1].earnings_ppp.is_nan());
    }

    #[test]
    fn countries_are_sorted_and_distinct() {
        let table = TidyTable::from_records(&[
            record("Peru", 2020, 1.0),
            record("Chad", 2020, 1.0),
            record("Peru", 2021, 1.0),
        ])
        .expect("table");
        assert_eq!(table.countries().expect("countries"), vec!["Chad", "Peru"]);
        assert_eq!(table.distinct_years().expect("years"), vec![2020, 2021]);
    }

    #[test]
    fn reordered_frame_is_rejected() {
        let df = DataFrame::new(vec![
            Series::new("year".into(), vec![2020i64]).into_column(),
            Series::new("country".into(), vec!["Peru"]).into_column(),
        ])
        .expect("frame");
        let err = TidyTable::from_frame(df).expect_err("schema mismatch");
        assert!(matches!(err, QueryError::Schema { .. }));
    }
}
