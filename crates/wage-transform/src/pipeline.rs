//! Batch orchestration: load, clean every row, write.
//!
//! The run is all-or-nothing. Every row is cleaned before the output file is
//! touched, and any failing row stops the run without writing anything.
//!
//! # Example
//!
//! ```ignore
//! use wage_transform::pipeline::{ProcessOptions, process};
//!
//! let report = process(&ProcessOptions::default())?;
//! println!("Total records processed: {}", report.records);
//! ```

use std::path::PathBuf;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{info, info_span, warn};
use wage_ingest::load_raw;
use wage_model::{DEFAULT_TIDY_PATH, RawRecord, TidyRecord};

use crate::clean::{CleanOptions, clean_row_with};
use crate::error::{Result, RowFailure, TransformError};
use crate::normalization::MissingEarnings;
use crate::write::write_tidy;

/// Raw export file name shipped alongside the project.
pub const DEFAULT_RAW_PATH: &str = "data-raw/EAR_4MTH_SEX_GEO_CUR_NB_A-filtered-2025-06-01.csv";

/// What the run does when a row fails to convert.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailurePolicy {
    /// Stop at the first failing row.
    #[default]
    AbortOnFirst,
    /// Clean every row and report all failures.
    CollectAll,
}

/// Outcome of cleaning one row.
pub type RowOutcome = std::result::Result<TidyRecord, RowFailure>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub failure_policy: FailurePolicy,
    pub missing_earnings: MissingEarnings,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_RAW_PATH),
            output: PathBuf::from(DEFAULT_TIDY_PATH),
            failure_policy: FailurePolicy::default(),
            missing_earnings: MissingEarnings::default(),
        }
    }
}

impl ProcessOptions {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    #[must_use]
    pub fn with_missing_earnings(mut self, missing: MissingEarnings) -> Self {
        self.missing_earnings = missing;
        self
    }

    fn clean_options(&self) -> CleanOptions {
        CleanOptions {
            missing_earnings: self.missing_earnings,
        }
    }
}

/// Summary of a successful run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessReport {
    /// Rows read, cleaned and written (always equal).
    pub records: usize,
    pub input: PathBuf,
    pub output: PathBuf,
    pub duration_ms: u128,
}

/// Clean rows lazily, tagging each outcome with its 1-based data row number.
pub fn clean_rows(
    rows: Vec<RawRecord>,
    options: CleanOptions,
) -> impl Iterator<Item = RowOutcome> {
    rows.into_iter().enumerate().map(move |(idx, raw)| {
        clean_row_with(raw, options).map_err(|error| RowFailure {
            row: idx + 1,
            error,
        })
    })
}

/// Aggregate row outcomes under `policy`, preserving input order.
pub fn collect_outcomes(
    outcomes: impl Iterator<Item = RowOutcome>,
    policy: FailurePolicy,
) -> Result<Vec<TidyRecord>> {
    match policy {
        FailurePolicy::AbortOnFirst => outcomes
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(TransformError::TypeConversion),
        FailurePolicy::CollectAll => {
            let mut records = Vec::new();
            let mut failures = Vec::new();
            for outcome in outcomes {
                match outcome {
                    Ok(record) => records.push(record),
                    Err(failure) => {
                        warn!(row = failure.row, field = failure.error.field, "{failure}");
                        failures.push(failure);
                    }
                }
            }
            if failures.is_empty() {
                Ok(records)
            } else {
                Err(TransformError::Failures { failures })
            }
        }
    }
}

/// Run the whole transform: load the raw export, clean every row, write the
/// tidy file. Returns the number of records processed.
pub fn process(options: &ProcessOptions) -> Result<ProcessReport> {
    let span = info_span!(
        "transform",
        input = %options.input.display(),
        output = %options.output.display()
    );
    let _guard = span.enter();
    let start = Instant::now();

    let raw = load_raw(&options.input)?;
    let input_count = raw.len();
    let records = collect_outcomes(
        clean_rows(raw, options.clean_options()),
        options.failure_policy,
    )?;
    debug_assert_eq!(records.len(), input_count);

    write_tidy(&records, &options.output)?;
    let report = ProcessReport {
        records: records.len(),
        input: options.input.clone(),
        output: options.output.clone(),
        duration_ms: start.elapsed().as_millis(),
    };
    info!(
        record_count = report.records,
        duration_ms = report.duration_ms,
        "transform complete"
    );
    Ok(report)
}
