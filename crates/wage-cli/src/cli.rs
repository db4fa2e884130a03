//! CLI argument definitions for the wage statistics tool.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use wage_model::DEFAULT_TIDY_PATH;
use wage_transform::DEFAULT_RAW_PATH;

#[derive(Parser)]
#[command(
    name = "wage",
    version,
    about = "ILOSTAT wage statistics - tidy the raw export and query wage gaps",
    long_about = "Tidy the ILOSTAT monthly earnings export and query it.\n\n\
                  `process` turns the raw CSV into the tidy table; the other\n\
                  subcommands answer gender and urban-rural gap questions from it."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Transform the raw export into the tidy wage table.
    Process(ProcessArgs),

    /// List the countries in the tidy table with their year coverage.
    Countries(TableArgs),

    /// Latest gender and urban-rural wage gaps for a country.
    Disparity(CountryArgs),

    /// Gap and earnings trends for a country over a year range.
    Trends(TrendsArgs),

    /// Compare two countries side by side.
    Compare(CompareArgs),
}

#[derive(Parser)]
pub struct ProcessArgs {
    /// Raw ILOSTAT export to read.
    #[arg(long = "input", value_name = "PATH", default_value = DEFAULT_RAW_PATH)]
    pub input: PathBuf,

    /// Tidy CSV to write.
    #[arg(long = "output", value_name = "PATH", default_value = DEFAULT_TIDY_PATH)]
    pub output: PathBuf,

    /// Check every row and report all failures instead of stopping at the first.
    #[arg(long = "collect-failures")]
    pub collect_failures: bool,

    /// Accept empty observation values, writing them as NaN.
    ///
    /// By default an empty `obs_value` fails the row.
    #[arg(long = "allow-missing-earnings")]
    pub allow_missing_earnings: bool,
}

/// Options shared by every query subcommand.
#[derive(Args)]
pub struct TableArgs {
    /// Tidy CSV to query.
    #[arg(long = "data", value_name = "PATH", default_value = DEFAULT_TIDY_PATH)]
    pub data: PathBuf,

    /// Print JSON instead of tables.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct CountryArgs {
    /// Country name as it appears in the tidy table.
    #[arg(value_name = "COUNTRY")]
    pub country: String,

    #[command(flatten)]
    pub table: TableArgs,
}

#[derive(Parser)]
pub struct TrendsArgs {
    #[arg(value_name = "COUNTRY")]
    pub country: String,

    /// First year to include (default: earliest year for the country).
    #[arg(long = "from", value_name = "YEAR")]
    pub from: Option<i32>,

    /// Last year to include (default: latest year for the country).
    #[arg(long = "to", value_name = "YEAR")]
    pub to: Option<i32>,

    #[command(flatten)]
    pub table: TableArgs,
}

#[derive(Parser)]
pub struct CompareArgs {
    #[arg(value_name = "FIRST")]
    pub first: String,

    #[arg(value_name = "SECOND")]
    pub second: String,

    #[command(flatten)]
    pub table: TableArgs,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
