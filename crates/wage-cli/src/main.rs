//! Wage statistics CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;
use wage_cli::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use wage_cli::commands::{run_compare, run_countries, run_disparity, run_process, run_trends};
use wage_cli::logging::{LogConfig, LogFormat, init_logging};
use wage_query::{CachedTable, CsvTableSource};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let result = match &cli.command {
        Command::Process(args) => run_process(args),
        Command::Countries(args) => {
            run_countries(&CachedTable::new(CsvTableSource::new(&args.data)), args.json)
        }
        Command::Disparity(args) => run_disparity(
            &CachedTable::new(CsvTableSource::new(&args.table.data)),
            &args.country,
            args.table.json,
        ),
        Command::Trends(args) => {
            run_trends(&CachedTable::new(CsvTableSource::new(&args.table.data)), args)
        }
        Command::Compare(args) => run_compare(
            &CachedTable::new(CsvTableSource::new(&args.table.data)),
            &args.first,
            &args.second,
            args.table.json,
        ),
    };
    let exit_code = match result {
        Ok(output) => {
            println!("{output}");
            0
        }
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
