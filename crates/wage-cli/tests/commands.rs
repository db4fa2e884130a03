use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;
use wage_cli::cli::{ProcessArgs, TableArgs, TrendsArgs};
use wage_cli::commands::{
    NO_DATA, run_compare, run_countries, run_disparity, run_process, run_trends,
};
use wage_model::TidyRecord;
use wage_query::{CachedTable, CsvTableSource, StaticSource, TidyTable};

fn row(country: &str, sex: &str, area: &str, year: i32, earnings: f64) -> TidyRecord {
    TidyRecord {
        country: country.to_string(),
        source: "LFS".to_string(),
        indicator: "Mean earnings".to_string(),
        sex: sex.to_string(),
        area_type: area.to_string(),
        currency_info: "2021 PPP $".to_string(),
        year,
        earnings_ppp: earnings,
        obs_status: String::new(),
        note_indicator: String::new(),
        note_source: String::new(),
    }
}

fn cache() -> CachedTable<StaticSource> {
    let table = TidyTable::from_records(&[
        row("Chad", "Male", "National", 2019, 200.0),
        row("Chad", "Female", "National", 2019, 150.0),
        row("Chad", "Total", "National", 2019, 180.0),
        row("Chad", "Total", "National", 2020, 190.0),
        row("Peru", "Total", "Urban", 2021, 500.0),
        row("Peru", "Total", "Rural", 2021, 400.0),
    ])
    .expect("table");
    CachedTable::new(StaticSource::new(table))
}

fn trends_args(country: &str, from: Option<i32>, to: Option<i32>, json: bool) -> TrendsArgs {
    TrendsArgs {
        country: country.to_string(),
        from,
        to,
        table: TableArgs {
            data: PathBuf::from("unused.csv"),
            json,
        },
    }
}

#[test]
fn countries_json_lists_year_coverage() {
    let output = run_countries(&cache(), true).expect("countries");
    insta::assert_snapshot!(output, @r#"
    [
      {
        "country": "Chad",
        "first_year": 2019,
        "last_year": 2020
      },
      {
        "country": "Peru",
        "first_year": 2021,
        "last_year": 2021
      }
    ]
    "#);
}

#[test]
fn disparity_shows_available_gaps() {
    let output = run_disparity(&cache(), "Chad", false).expect("disparity");
    assert!(output.starts_with("Chad\n"));
    assert!(output.contains("Gender: Male vs Female"));
    assert!(output.contains("25.0%"));
    assert!(output.contains("no data"));
}

#[test]
fn disparity_json_carries_both_kinds() {
    let output = run_disparity(&cache(), "Peru", true).expect("disparity");
    let value: serde_json::Value = serde_json::from_str(&output).expect("json");
    assert!(value["gender"].is_null());
    assert_eq!(value["regional"]["year"], 2021);
    assert_eq!(value["regional"]["percent"], 20.0);
}

#[test]
fn queries_without_answers_print_no_data() {
    let cache = cache();
    assert_eq!(run_disparity(&cache, "Atlantis", false).expect("disparity"), NO_DATA);
    assert_eq!(
        run_trends(&cache, &trends_args("Atlantis", None, None, false)).expect("trends"),
        NO_DATA
    );
    assert_eq!(run_compare(&cache, "Chad", "Chad", true).expect("compare"), NO_DATA);
}

#[test]
fn trends_default_to_country_years() {
    let output =
        run_trends(&cache(), &trends_args("Chad", None, None, true)).expect("trends");
    let value: serde_json::Value = serde_json::from_str(&output).expect("json");
    assert_eq!(value["from"], 2019);
    assert_eq!(value["to"], 2020);
    assert_eq!(value["gender"].as_array().map(Vec::len), Some(1));
    assert_eq!(value["gender_series"].as_array().map(Vec::len), Some(2));
    assert_eq!(value["regional"].as_array().map(Vec::len), Some(0));
}

#[test]
fn trends_reject_inverted_range() {
    let err = run_trends(&cache(), &trends_args("Chad", Some(2021), Some(2019), false))
        .expect_err("inverted range");
    assert!(err.to_string().contains("--from 2021 is after --to 2019"));
}

#[test]
fn compare_renders_both_countries() {
    let output = run_compare(&cache(), "Chad", "Peru", false).expect("compare");
    assert!(output.contains("Chad"));
    assert!(output.contains("Peru"));
    assert!(output.contains("Average earnings (PPP $)"));
    assert!(output.contains("185.00"));
    assert!(output.contains("20.0% (2021)"));
    assert!(output.contains("Chad earnings, Gender:"));
    assert!(output.contains("Peru earnings, Urban-Rural:"));
    assert!(!output.contains("Chad earnings, Urban-Rural:"));
}

#[test]
fn compare_json_carries_profile_series() {
    let output = run_compare(&cache(), "Chad", "Peru", true).expect("compare");
    let value: serde_json::Value = serde_json::from_str(&output).expect("json");
    assert_eq!(value["first"]["gender_series"].as_array().map(Vec::len), Some(2));
    assert_eq!(value["second"]["regional_series"][0]["group"], "Rural");
    assert_eq!(value["second"]["regional_series"][1]["earnings"], 500.0);
}

const RAW_HEADER: &str = "ref_area.label,source.label,indicator.label,sex.label,classif1.label,\
classif2.label,time,obs_value,obs_status.label,note_indicator.label,note_source.label\n";

fn process_args(dir: &TempDir, body: &str) -> ProcessArgs {
    let input = dir.path().join("raw.csv");
    fs::write(&input, format!("{RAW_HEADER}{body}")).expect("write raw");
    ProcessArgs {
        input,
        output: dir.path().join("ilostat_wage.csv"),
        collect_failures: false,
        allow_missing_earnings: false,
    }
}

#[test]
fn processed_file_feeds_queries() {
    let dir = TempDir::new().expect("temp dir");
    let args = process_args(
        &dir,
        "Chad,HIES,Mean earnings,Male,National,Currency: 2021 PPP $,2021,200,,,\n\
Chad,HIES,Mean earnings,Female,National,Currency: 2021 PPP $,2021,170,,,\n",
    );

    let report = run_process(&args).expect("process");
    assert!(report.contains("ilostat_wage.csv"));

    let cache = CachedTable::new(CsvTableSource::new(&args.output));
    let output = run_disparity(&cache, "Chad", true).expect("disparity");
    let value: serde_json::Value = serde_json::from_str(&output).expect("json");
    assert_eq!(value["gender"]["year"], 2021);
    assert_eq!(value["gender"]["percent"], 15.0);
}

#[test]
fn failed_process_writes_nothing() {
    let dir = TempDir::new().expect("temp dir");
    let mut args = process_args(
        &dir,
        "Chad,HIES,Mean earnings,Male,National,PPP,2021,N/A,,,\n\
Chad,HIES,Mean earnings,Female,National,PPP,20x1,170,,,\n",
    );
    args.collect_failures = true;

    let err = run_process(&args).expect_err("bad rows");
    assert!(format!("{err:#}").contains("2 rows"));
    assert!(!args.output.exists());
}
