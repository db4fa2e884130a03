//! End-to-end tests for the raw-to-tidy transform.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;
use wage_transform::{
    ConversionReason, FailurePolicy, MissingEarnings, ProcessOptions, TransformError, process,
};

const HEADER: &str = "ref_area.label,source.label,indicator.label,sex.label,classif1.label,\
classif2.label,time,obs_value,obs_status.label,note_indicator.label,note_source.label\n";

fn write_raw(dir: &TempDir, body: &str) -> PathBuf {
    let path = dir.path().join("raw.csv");
    let mut contents = "\u{feff}".to_string();
    contents.push_str(HEADER);
    contents.push_str(body);
    fs::write(&path, contents).expect("write raw");
    path
}

#[test]
fn transforms_rows_into_tidy_file() {
    let dir = TempDir::new().expect("temp dir");
    let input = write_raw(
        &dir,
        "Chad,HIES,Mean earnings,Male,Area type: Rural,Currency: 2021 PPP $,2021,120.5,,,\n\
Chad,HIES,Mean earnings,Female,National,Currency: 2021 PPP $,2021,98,Unreliable,,\"Repository: ILO-STATISTICS, Micro data processing\"\n",
    );
    let output = dir.path().join("ilostat_wage.csv");

    let report = process(&ProcessOptions::new(&input, &output)).expect("process");

    assert_eq!(report.records, 2);
    let written = fs::read_to_string(&output).expect("read output");
    insta::assert_snapshot!(written, @r#"
    country,source,indicator,sex,area_type,currency_info,year,earnings_ppp,obs_status,note_indicator,note_source
    Chad,HIES,Mean earnings,Male,Rural,Currency: 2021 PPP $,2021,120.5,,,
    Chad,HIES,Mean earnings,Female,National,Currency: 2021 PPP $,2021,98.0,Unreliable,,"Repository: ILO-STATISTICS, Micro data processing"
    "#);
}

#[test]
fn output_row_count_matches_input() {
    let dir = TempDir::new().expect("temp dir");
    let mut body = String::new();
    for year in 2000..2025 {
        for sex in ["Male", "Female", "Total"] {
            body.push_str(&format!(
                "Peru,LFS,Earnings,{sex},Area type: Urban,PPP,{year},{}.25,,,\n",
                year - 1900
            ));
        }
    }
    let input = write_raw(&dir, &body);
    let output = dir.path().join("tidy.csv");

    let report = process(&ProcessOptions::new(&input, &output)).expect("process");

    assert_eq!(report.records, 75);
    let written = fs::read_to_string(&output).expect("read output");
    assert_eq!(written.lines().count(), 76);
    assert!(written.lines().skip(1).all(|line| line.contains(",Urban,")));
}

#[test]
fn non_numeric_observation_aborts_without_output() {
    let dir = TempDir::new().expect("temp dir");
    let input = write_raw(
        &dir,
        "Chad,HIES,Earnings,Male,National,PPP,2021,120.5,,,\n\
Chad,HIES,Earnings,Female,National,PPP,2021,N/A,,,\n",
    );
    let output = dir.path().join("tidy.csv");

    let err = process(&ProcessOptions::new(&input, &output)).expect_err("N/A aborts");

    match &err {
        TransformError::TypeConversion(failure) => {
            assert_eq!(failure.row, 2);
            assert_eq!(failure.error.field, "earnings_ppp");
            assert_eq!(failure.error.reason, ConversionReason::NotANumber);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!output.exists());
}

#[test]
fn collect_all_lists_failures_and_writes_nothing() {
    let dir = TempDir::new().expect("temp dir");
    let input = write_raw(
        &dir,
        "Chad,HIES,Earnings,Male,National,PPP,20x1,120.5,,,\n\
Chad,HIES,Earnings,Female,National,PPP,2021,,,,\n\
Chad,HIES,Earnings,Total,National,PPP,2021,110,,,\n",
    );
    let output = dir.path().join("tidy.csv");
    let options =
        ProcessOptions::new(&input, &output).with_failure_policy(FailurePolicy::CollectAll);

    let err = process(&options).expect_err("collect all");

    let rows: Vec<usize> = err.row_failures().iter().map(|f| f.row).collect();
    assert_eq!(rows, vec![1, 2]);
    assert!(!output.exists());
}

#[test]
fn empty_observation_becomes_nan_when_allowed() {
    let dir = TempDir::new().expect("temp dir");
    let input = write_raw(&dir, "Chad,HIES,Earnings,Female,National,PPP,2021,,,,\n");
    let output = dir.path().join("tidy.csv");
    let options =
        ProcessOptions::new(&input, &output).with_missing_earnings(MissingEarnings::AsNan);

    let report = process(&options).expect("process");

    assert_eq!(report.records, 1);
    let written = fs::read_to_string(&output).expect("read output");
    assert!(written.lines().nth(1).expect("data row").contains(",2021,NaN,"));
}

#[test]
fn missing_header_is_malformed_input() {
    let dir = TempDir::new().expect("temp dir");
    let input = dir.path().join("raw.csv");
    fs::write(&input, "ref_area.label,time\nChad,2021\n").expect("write raw");
    let output = dir.path().join("tidy.csv");

    let err = process(&ProcessOptions::new(&input, &output)).expect_err("malformed");

    match err {
        TransformError::Ingest(inner) => assert!(inner.is_malformed()),
        other => panic!("unexpected error: {other}"),
    }
    assert!(!output.exists());
}
