//! Workbook input tests
//!
//! Small xlsx files are written with rust_xlsxwriter into a temp directory,
//! then read back through the calamine loader.

use chrono::NaiveDate;
use je_benford::data::{CellValue, DataLoader};
use je_benford::{run, AnalysisConfig, InputError};
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};
use std::path::{Path, PathBuf};

const AMOUNTS: [f64; 5] = [125.5, 310.0, 1_840.25, 47.0, 912.75];

/// Two sheets: "Ledger" (dated amounts) first, then "Vendors".
fn write_workbook(dir: &Path) -> PathBuf {
    let mut workbook = Workbook::new();
    let date_format = Format::new().set_num_format("yyyy-mm-dd");

    let ledger = workbook.add_worksheet();
    ledger.set_name("Ledger").unwrap();
    ledger.write_string(0, 0, "Posted").unwrap();
    ledger.write_string(0, 1, "Amount").unwrap();
    for (i, amount) in AMOUNTS.iter().enumerate() {
        let row = i as u32 + 1;
        let posted = ExcelDateTime::from_ymd(2024, 1, i as u8 + 1).unwrap();
        ledger
            .write_datetime_with_format(row, 0, &posted, &date_format)
            .unwrap();
        ledger.write_number(row, 1, *amount).unwrap();
    }

    let vendors = workbook.add_worksheet();
    vendors.set_name("Vendors").unwrap();
    vendors.write_string(0, 0, "Vendor").unwrap();
    vendors.write_string(0, 1, "Total").unwrap();
    vendors.write_string(1, 0, "Acme").unwrap();
    vendors.write_number(1, 1, 2_000.0).unwrap();
    vendors.write_string(2, 0, "Globex").unwrap();
    vendors.write_number(2, 1, 350.0).unwrap();

    let path = dir.join("je_samples.xlsx");
    workbook.save(&path).unwrap();
    path
}

fn day(d: u32) -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, d)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

#[test]
fn test_load_first_sheet() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_workbook(dir.path());

    let table = DataLoader::new(&path).load().unwrap();
    assert_eq!(table.row_count(), 5);
    assert_eq!(table.column_count(), 2);

    let posted = table.column("Posted").unwrap();
    assert_eq!(posted.values()[0], CellValue::DateTime(day(1)));
    assert_eq!(posted.values()[4], CellValue::DateTime(day(5)));

    let amount = table.column("Amount").unwrap();
    assert_eq!(amount.numeric_values(), AMOUNTS.to_vec());
}

#[test]
fn test_load_named_sheet() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_workbook(dir.path());

    let table = DataLoader::new(&path)
        .with_sheet(Some("Vendors".to_string()))
        .load()
        .unwrap();
    assert_eq!(table.row_count(), 2);
    assert_eq!(
        table.column("Vendor").unwrap().values()[1],
        CellValue::text("Globex")
    );
    assert_eq!(
        table.column("Total").unwrap().numeric_values(),
        vec![2_000.0, 350.0]
    );
}

#[test]
fn test_missing_sheet() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_workbook(dir.path());

    let err = DataLoader::new(&path)
        .with_sheet(Some("Nope".to_string()))
        .load()
        .unwrap_err();
    match err {
        InputError::SheetNotFound(name) => assert_eq!(name, "Nope"),
        other => panic!("expected SheetNotFound, got {other:?}"),
    }
}

#[test]
fn test_run_on_workbook() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_workbook(dir.path());

    let outcome = run(&AnalysisConfig::new(&path, dir.path().join("out"))).unwrap();
    let summary = &outcome.summary;
    assert_eq!(summary.date_columns(), vec!["Posted"]);
    assert_eq!(summary.numeric_columns(), vec!["Amount"]);

    let dates = &summary.dates[0];
    assert_eq!(dates.parsed_count, 5);
    assert_eq!(dates.min, Some(day(1)));
    assert_eq!(dates.max, Some(day(5)));

    let analyzed: Vec<&str> = outcome
        .benford
        .results
        .iter()
        .map(|r| r.column.as_str())
        .collect();
    assert_eq!(analyzed, vec!["Amount"]);
}
