//! Tests for loading and saving delimited files

use gridcalc::prelude::*;
use gridcalc::CsvError;
use pretty_assertions::assert_eq;
use std::fs;

#[test]
fn test_load_evaluate_save() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("budget.csv");
    fs::write(&input, "Rent,900\nFood,350.5\n\nTotal,SUM(B1..B2)\n").unwrap();

    let mut sheet = Spreadsheet::open(&input).unwrap();
    assert_eq!((sheet.grid().rows(), sheet.grid().cols()), (3, 2));
    assert_eq!(sheet.display_value(3, 2), "1250.5");

    sheet.set(4, 1, "Per week").unwrap();
    sheet.set(4, 2, "B3/4").unwrap();

    let output = dir.path().join("budget_out.csv");
    sheet.save_csv(&output).unwrap();
    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "Rent,900\nFood,350.5\nTotal,SUM(B1..B2)\nPer week,B3/4\n"
    );

    let mut reloaded = Spreadsheet::default();
    reloaded.load_csv(&output).unwrap();
    assert_eq!(reloaded.display_value(4, 2), "312.625");
}

#[test]
fn test_failed_load_keeps_grid() {
    let dir = tempfile::tempdir().unwrap();
    let mut sheet = Spreadsheet::default();
    sheet.set(1, 1, "keep").unwrap();

    let result = sheet.load_csv(dir.path().join("missing.csv"));
    assert!(matches!(result, Err(CsvError::Io(_))));
    assert_eq!(sheet.get(1, 1), Some("keep"));
}
