//! Behavior tests for loading price files from disk.

use std::io::Write;

use stockview_core::{render_table, CsvLoader, LoadError, ValidationError};
use tempfile::NamedTempFile;

fn write_csv(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".csv")
        .tempfile()
        .expect("temp file");
    file.write_all(contents.as_bytes()).expect("write fixture");
    file
}

#[test]
fn when_yahoo_export_is_loaded_all_columns_are_kept() {
    // Given: a file in the layout yfinance writes with `to_csv`
    let file = write_csv(
        "Date,Open,High,Low,Close,Volume,Dividends,Stock Splits\n\
         2024-01-02 00:00:00-05:00,187.15,188.44,183.885,185.64,82488700,0.0,0.0\n\
         2024-01-03 00:00:00-05:00,184.22,185.88,183.43,184.25,58414500,0.24,0.0\n",
    );

    // When: it is loaded
    let table = CsvLoader::load(file.path()).expect("file should load");

    // Then: every row and optional column survives
    assert_eq!(table.len(), 2);
    assert!(table.has_volume());
    assert!(table.has_dividends());
    assert!(table.has_stock_splits());
    assert_eq!(table.rows[1].dividends, Some(0.24));

    // And: rendering normalizes the dates
    let rendered = render_table(&table);
    assert!(rendered.contains("2024-01-02"), "{rendered}");
    assert!(!rendered.contains("00:00:00"), "{rendered}");
}

#[test]
fn when_dates_use_us_notation_they_render_as_iso() {
    let file = write_csv(
        "Date,Open,High,Low,Close,Adj Close,Volume\n\
         1/2/2024,10,11,9,10.5,10.4,1000\n",
    );

    let table = CsvLoader::load(file.path()).expect("file should load");
    let rendered = render_table(&table);

    assert!(rendered.contains("2024-01-02"), "{rendered}");
    assert!(rendered.contains("Adj Close"), "{rendered}");
    assert!(rendered.contains("10.400"), "{rendered}");
}

#[test]
fn when_a_number_is_malformed_the_load_fails_with_its_location() {
    let file = write_csv(
        "Date,Open,High,Low,Close\n\
         2024-01-02,10,11,9,10.5\n\
         2024-01-03,10,eleven,9,10.5\n",
    );

    let error = CsvLoader::load(file.path()).expect_err("malformed file must fail");

    match error {
        LoadError::InvalidNumber { row, column, value } => {
            assert_eq!(row, 2);
            assert_eq!(column, "High");
            assert_eq!(value, "eleven");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn when_a_date_is_unreadable_no_partial_table_is_returned() {
    let file = write_csv("Date,Open,High,Low,Close\nsoon,10,11,9,10.5\n");

    let error = CsvLoader::load(file.path()).expect_err("bad date must fail");

    assert!(matches!(
        error,
        LoadError::InvalidRow {
            row: 1,
            source: ValidationError::InvalidDate { .. }
        }
    ));
    assert!(error.to_string().contains("soon"));
}

#[test]
fn when_rows_are_ragged_the_csv_error_is_reported() {
    let file = write_csv("Date,Open,High,Low,Close\n2024-01-02,10,11\n");

    let error = CsvLoader::load(file.path()).expect_err("ragged file must fail");

    assert!(matches!(error, LoadError::Csv(_)));
}

#[test]
fn when_file_is_missing_the_path_is_named() {
    let error = CsvLoader::load("/definitely/not/here.csv").expect_err("missing file");
    assert_eq!(error.to_string(), "file not found: /definitely/not/here.csv");
}
