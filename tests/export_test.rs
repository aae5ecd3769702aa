#![cfg(feature = "xlsx")]

use chartstudio::analytics::forecast::exponential_smoothing;
use chartstudio::dataset::Dataset;
use chartstudio::error::StudioError;
use chartstudio::export::{MAX_COLUMNS, dataset_to_xlsx, forecast_to_dataset};

#[test]
fn workbook_is_a_zip_archive() {
    let data = Dataset::from_csv_str("item,qty,note\napples,3,fresh\npears,,\n").unwrap();
    let bytes = dataset_to_xlsx(&data).unwrap();
    assert!(bytes.len() > 100);
    assert_eq!(&bytes[..2], b"PK", "XLSX files are zip archives");
}

#[test]
fn forecast_table_layout() {
    let history = [4.0, 6.0, 8.0];
    let forecast = exponential_smoothing(&history, 0.5, 2).unwrap();
    let table = forecast_to_dataset(&history, &forecast);

    assert_eq!(table.headers, vec!["period", "actual", "fitted", "forecast"]);
    assert_eq!(table.row_count(), 5);
    assert_eq!(table.rows[0], vec!["1", "4", "", ""]);
    assert_eq!(table.rows[1], vec!["2", "6", "4", ""]);
    assert_eq!(table.rows[3], vec!["4", "", "", "6.5"]);
    assert_eq!(table.numeric_column("forecast").unwrap(), vec![6.5, 6.5]);
}

#[test]
fn rows_wider_than_a_worksheet_are_rejected() {
    let wide = Dataset {
        headers: vec!["a".to_string()],
        rows: vec![vec!["1".to_string(); 70_000]],
    };
    assert!(
        matches!(dataset_to_xlsx(&wide), Err(StudioError::InvalidInput(_))),
        "Wide row was written"
    );

    let headers: Vec<String> = (0..=MAX_COLUMNS).map(|c| format!("c{}", c)).collect();
    let too_many = Dataset::new(headers, Vec::new());
    assert!(matches!(dataset_to_xlsx(&too_many), Err(StudioError::InvalidInput(_))));

    let headers: Vec<String> = (0..MAX_COLUMNS).map(|c| format!("c{}", c)).collect();
    assert!(dataset_to_xlsx(&Dataset::new(headers, Vec::new())).is_ok());
}
