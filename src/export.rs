#![cfg(feature = "xlsx")]

use crate::analytics::forecast::Forecast;
use crate::dataset::{Dataset, parse_number};
use crate::error::{Result, StudioError};
use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};

/// Worksheet limits of the XLSX format
pub const MAX_ROWS: usize = 1_048_576;
pub const MAX_COLUMNS: usize = 16_384;

fn xlsx_err(e: XlsxError) -> StudioError {
    StudioError::Export(format!("XLSX export failed: {}", e))
}

fn column_index(c: usize) -> Result<u16> {
    u16::try_from(c)
        .ok()
        .filter(|&c| (c as usize) < MAX_COLUMNS)
        .ok_or_else(|| {
            StudioError::invalid(format!(
                "Column {} is beyond the {} columns a worksheet holds",
                c + 1,
                MAX_COLUMNS
            ))
        })
}

/// Convert a dataset to XLSX format
///
/// Writes the headers on the first row and the data below. Cells that parse
/// as numbers are written as numbers so they stay usable in formulas; the
/// rest are written as text.
///
/// # Arguments
/// * `dataset` - Reference to the dataset to convert
///
/// # Returns
/// * `Result<Vec<u8>>` - XLSX file content as bytes or an error
pub fn dataset_to_xlsx(dataset: &Dataset) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let mut worksheet = Worksheet::new();
    worksheet.set_name("Data").map_err(xlsx_err)?;

    if dataset.rows.len() >= MAX_ROWS {
        return Err(StudioError::invalid(format!(
            "{} rows plus the header exceed the {} rows a worksheet holds",
            dataset.rows.len(),
            MAX_ROWS
        )));
    }

    for (c, header) in dataset.headers.iter().enumerate() {
        worksheet
            .write_string(0, column_index(c)?, header)
            .map_err(xlsx_err)?;
    }
    for (r, row) in dataset.rows.iter().enumerate() {
        let r = (r + 1) as u32;
        for (c, cell) in row.iter().enumerate() {
            let c = column_index(c)?;
            match parse_number(cell) {
                Some(v) => worksheet.write_number(r, c, v).map_err(xlsx_err)?,
                None if cell.is_empty() => continue,
                None => worksheet.write_string(r, c, cell).map_err(xlsx_err)?,
            };
        }
    }

    workbook.push_worksheet(worksheet);
    workbook.save_to_buffer().map_err(xlsx_err)
}

/// Lays a forecast out as a table of period, actual, fitted and forecast values
pub fn forecast_to_dataset(history: &[f64], forecast: &Forecast) -> Dataset {
    let headers = vec![
        "period".to_string(),
        "actual".to_string(),
        "fitted".to_string(),
        "forecast".to_string(),
    ];
    let mut rows: Vec<Vec<String>> = history
        .iter()
        .zip(&forecast.fitted)
        .enumerate()
        .map(|(t, (actual, fitted))| {
            vec![
                (t + 1).to_string(),
                actual.to_string(),
                fitted.map(|f| f.to_string()).unwrap_or_default(),
                String::new(),
            ]
        })
        .collect();
    let offset = history.len();
    rows.extend(forecast.forecast.iter().enumerate().map(|(h, value)| {
        vec![
            (offset + h + 1).to_string(),
            String::new(),
            String::new(),
            value.to_string(),
        ]
    }));
    Dataset::new(headers, rows)
}
