use crate::error::{Result, StudioError};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Tabular data bound to a chart or fed to the analytics tools
///
/// Cells are kept as the raw text the user entered or imported. Numeric
/// columns are parsed on demand, so a column can hold labels in one chart
/// and numbers in another.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Dataset {
    /// Creates a dataset, padding or truncating every row to the header width
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();
        Dataset { headers, rows }
    }

    /// Parse CSV text into a dataset
    ///
    /// The first line is the header row. Fields may be wrapped in double
    /// quotes, and `""` inside a quoted field stands for a literal quote.
    /// Blank lines are skipped.
    ///
    /// # Arguments
    /// * `text` - CSV content
    ///
    /// # Returns
    /// * `Result<Dataset>` - The parsed dataset, or `InvalidInput` if there is no header row
    ///
    /// # Examples
    /// ```
    /// use chartstudio::dataset::Dataset;
    ///
    /// let data = Dataset::from_csv_str("month,sales\nJan,10\nFeb,12\n").unwrap();
    /// assert_eq!(data.headers, vec!["month", "sales"]);
    /// assert_eq!(data.numeric_column("sales").unwrap(), vec![10.0, 12.0]);
    /// ```
    pub fn from_csv_str(text: &str) -> Result<Self> {
        let lines: Vec<&str> = text
            .lines()
            .map(|l| l.trim_end_matches('\r'))
            .filter(|l| !l.trim().is_empty())
            .collect();
        Self::from_lines(&lines)
    }

    /// Load a dataset from a CSV file on disk
    ///
    /// # Arguments
    /// * `filepath` - Path to the CSV file to load
    ///
    /// # Returns
    /// * `Result<Dataset>` - The loaded dataset or an error
    pub fn from_csv_file(filepath: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(filepath)?;
        let reader = BufReader::new(file);
        let lines: Vec<String> = reader.lines().collect::<std::io::Result<_>>()?;
        let lines: Vec<&str> = lines
            .iter()
            .map(|l| l.trim_end_matches('\r'))
            .filter(|l| !l.trim().is_empty())
            .collect();
        Self::from_lines(&lines)
    }

    fn from_lines(lines: &[&str]) -> Result<Self> {
        let Some((header_line, data_lines)) = lines.split_first() else {
            return Err(StudioError::invalid("CSV input is empty"));
        };

        let headers: Vec<String> = parse_csv_row(header_line)
            .into_iter()
            .map(|h| h.trim().to_string())
            .collect();
        let rows = data_lines.iter().map(|line| parse_csv_row(line)).collect();

        Ok(Dataset::new(headers, rows))
    }

    /// Convert the dataset back to CSV
    ///
    /// Fields containing commas, quotes or newlines are quoted, with inner
    /// quotes doubled.
    pub fn to_csv(&self) -> String {
        let mut csv_content = String::new();
        push_csv_line(&mut csv_content, &self.headers);
        for row in &self.rows {
            push_csv_line(&mut csv_content, row);
        }
        csv_content
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of the first column with the given header
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    fn require_column(&self, name: &str) -> Result<usize> {
        self.column_index(name)
            .ok_or_else(|| StudioError::invalid(format!("Unknown column '{}'", name)))
    }

    /// Raw text of every cell in a column
    pub fn column_text(&self, name: &str) -> Result<Vec<String>> {
        let idx = self.require_column(name)?;
        Ok(self.rows.iter().map(|row| cell(row, idx).to_string()).collect())
    }

    /// Numeric values of a column, skipping cells that do not parse
    pub fn numeric_column(&self, name: &str) -> Result<Vec<f64>> {
        let idx = self.require_column(name)?;
        Ok(self
            .rows
            .iter()
            .filter_map(|row| parse_number(cell(row, idx)))
            .collect())
    }

    /// Numeric values of a column, failing on the first cell that does not parse
    ///
    /// Row numbers in the error message are 1-based and count data rows only.
    pub fn numeric_column_strict(&self, name: &str) -> Result<Vec<f64>> {
        let idx = self.require_column(name)?;
        self.rows
            .iter()
            .enumerate()
            .map(|(r, row)| {
                parse_number(cell(row, idx)).ok_or_else(|| {
                    StudioError::invalid(format!(
                        "Row {} of column '{}' is not a number: '{}'",
                        r + 1,
                        name,
                        cell(row, idx)
                    ))
                })
            })
            .collect()
    }

    /// Rows where both columns hold numbers, as `(x, y)` pairs
    pub fn numeric_pairs(&self, x: &str, y: &str) -> Result<Vec<(f64, f64)>> {
        let xi = self.require_column(x)?;
        let yi = self.require_column(y)?;
        Ok(self
            .rows
            .iter()
            .filter_map(|row| Some((parse_number(cell(row, xi))?, parse_number(cell(row, yi))?)))
            .collect())
    }

    /// Numeric value of one cell, `None` when empty or not a number
    pub fn number_at(&self, row: usize, column: usize) -> Option<f64> {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .and_then(|cell| parse_number(cell))
    }
}

// Rows deserialized from JSON skip `Dataset::new` and may be short
fn cell(row: &[String], idx: usize) -> &str {
    row.get(idx).map(String::as_str).unwrap_or("")
}

/// Parses a cell as a finite number, accepting surrounding whitespace
pub fn parse_number(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn push_csv_line(out: &mut String, fields: &[String]) {
    for (i, value) in fields.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        if value.contains(',') || value.contains('"') || value.contains('\n') {
            let escaped = value.replace('"', "\"\"");
            out.push_str(&format!("\"{}\"", escaped));
        } else {
            out.push_str(value);
        }
    }
    out.push('\n');
}

// Parse a CSV row into a vector of strings
fn parse_csv_row(line: &str) -> Vec<String> {
    let mut result = Vec::new();
    let mut current_field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                if in_quotes && chars.peek() == Some(&'"') {
                    // Escaped quote inside a quoted field
                    current_field.push('"');
                    chars.next();
                } else {
                    in_quotes = !in_quotes;
                }
            }
            ',' if !in_quotes => {
                result.push(std::mem::take(&mut current_field));
            }
            _ => current_field.push(c),
        }
    }

    result.push(current_field);
    result
}
