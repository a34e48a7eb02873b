//! Dataset loading API.

use std::fs;
use std::io::Read;
use std::path::Path;

use pb_core::{PredictionRecord, PredictionTable, Timestamp, parse_timestamp};
use serde_json::Value;
use tracing::debug;

use crate::types::{BenchmarkTable, ColumnMap};
use crate::{DataError, DataResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    Csv,
    Json,
}

impl DatasetFormat {
    /// `.json` files are JSON record arrays; everything else is read as CSV.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => DatasetFormat::Json,
            _ => DatasetFormat::Csv,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DatasetLoader {
    columns: ColumnMap,
}

impl DatasetLoader {
    pub fn new(columns: ColumnMap) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> &ColumnMap {
        &self.columns
    }

    pub fn load_predictions(&self, path: &Path) -> DataResult<PredictionTable> {
        let content = read_source(path)?;
        let table = match DatasetFormat::from_path(path) {
            DatasetFormat::Csv => self.parse_predictions_csv(content.as_bytes())?,
            DatasetFormat::Json => self.parse_predictions_json(&content)?,
        };
        debug!(path = %path.display(), rows = table.len(), "loaded prediction dataset");
        Ok(table)
    }

    pub fn load_benchmark(&self, path: &Path) -> DataResult<BenchmarkTable> {
        let content = read_source(path)?;
        let table = match DatasetFormat::from_path(path) {
            DatasetFormat::Csv => parse_benchmark_csv(content.as_bytes())?,
            DatasetFormat::Json => parse_benchmark_json(&content)?,
        };
        debug!(
            path = %path.display(),
            rows = table.row_count(),
            columns = table.column_count(),
            "loaded benchmark dataset"
        );
        Ok(table)
    }

    /// Header names of a dataset, in file order.
    pub fn read_columns(&self, path: &Path) -> DataResult<Vec<String>> {
        let content = read_source(path)?;
        match DatasetFormat::from_path(path) {
            DatasetFormat::Csv => {
                let mut reader = csv_reader(content.as_bytes());
                Ok(reader.headers()?.iter().map(str::to_string).collect())
            }
            DatasetFormat::Json => Ok(parse_benchmark_json(&content)?.headers),
        }
    }

    pub fn parse_predictions_csv<R: Read>(&self, input: R) -> DataResult<PredictionTable> {
        let mut reader = csv_reader(input);
        let headers = reader.headers()?.clone();

        let position = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| DataError::MissingColumn {
                    column: name.to_string(),
                })
        };
        let key_idx = position(&self.columns.entity_key)?;
        let time_idx = position(&self.columns.timestamp)?;
        let actual_idx = position(&self.columns.actual_value)?;
        let predicted_idx = position(&self.columns.predicted_value)?;

        let mut records = Vec::new();
        for (i, result) in reader.records().enumerate() {
            let record = result?;
            let row = i + 1;
            let cell = |idx: usize| record.get(idx).unwrap_or("");

            records.push(PredictionRecord {
                entity_key: cell(key_idx).to_string(),
                timestamp: parse_time_cell(row, &self.columns.timestamp, cell(time_idx))?,
                actual_value: parse_number_cell(row, &self.columns.actual_value, cell(actual_idx))?,
                predicted_value: parse_number_cell(
                    row,
                    &self.columns.predicted_value,
                    cell(predicted_idx),
                )?,
            });
        }

        Ok(PredictionTable::new(records))
    }

    pub fn parse_predictions_json(&self, content: &str) -> DataResult<PredictionTable> {
        let value: Value = serde_json::from_str(content)?;
        let rows = value.as_array().ok_or_else(|| DataError::Unsupported {
            message: "expected a JSON array of records".to_string(),
        })?;

        let mut records = Vec::with_capacity(rows.len());
        for (i, item) in rows.iter().enumerate() {
            let row = i + 1;
            let field = |name: &str| -> DataResult<String> {
                item.get(name)
                    .filter(|v| !v.is_null())
                    .map(json_cell)
                    .ok_or_else(|| DataError::MissingColumn {
                        column: name.to_string(),
                    })
            };
            // `null` values are blank cells; only a missing key is an error.
            let number = |name: &str| -> DataResult<f64> {
                let value = item.get(name).map(json_cell).ok_or_else(|| {
                    DataError::MissingColumn {
                        column: name.to_string(),
                    }
                })?;
                parse_number_cell(row, name, &value)
            };

            let columns = &self.columns;
            records.push(PredictionRecord {
                entity_key: field(&columns.entity_key)?,
                timestamp: parse_time_cell(row, &columns.timestamp, &field(&columns.timestamp)?)?,
                actual_value: number(&columns.actual_value)?,
                predicted_value: number(&columns.predicted_value)?,
            });
        }

        Ok(PredictionTable::new(records))
    }
}

pub fn parse_benchmark_csv<R: Read>(input: R) -> DataResult<BenchmarkTable> {
    let mut reader = csv_reader(input);
    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut rows: Vec<Vec<String>> = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(BenchmarkTable { headers, rows })
}

/// JSON benchmark: an array of flat objects. Columns are the union of keys in
/// first-seen order.
pub fn parse_benchmark_json(content: &str) -> DataResult<BenchmarkTable> {
    let value: Value = serde_json::from_str(content)?;
    let items = value.as_array().ok_or_else(|| DataError::Unsupported {
        message: "expected a JSON array of records".to_string(),
    })?;

    let mut headers: Vec<String> = Vec::new();
    for item in items {
        let object = item.as_object().ok_or_else(|| DataError::Unsupported {
            message: "benchmark rows must be JSON objects".to_string(),
        })?;
        for key in object.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    let rows: Vec<Vec<String>> = items
        .iter()
        .map(|item| {
            headers
                .iter()
                .map(|h| item.get(h).map(json_cell).unwrap_or_default())
                .collect::<Vec<String>>()
        })
        .collect();

    Ok(BenchmarkTable { headers, rows })
}

fn read_source(path: &Path) -> DataResult<String> {
    if !path.exists() {
        return Err(DataError::NotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(fs::read_to_string(path)?)
}

fn csv_reader<R: Read>(input: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(input)
}

fn json_cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Blank cells read as `NaN` and show up as gaps in the chart.
fn parse_number_cell(row: usize, column: &str, value: &str) -> DataResult<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(f64::NAN);
    }
    trimmed
        .parse::<f64>()
        .map_err(|_| DataError::InvalidValue {
            row,
            column: column.to_string(),
            value: value.to_string(),
        })
}

fn parse_time_cell(row: usize, column: &str, value: &str) -> DataResult<Timestamp> {
    parse_timestamp(value).map_err(|_| DataError::InvalidValue {
        row,
        column: column.to_string(),
        value: value.to_string(),
    })
}
