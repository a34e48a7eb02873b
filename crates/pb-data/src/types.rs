//! Dataset shapes shared by the loader and the frontends.

use serde::{Deserialize, Serialize};

/// Column names the prediction dataset is read with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMap {
    pub entity_key: String,
    pub timestamp: String,
    pub actual_value: String,
    pub predicted_value: String,
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            entity_key: "ticker".to_string(),
            timestamp: "date".to_string(),
            actual_value: "actual_price".to_string(),
            predicted_value: "predicted_price".to_string(),
        }
    }
}

impl ColumnMap {
    pub fn required(&self) -> [&str; 4] {
        [
            &self.entity_key,
            &self.timestamp,
            &self.actual_value,
            &self.predicted_value,
        ]
    }
}

/// Benchmark report, rendered verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl BenchmarkTable {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell at `(row, col)`, empty for ragged rows.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }
}
