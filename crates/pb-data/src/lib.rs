//! pb-data: dataset loading for the prediction and benchmark reports.

pub mod config;
pub mod loader;
pub mod types;

pub use config::{DashboardConfig, LabelConfig, load_config, save_config};
pub use loader::{DatasetFormat, DatasetLoader, parse_benchmark_csv, parse_benchmark_json};
pub use types::*;

use std::path::PathBuf;

pub type DataResult<T> = Result<T, DataError>;

#[derive(thiserror::Error, Debug)]
pub enum DataError {
    #[error("Dataset not found: {path}")]
    NotFound { path: PathBuf },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Missing required column '{column}'")]
    MissingColumn { column: String },

    #[error("Row {row}: invalid value '{value}' in column '{column}'")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },

    #[error("Unsupported dataset layout: {message}")]
    Unsupported { message: String },
}
