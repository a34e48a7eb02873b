//! Dataset sources for a render cycle.

use std::path::{Path, PathBuf};

use pb_core::PredictionTable;
use pb_data::{BenchmarkTable, DashboardConfig, DatasetLoader};
use tracing::{info, warn};

use crate::error::{AppError, AppResult};

/// Where a render cycle gets its tables from. Sources are read-only and may
/// be asked to load again on every cycle.
pub trait DataSource {
    fn load_predictions(&self) -> AppResult<PredictionTable>;

    fn load_benchmark(&self) -> AppResult<BenchmarkTable>;
}

/// Files named by a [`DashboardConfig`].
#[derive(Debug, Clone)]
pub struct FileSource {
    predictions_path: PathBuf,
    benchmark_path: PathBuf,
    loader: DatasetLoader,
}

impl FileSource {
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            predictions_path: config.predictions_path.clone(),
            benchmark_path: config.benchmark_path.clone(),
            loader: DatasetLoader::new(config.columns.clone()),
        }
    }

    pub fn predictions_path(&self) -> &Path {
        &self.predictions_path
    }

    pub fn benchmark_path(&self) -> &Path {
        &self.benchmark_path
    }

    pub fn loader(&self) -> &DatasetLoader {
        &self.loader
    }

    pub fn prediction_columns(&self) -> AppResult<Vec<String>> {
        self.loader
            .read_columns(&self.predictions_path)
            .map_err(|e| unavailable(&self.predictions_path, e))
    }
}

impl DataSource for FileSource {
    fn load_predictions(&self) -> AppResult<PredictionTable> {
        let table = self
            .loader
            .load_predictions(&self.predictions_path)
            .map_err(|e| unavailable(&self.predictions_path, e))?;
        info!(
            path = %self.predictions_path.display(),
            rows = table.len(),
            "prediction dataset loaded"
        );
        Ok(table)
    }

    fn load_benchmark(&self) -> AppResult<BenchmarkTable> {
        let table = self
            .loader
            .load_benchmark(&self.benchmark_path)
            .map_err(|e| unavailable(&self.benchmark_path, e))?;
        info!(
            path = %self.benchmark_path.display(),
            rows = table.row_count(),
            "benchmark dataset loaded"
        );
        Ok(table)
    }
}

fn unavailable(path: &Path, err: pb_data::DataError) -> AppError {
    warn!(path = %path.display(), error = %err, "dataset could not be loaded");
    AppError::data_unavailable(path.display().to_string(), err)
}

/// Tables already in memory. Loading never fails.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    pub predictions: PredictionTable,
    pub benchmark: BenchmarkTable,
}

impl DataSource for InMemorySource {
    fn load_predictions(&self) -> AppResult<PredictionTable> {
        Ok(self.predictions.clone())
    }

    fn load_benchmark(&self) -> AppResult<BenchmarkTable> {
        Ok(self.benchmark.clone())
    }
}
