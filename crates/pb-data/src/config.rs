//! Dashboard configuration file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::DataResult;
use crate::types::ColumnMap;

pub const DEFAULT_BENCHMARK_PATH: &str = "benchmark_results.csv";
pub const DEFAULT_PREDICTIONS_PATH: &str = "stock_predictions.csv";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub benchmark_path: PathBuf,
    pub predictions_path: PathBuf,
    pub columns: ColumnMap,
    pub labels: LabelConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            benchmark_path: PathBuf::from(DEFAULT_BENCHMARK_PATH),
            predictions_path: PathBuf::from(DEFAULT_PREDICTIONS_PATH),
            columns: ColumnMap::default(),
            labels: LabelConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    pub x_label: String,
    pub y_label: String,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            x_label: pb_core::chart::DEFAULT_X_LABEL.to_string(),
            y_label: pb_core::chart::DEFAULT_Y_LABEL.to_string(),
        }
    }
}

impl DashboardConfig {
    /// Make relative dataset paths relative to `base_dir`.
    pub fn resolve_paths(mut self, base_dir: &Path) -> Self {
        if self.benchmark_path.is_relative() {
            self.benchmark_path = base_dir.join(&self.benchmark_path);
        }
        if self.predictions_path.is_relative() {
            self.predictions_path = base_dir.join(&self.predictions_path);
        }
        self
    }
}

/// Load a YAML config. Dataset paths resolve against the config's directory.
pub fn load_config(path: &Path) -> DataResult<DashboardConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: DashboardConfig = serde_yaml::from_str(&content)?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    Ok(config.resolve_paths(base_dir))
}

pub fn save_config(path: &Path, config: &DashboardConfig) -> DataResult<()> {
    let content = serde_yaml::to_string(config)?;
    std::fs::write(path, content)?;
    Ok(())
}
