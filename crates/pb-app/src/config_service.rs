//! Dashboard config loading with command-line overrides.

use std::path::{Path, PathBuf};

use pb_data::DashboardConfig;
use tracing::debug;

use crate::error::{AppError, AppResult};

/// Paths given directly on the command line or in a file picker.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub predictions_path: Option<PathBuf>,
    pub benchmark_path: Option<PathBuf>,
}

/// Load `config_path` if given, otherwise start from defaults, then apply
/// overrides.
pub fn resolve_config(
    config_path: Option<&Path>,
    overrides: &ConfigOverrides,
) -> AppResult<DashboardConfig> {
    let mut config = match config_path {
        Some(path) => pb_data::load_config(path).map_err(|e| AppError::ConfigRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?,
        None => DashboardConfig::default(),
    };

    if let Some(path) = &overrides.predictions_path {
        config.predictions_path = path.clone();
    }
    if let Some(path) = &overrides.benchmark_path {
        config.benchmark_path = path.clone();
    }

    debug!(
        predictions = %config.predictions_path.display(),
        benchmark = %config.benchmark_path.display(),
        "dashboard config resolved"
    );
    Ok(config)
}
