//! Error types for the pb-app service layer.

use std::path::PathBuf;

/// Errors surfaced to the presentation layer.
///
/// `DataUnavailable` is fatal for the render cycle. `InvalidSelection` and
/// `EmptySeries` are recoverable: re-prompt the selection or show an empty
/// state. None of them is recovered from implicitly.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Data unavailable ({source_name}): {message}")]
    DataUnavailable {
        source_name: String,
        message: String,
    },

    #[error("Invalid selection: '{key}' is not a known entity key")]
    InvalidSelection { key: String },

    #[error("No data to plot for '{key}'")]
    EmptySeries { key: String },

    #[error("Failed to read config file {path}: {message}")]
    ConfigRead {
        path: PathBuf,
        message: String,
    },

    #[error("Render failed: {message}")]
    Render { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for pb-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn data_unavailable(source_name: impl Into<String>, err: impl std::fmt::Display) -> Self {
        AppError::DataUnavailable {
            source_name: source_name.into(),
            message: err.to_string(),
        }
    }

    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AppError::InvalidSelection { .. } | AppError::EmptySeries { .. }
        )
    }

    /// Short text for a status line or empty-state panel.
    pub fn user_message(&self) -> String {
        match self {
            AppError::DataUnavailable { .. } => "Data unavailable".to_string(),
            AppError::InvalidSelection { key } => {
                format!("'{}' is not in the dataset, pick another entity", key)
            }
            AppError::EmptySeries { key } => format!("Nothing to plot for '{}'", key),
            other => other.to_string(),
        }
    }
}

impl From<pb_core::CoreError> for AppError {
    fn from(err: pb_core::CoreError) -> Self {
        match err {
            pb_core::CoreError::InvalidSelection { key } => AppError::InvalidSelection { key },
            pb_core::CoreError::EmptySeries { key } => AppError::EmptySeries { key },
            other => AppError::data_unavailable("dataset", other),
        }
    }
}

impl From<pb_data::DataError> for AppError {
    fn from(err: pb_data::DataError) -> Self {
        AppError::data_unavailable("dataset", err)
    }
}
