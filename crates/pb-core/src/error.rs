use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Invalid selection: entity key '{key}' is not present in the dataset")]
    InvalidSelection { key: String },

    #[error("Nothing to render: no rows for entity key '{key}'")]
    EmptySeries { key: String },

    #[error("Invalid timestamp '{value}'")]
    InvalidTimestamp { value: String },
}

impl CoreError {
    /// Selection and empty-series errors are signals for the presentation
    /// layer (re-prompt, show empty state), not faults.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            CoreError::InvalidSelection { .. } | CoreError::EmptySeries { .. }
        )
    }
}
