//! Shared application service layer for predboard.
//!
//! This crate provides a unified interface for both CLI and GUI frontends:
//! dataset sources, the render-cycle pipeline, the collaborator traits the
//! frontends implement, and queries over aligned charts.

pub mod config_service;
pub mod cycle_service;
pub mod error;
pub mod query;
pub mod render;
pub mod source;
pub mod stage;

// Re-export key types for convenience
pub use config_service::{ConfigOverrides, resolve_config};
pub use cycle_service::{
    CycleOutcome, prepare_chart, run_benchmark_cycle, run_prediction_cycle,
    run_prediction_cycle_with_progress,
};
pub use error::{AppError, AppResult};
pub use query::{SeriesSummary, format_timestamp, list_entity_keys, summarize_chart, write_chart_csv};
pub use render::{ChartRenderer, FixedSelection, SelectionControl, TableRenderer};
pub use source::{DataSource, FileSource, InMemorySource};
pub use stage::{CycleEvent, CycleStage};
