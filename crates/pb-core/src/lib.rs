//! pb-core: prediction dataset model and the pure filter/align pipeline.
//!
//! Contains:
//! - record (entity keys, timestamps, prediction rows and tables)
//! - filter (per-entity row selection + distinct key enumeration)
//! - align (actual/predicted series alignment into a chart spec)
//! - chart (render-ready chart bundle)
//! - error (shared error types)

pub mod align;
pub mod chart;
pub mod error;
pub mod filter;
pub mod record;

pub use align::{align, align_with_labels};
pub use chart::{ChartLabels, ChartSpec};
pub use error::{CoreError, CoreResult};
pub use filter::{distinct_keys, filter};
pub use record::*;
