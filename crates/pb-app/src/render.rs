//! Presentation-side capabilities a render cycle hands its results to.

use std::collections::BTreeSet;

use pb_core::{ChartSpec, EntityKey};
use pb_data::BenchmarkTable;

use crate::error::AppResult;

/// Offers the available entity keys and reports the user's choice.
pub trait SelectionControl {
    /// `None` when nothing has been chosen yet.
    fn offer_choices(&mut self, keys: &BTreeSet<EntityKey>) -> Option<EntityKey>;
}

/// Draws an actual-vs-predicted line chart.
pub trait ChartRenderer {
    fn render(&mut self, chart: &ChartSpec) -> AppResult<()>;

    /// Empty-state message shown instead of a chart.
    fn render_empty(&mut self, message: &str) -> AppResult<()>;
}

/// Draws the benchmark report.
pub trait TableRenderer {
    fn render_table(&mut self, table: &BenchmarkTable) -> AppResult<()>;
}

/// A selection fixed up front, e.g. from a command-line argument.
#[derive(Debug, Clone)]
pub struct FixedSelection(pub Option<EntityKey>);

impl FixedSelection {
    pub fn new(key: impl Into<EntityKey>) -> Self {
        Self(Some(key.into()))
    }
}

impl SelectionControl for FixedSelection {
    fn offer_choices(&mut self, _keys: &BTreeSet<EntityKey>) -> Option<EntityKey> {
        self.0.clone()
    }
}
