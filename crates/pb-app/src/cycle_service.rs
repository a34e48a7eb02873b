//! One render cycle: load, enumerate keys, take a selection, filter, align,
//! render. Nothing is retained between cycles.

use std::time::Instant;

use pb_core::{ChartLabels, ChartSpec, EntityKey, PredictionTable};
use pb_data::LabelConfig;
use tracing::{debug, warn};

use crate::error::{AppError, AppResult};
use crate::render::{ChartRenderer, SelectionControl, TableRenderer};
use crate::source::DataSource;
use crate::stage::{CycleEvent, CycleStage};

/// How a prediction cycle ended when it did not fail.
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    Rendered { key: EntityKey, points: usize },
    NoSelection { available: usize },
}

fn emit(
    progress_cb: &mut Option<&mut dyn FnMut(CycleEvent)>,
    stage: CycleStage,
    started: Instant,
    message: Option<String>,
) {
    if let Some(cb) = progress_cb.as_deref_mut() {
        cb(CycleEvent {
            stage,
            elapsed_wall_s: started.elapsed().as_secs_f64(),
            message,
        });
    }
}

fn chart_labels(key: &str, labels: &LabelConfig) -> ChartLabels {
    ChartLabels::default()
        .with_title(key)
        .with_axes(&labels.x_label, &labels.y_label)
}

/// Filter `table` to `key` and align the result into a chart.
pub fn prepare_chart(
    table: &PredictionTable,
    key: &str,
    labels: &LabelConfig,
) -> AppResult<ChartSpec> {
    let series = pb_core::filter(table, key)?;
    Ok(pb_core::align_with_labels(&series, chart_labels(key, labels))?)
}

pub fn run_prediction_cycle(
    source: &dyn DataSource,
    selection: &mut dyn SelectionControl,
    renderer: &mut dyn ChartRenderer,
    labels: &LabelConfig,
) -> AppResult<CycleOutcome> {
    run_prediction_cycle_with_progress(source, selection, renderer, labels, None)
}

/// Run a prediction cycle and stream stage events.
///
/// An empty series is drawn as an empty state and still returned as
/// `AppError::EmptySeries`.
pub fn run_prediction_cycle_with_progress(
    source: &dyn DataSource,
    selection: &mut dyn SelectionControl,
    renderer: &mut dyn ChartRenderer,
    labels: &LabelConfig,
    mut progress_cb: Option<&mut dyn FnMut(CycleEvent)>,
) -> AppResult<CycleOutcome> {
    let started = Instant::now();

    emit(&mut progress_cb, CycleStage::LoadingData, started, None);
    let table = source.load_predictions()?;

    emit(&mut progress_cb, CycleStage::EnumeratingKeys, started, None);
    let keys = pb_core::distinct_keys(&table);
    debug!(rows = table.len(), keys = keys.len(), "prediction table ready");

    emit(
        &mut progress_cb,
        CycleStage::AwaitingSelection,
        started,
        Some(format!("{} entities", keys.len())),
    );
    let Some(key) = selection.offer_choices(&keys) else {
        return Ok(CycleOutcome::NoSelection {
            available: keys.len(),
        });
    };

    emit(&mut progress_cb, CycleStage::Filtering, started, Some(key.clone()));
    let series = pb_core::filter(&table, &key).map_err(|e| {
        warn!(key = %key, "selection not present in dataset");
        AppError::from(e)
    })?;

    emit(&mut progress_cb, CycleStage::Aligning, started, None);
    let chart = match pb_core::align_with_labels(&series, chart_labels(&key, labels)) {
        Ok(chart) => chart,
        Err(e) => {
            let err = AppError::from(e);
            warn!(key = %key, "nothing to render");
            renderer.render_empty(&err.user_message())?;
            return Err(err);
        }
    };

    emit(&mut progress_cb, CycleStage::Rendering, started, None);
    renderer.render(&chart)?;

    emit(&mut progress_cb, CycleStage::Completed, started, None);
    Ok(CycleOutcome::Rendered {
        key,
        points: chart.len(),
    })
}

/// Benchmark passthrough: load and hand the table to the renderer.
pub fn run_benchmark_cycle(
    source: &dyn DataSource,
    renderer: &mut dyn TableRenderer,
) -> AppResult<usize> {
    let table = source.load_benchmark()?;
    renderer.render_table(&table)?;
    Ok(table.row_count())
}
