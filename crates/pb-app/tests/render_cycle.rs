//! Render-cycle tests with recording collaborators.

use std::path::PathBuf;

use pb_app::*;
use pb_core::{ChartSpec, PredictionRecord, PredictionTable, parse_timestamp};
use pb_data::{BenchmarkTable, DashboardConfig, LabelConfig};

#[derive(Default)]
struct RecordingRenderer {
    charts: Vec<ChartSpec>,
    empty_messages: Vec<String>,
    tables: Vec<BenchmarkTable>,
}

impl ChartRenderer for RecordingRenderer {
    fn render(&mut self, chart: &ChartSpec) -> AppResult<()> {
        self.charts.push(chart.clone());
        Ok(())
    }

    fn render_empty(&mut self, message: &str) -> AppResult<()> {
        self.empty_messages.push(message.to_string());
        Ok(())
    }
}

impl TableRenderer for RecordingRenderer {
    fn render_table(&mut self, table: &BenchmarkTable) -> AppResult<()> {
        self.tables.push(table.clone());
        Ok(())
    }
}

fn reference_source() -> InMemorySource {
    let rows = [
        ("AAA", "2024-01-01", 10.0, 11.0),
        ("AAA", "2024-01-02", 12.0, 11.5),
        ("BBB", "2024-01-01", 5.0, 5.2),
    ];
    InMemorySource {
        predictions: rows
            .iter()
            .map(|(k, d, a, p)| PredictionRecord::new(*k, parse_timestamp(d).unwrap(), *a, *p))
            .collect(),
        benchmark: BenchmarkTable {
            headers: vec!["model".to_string(), "mae".to_string()],
            rows: vec![vec!["lstm".to_string(), "1.2".to_string()]],
        },
    }
}

#[test]
fn renders_selected_entity() {
    let source = reference_source();
    let mut renderer = RecordingRenderer::default();
    let mut selection = FixedSelection::new("AAA");

    let outcome = run_prediction_cycle(
        &source,
        &mut selection,
        &mut renderer,
        &LabelConfig::default(),
    )
    .unwrap();

    assert_eq!(
        outcome,
        CycleOutcome::Rendered {
            key: "AAA".to_string(),
            points: 2
        }
    );
    assert_eq!(renderer.charts.len(), 1);
    let chart = &renderer.charts[0];
    assert_eq!(chart.actual_y(), &[10.0, 12.0]);
    assert_eq!(chart.predicted_y(), &[11.0, 11.5]);
    assert_eq!(chart.labels().x_label, "Date");
    assert_eq!(chart.labels().y_label, "Price");
}

#[test]
fn no_selection_renders_nothing() {
    let source = reference_source();
    let mut renderer = RecordingRenderer::default();
    let mut selection = FixedSelection(None);

    let outcome = run_prediction_cycle(
        &source,
        &mut selection,
        &mut renderer,
        &LabelConfig::default(),
    )
    .unwrap();

    assert_eq!(outcome, CycleOutcome::NoSelection { available: 2 });
    assert!(renderer.charts.is_empty());
}

#[test]
fn unknown_key_is_invalid_selection() {
    let source = reference_source();
    let mut renderer = RecordingRenderer::default();
    let mut selection = FixedSelection::new("ZZZ");

    let err = run_prediction_cycle(
        &source,
        &mut selection,
        &mut renderer,
        &LabelConfig::default(),
    )
    .unwrap_err();

    assert!(matches!(err, AppError::InvalidSelection { ref key } if key == "ZZZ"));
    assert!(err.is_recoverable());
    assert!(renderer.charts.is_empty());
    assert!(renderer.empty_messages.is_empty());
}

#[test]
fn empty_dataset_shows_empty_state() {
    let source = InMemorySource {
        predictions: PredictionTable::default(),
        benchmark: BenchmarkTable::default(),
    };
    let mut renderer = RecordingRenderer::default();
    let mut selection = FixedSelection::new("AAA");

    let err = run_prediction_cycle(
        &source,
        &mut selection,
        &mut renderer,
        &LabelConfig::default(),
    )
    .unwrap_err();

    assert!(matches!(err, AppError::EmptySeries { .. }));
    assert!(err.is_recoverable());
    assert_eq!(renderer.empty_messages.len(), 1);
    assert!(renderer.charts.is_empty());
}

#[test]
fn missing_file_is_data_unavailable() {
    let config = DashboardConfig {
        predictions_path: PathBuf::from("/definitely/not/here/stock_predictions.csv"),
        ..DashboardConfig::default()
    };
    let source = FileSource::new(&config);
    let mut renderer = RecordingRenderer::default();
    let mut selection = FixedSelection::new("AAA");

    let err = run_prediction_cycle(
        &source,
        &mut selection,
        &mut renderer,
        &LabelConfig::default(),
    )
    .unwrap_err();

    assert!(matches!(err, AppError::DataUnavailable { .. }));
    assert!(!err.is_recoverable());
    assert_eq!(err.user_message(), "Data unavailable");
}

#[test]
fn stages_arrive_in_pipeline_order() {
    let source = reference_source();
    let mut renderer = RecordingRenderer::default();
    let mut selection = FixedSelection::new("BBB");
    let mut stages = Vec::new();

    run_prediction_cycle_with_progress(
        &source,
        &mut selection,
        &mut renderer,
        &LabelConfig::default(),
        Some(&mut |event: CycleEvent| stages.push(event.stage)),
    )
    .unwrap();

    assert_eq!(
        stages,
        vec![
            CycleStage::LoadingData,
            CycleStage::EnumeratingKeys,
            CycleStage::AwaitingSelection,
            CycleStage::Filtering,
            CycleStage::Aligning,
            CycleStage::Rendering,
            CycleStage::Completed,
        ]
    );
}

#[test]
fn repeated_cycles_are_identical() {
    let source = reference_source();
    let mut renderer = RecordingRenderer::default();

    for _ in 0..2 {
        let mut selection = FixedSelection::new("AAA");
        run_prediction_cycle(
            &source,
            &mut selection,
            &mut renderer,
            &LabelConfig::default(),
        )
        .unwrap();
    }

    assert_eq!(renderer.charts[0], renderer.charts[1]);
}

#[test]
fn benchmark_passthrough() {
    let source = reference_source();
    let mut renderer = RecordingRenderer::default();

    let rows = run_benchmark_cycle(&source, &mut renderer).unwrap();

    assert_eq!(rows, 1);
    assert_eq!(renderer.tables[0], source.benchmark);
}
