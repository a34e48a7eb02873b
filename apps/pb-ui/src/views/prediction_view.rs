use egui::Color32;
use egui_plot::{Legend, Line, Plot, PlotPoints};
use pb_app::{AppResult, ChartRenderer, CycleOutcome, DataSource, FileSource, SelectionControl};
use pb_core::{ChartSpec, EntityKey};
use pb_data::LabelConfig;
use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::time_axis::{format_plot_tick, format_plot_x, to_plot_x};

const ACTUAL_COLOR: Color32 = Color32::from_rgb(31, 119, 180);
const PREDICTED_COLOR: Color32 = Color32::from_rgb(255, 127, 14);

#[derive(Default)]
pub struct PredictionView {
    loaded_from: Option<PathBuf>,
    keys: BTreeSet<EntityKey>,
    columns: Vec<String>,
    used_columns: Vec<String>,
    load_error: Option<(String, String)>,
    selection: TickerSelection,
    plot: PlotPanel,
    needs_cycle: bool,
}

impl PredictionView {
    pub fn invalidate(&mut self) {
        self.loaded_from = None;
    }

    pub fn show(&mut self, ui: &mut egui::Ui, source: &FileSource, labels: &LabelConfig) {
        ui.heading("Price Predictions");
        ui.label(
            egui::RichText::new(source.predictions_path().display().to_string())
                .weak()
                .small(),
        );
        ui.separator();

        if self.loaded_from.as_deref() != Some(source.predictions_path()) {
            self.refresh_keys(source);
        }

        if let Some((headline, detail)) = &self.load_error {
            ui.colored_label(egui::Color32::RED, headline);
            ui.label(detail);
            return;
        }

        self.show_columns(ui);

        if self.keys.is_empty() {
            ui.label("No entities in the prediction dataset");
            return;
        }

        ui.horizontal(|ui| {
            ui.label("Select Company Ticker:");
            if self.selection.show(ui, &self.keys) {
                self.needs_cycle = true;
            }
        });

        ui.separator();

        if self.needs_cycle {
            self.needs_cycle = false;
            self.run_cycle(source, labels);
        }

        self.plot.show(ui);
    }

    fn show_columns(&self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new(format!("Columns ({})", self.columns.len()))
            .id_salt("prediction_columns")
            .default_open(false)
            .show(ui, |ui| {
                for column in &self.columns {
                    if self.used_columns.contains(column) {
                        ui.label(egui::RichText::new(column).strong());
                    } else {
                        ui.label(egui::RichText::new(column).weak());
                    }
                }
            });
    }

    fn refresh_keys(&mut self, source: &FileSource) {
        self.loaded_from = Some(source.predictions_path().to_path_buf());
        self.load_error = None;
        self.keys.clear();
        self.used_columns = source
            .loader()
            .columns()
            .required()
            .iter()
            .map(|c| c.to_string())
            .collect();
        // A failed header read is reported by the table load below.
        self.columns = source.prediction_columns().unwrap_or_default();

        match source.load_predictions() {
            Ok(table) => {
                self.keys = pb_core::distinct_keys(&table);
                self.needs_cycle = self.selection.current.is_some();
                if !self.needs_cycle {
                    self.plot.content = PlotContent::Placeholder(
                        "Select a ticker to compare actual and predicted prices".to_string(),
                    );
                }
            }
            Err(e) => {
                self.load_error = Some((e.user_message(), e.to_string()));
            }
        }
    }

    fn run_cycle(&mut self, source: &FileSource, labels: &LabelConfig) {
        let result =
            pb_app::run_prediction_cycle(source, &mut self.selection, &mut self.plot, labels);

        match result {
            Ok(CycleOutcome::Rendered { .. }) => {}
            Ok(CycleOutcome::NoSelection { .. }) => {
                self.plot.content = PlotContent::Placeholder("No ticker selected".to_string());
            }
            // The empty state was already handed to the plot panel.
            Err(pb_app::AppError::EmptySeries { .. }) => {}
            Err(e) => {
                self.plot.content = PlotContent::Error {
                    headline: e.user_message(),
                    detail: e.to_string(),
                };
            }
        }
    }
}

/// ComboBox-backed entity picker.
#[derive(Default)]
struct TickerSelection {
    current: Option<EntityKey>,
}

impl TickerSelection {
    /// Returns `true` when the user picked a different key.
    fn show(&mut self, ui: &mut egui::Ui, keys: &BTreeSet<EntityKey>) -> bool {
        let before = self.current.clone();
        let selected_text = self.current.as_deref().unwrap_or("Choose...").to_string();

        egui::ComboBox::from_id_salt("ticker_selector")
            .selected_text(selected_text)
            .show_ui(ui, |ui| {
                for key in keys {
                    ui.selectable_value(&mut self.current, Some(key.clone()), key);
                }
            });

        self.current != before
    }
}

impl SelectionControl for TickerSelection {
    fn offer_choices(&mut self, _keys: &BTreeSet<EntityKey>) -> Option<EntityKey> {
        self.current.clone()
    }
}

enum PlotContent {
    Placeholder(String),
    Chart(ChartSpec),
    Empty(String),
    Error { headline: String, detail: String },
}

impl Default for PlotContent {
    fn default() -> Self {
        PlotContent::Placeholder(String::new())
    }
}

#[derive(Default)]
struct PlotPanel {
    content: PlotContent,
}

impl ChartRenderer for PlotPanel {
    fn render(&mut self, chart: &ChartSpec) -> AppResult<()> {
        self.content = PlotContent::Chart(chart.clone());
        Ok(())
    }

    fn render_empty(&mut self, message: &str) -> AppResult<()> {
        self.content = PlotContent::Empty(message.to_string());
        Ok(())
    }
}

impl PlotPanel {
    fn show(&self, ui: &mut egui::Ui) {
        match &self.content {
            PlotContent::Placeholder(message) => {
                ui.label(message);
            }
            PlotContent::Empty(message) => {
                ui.centered_and_justified(|ui| {
                    ui.label(egui::RichText::new(message).italics());
                });
            }
            PlotContent::Error { headline, detail } => {
                ui.colored_label(egui::Color32::RED, headline);
                ui.label(detail);
            }
            PlotContent::Chart(chart) => show_chart(ui, chart),
        }
    }
}

/// Runs of present values; a blank (`NaN`) value ends a run.
fn line_segments(chart: &ChartSpec, ys: &[f64]) -> Vec<Vec<[f64; 2]>> {
    let mut segments = Vec::new();
    let mut current = Vec::new();
    for (t, y) in chart.x_axis().iter().zip(ys) {
        if y.is_nan() {
            if !current.is_empty() {
                segments.push(std::mem::take(&mut current));
            }
        } else {
            current.push([to_plot_x(*t), *y]);
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

fn series_lines(chart: &ChartSpec, ys: &[f64], name: &str, color: Color32) -> Vec<Line> {
    line_segments(chart, ys)
        .into_iter()
        .map(|points| Line::new(PlotPoints::from(points)).name(name).color(color))
        .collect()
}

fn show_chart(ui: &mut egui::Ui, chart: &ChartSpec) {
    let labels = chart.labels();
    ui.label(egui::RichText::new(&labels.title).strong());

    let actual = series_lines(chart, chart.actual_y(), &labels.actual_name, ACTUAL_COLOR);
    let predicted = series_lines(
        chart,
        chart.predicted_y(),
        &labels.predicted_name,
        PREDICTED_COLOR,
    );

    let y_label = labels.y_label.clone();
    Plot::new("prediction_plot")
        .legend(Legend::default())
        .x_axis_label(labels.x_label.clone())
        .y_axis_label(labels.y_label.clone())
        .x_axis_formatter(|mark, _range| format_plot_tick(mark.value))
        .label_formatter(move |name, value| {
            let when = format_plot_x(value.x);
            if name.is_empty() {
                format!("{}\n{}: {:.2}", when, y_label, value.y)
            } else {
                format!("{}\n{}\n{}: {:.2}", name, when, y_label, value.y)
            }
        })
        .show(ui, |plot_ui| {
            for line in actual.into_iter().chain(predicted) {
                plot_ui.line(line);
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use pb_core::{PredictionRecord, PredictionTable, align, filter, parse_timestamp};

    fn chart(values: &[f64]) -> ChartSpec {
        let base = parse_timestamp("2024-01-01").unwrap();
        let table: PredictionTable = values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                PredictionRecord::new("AAA", base + chrono::Duration::days(i as i64), *v, *v)
            })
            .collect();
        align(&filter(&table, "AAA").unwrap()).unwrap()
    }

    #[test]
    fn gaps_split_the_line() {
        let chart = chart(&[1.0, f64::NAN, 3.0, 4.0]);
        let segments = line_segments(&chart, chart.actual_y());
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].len(), 1);
        assert_eq!(segments[1].len(), 2);
        assert_eq!(segments[1][0][1], 3.0);
    }

    #[test]
    fn leading_and_trailing_gaps_are_dropped() {
        let chart = chart(&[f64::NAN, 2.0, 3.0, f64::NAN]);
        let segments = line_segments(&chart, chart.predicted_y());
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].len(), 2);
    }

    #[test]
    fn all_blank_series_has_no_segments() {
        let chart = chart(&[f64::NAN, f64::NAN]);
        assert!(line_segments(&chart, chart.actual_y()).is_empty());
    }
}
