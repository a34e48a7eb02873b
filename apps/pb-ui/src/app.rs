use crate::views::{BenchmarkView, PredictionView};
use egui_file_dialog::{DialogMode, FileDialog};
use pb_app::{ConfigOverrides, FileSource};
use pb_data::DashboardConfig;
use std::path::PathBuf;
use tracing::info;

pub struct PredboardApp {
    config: DashboardConfig,
    config_path: Option<PathBuf>,
    source: FileSource,
    file_dialog: FileDialog,
    file_dialog_action: Option<FileDialogAction>,
    last_directory: Option<PathBuf>,
    section: Section,
    benchmark_view: BenchmarkView,
    prediction_view: PredictionView,
    status_message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Section {
    Benchmark,
    Predictions,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum FileDialogAction {
    OpenConfig,
    OpenPredictions,
    OpenBenchmark,
}

impl PredboardApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        config: DashboardConfig,
        config_path: Option<PathBuf>,
    ) -> Self {
        let source = FileSource::new(&config);
        let last_directory = config_path
            .as_ref()
            .and_then(|p| p.parent())
            .map(|p| p.to_path_buf());

        Self {
            config,
            config_path,
            source,
            file_dialog: FileDialog::new(),
            file_dialog_action: None,
            last_directory,
            section: Section::Benchmark,
            benchmark_view: BenchmarkView::default(),
            prediction_view: PredictionView::default(),
            status_message: None,
        }
    }

    fn apply_config(&mut self, config: DashboardConfig) {
        self.source = FileSource::new(&config);
        self.config = config;
        self.benchmark_view.invalidate();
        self.prediction_view.invalidate();
    }

    fn open_config(&mut self, path: PathBuf) {
        match pb_app::resolve_config(Some(&path), &ConfigOverrides::default()) {
            Ok(config) => {
                info!(path = %path.display(), "dashboard config loaded");
                self.remember_directory(&path);
                self.config_path = Some(path);
                self.apply_config(config);
                self.status_message = None;
            }
            Err(e) => {
                self.status_message = Some(format!("Failed to load config: {}", e));
            }
        }
    }

    fn set_predictions_path(&mut self, path: PathBuf) {
        self.remember_directory(&path);
        let mut config = self.config.clone();
        config.predictions_path = path;
        self.apply_config(config);
    }

    fn set_benchmark_path(&mut self, path: PathBuf) {
        self.remember_directory(&path);
        let mut config = self.config.clone();
        config.benchmark_path = path;
        self.apply_config(config);
    }

    fn remember_directory(&mut self, path: &std::path::Path) {
        if let Some(parent) = path.parent() {
            self.last_directory = Some(parent.to_path_buf());
        }
    }

    fn open_dialog(&mut self, action: FileDialogAction) {
        self.file_dialog_action = Some(action);
        let initial_dir = self.last_directory.as_ref().and_then(|p| p.to_str());
        let _ = self
            .file_dialog
            .open(DialogMode::SelectFile, true, initial_dir);
    }
}

impl eframe::App for PredboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Open Config").clicked() {
                    self.open_dialog(FileDialogAction::OpenConfig);
                }
                if ui.button("Open Predictions").clicked() {
                    self.open_dialog(FileDialogAction::OpenPredictions);
                }
                if ui.button("Open Benchmark").clicked() {
                    self.open_dialog(FileDialogAction::OpenBenchmark);
                }

                ui.separator();

                if ui.button("Reload").clicked() {
                    self.benchmark_view.invalidate();
                    self.prediction_view.invalidate();
                }

                if let Some(path) = &self.config_path {
                    ui.separator();
                    ui.label(egui::RichText::new(path.display().to_string()).weak());
                }
            });
        });

        self.file_dialog.update(ctx);
        if let Some(path) = self.file_dialog.take_selected() {
            match self.file_dialog_action.take() {
                Some(FileDialogAction::OpenConfig) => self.open_config(path.to_path_buf()),
                Some(FileDialogAction::OpenPredictions) => {
                    self.set_predictions_path(path.to_path_buf())
                }
                Some(FileDialogAction::OpenBenchmark) => self.set_benchmark_path(path.to_path_buf()),
                None => {}
            }
        }

        egui::SidePanel::left("sections")
            .default_width(200.0)
            .show(ctx, |ui| {
                ui.heading("Dashboard Sections");
                ui.separator();
                ui.radio_value(&mut self.section, Section::Benchmark, "Benchmark Results");
                ui.radio_value(&mut self.section, Section::Predictions, "Price Predictions");
            });

        if let Some(message) = &self.status_message {
            egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
                ui.colored_label(egui::Color32::RED, message);
            });
        }

        egui::CentralPanel::default().show(ctx, |ui| match self.section {
            Section::Benchmark => {
                self.benchmark_view.show(ui, &self.source);
            }
            Section::Predictions => {
                self.prediction_view
                    .show(ui, &self.source, &self.config.labels);
            }
        });
    }
}
