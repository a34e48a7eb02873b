use pb_app::{AppResult, FileSource, TableRenderer};
use pb_data::BenchmarkTable;
use std::path::PathBuf;

#[derive(Default)]
pub struct BenchmarkView {
    loaded_from: Option<PathBuf>,
    table: Option<BenchmarkTable>,
    error: Option<(String, String)>,
}

impl TableRenderer for BenchmarkView {
    fn render_table(&mut self, table: &BenchmarkTable) -> AppResult<()> {
        self.table = Some(table.clone());
        Ok(())
    }
}

impl BenchmarkView {
    pub fn invalidate(&mut self) {
        self.loaded_from = None;
    }

    fn reload(&mut self, source: &FileSource) {
        self.table = None;
        self.error = None;
        self.loaded_from = Some(source.benchmark_path().to_path_buf());

        if let Err(e) = pb_app::run_benchmark_cycle(source, &mut *self) {
            self.error = Some((e.user_message(), e.to_string()));
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui, source: &FileSource) {
        ui.heading("Benchmark Results");
        ui.label(
            egui::RichText::new(source.benchmark_path().display().to_string())
                .weak()
                .small(),
        );
        ui.separator();

        if self.loaded_from.as_deref() != Some(source.benchmark_path()) {
            self.reload(source);
        }

        if let Some((headline, detail)) = &self.error {
            ui.colored_label(egui::Color32::RED, headline);
            ui.label(detail);
            return;
        }

        let Some(table) = &self.table else {
            ui.label("No benchmark loaded");
            return;
        };

        if table.headers.is_empty() {
            ui.label("Benchmark file has no columns");
            return;
        }

        ui.label(format!(
            "{} row(s), {} column(s)",
            table.row_count(),
            table.column_count()
        ));

        show_table(ui, table);
    }
}

fn show_table(ui: &mut egui::Ui, table: &BenchmarkTable) {
    use egui_extras::{Column, TableBuilder};

    egui::ScrollArea::horizontal().show(ui, |ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::exact(40.0)) // Row number
            .columns(
                Column::initial(110.0).at_least(60.0).clip(true),
                table.column_count(),
            )
            .header(22.0, |mut header| {
                header.col(|ui| {
                    ui.strong("#");
                });
                for name in &table.headers {
                    header.col(|ui| {
                        ui.strong(name);
                    });
                }
            })
            .body(|body| {
                body.rows(20.0, table.row_count(), |mut row| {
                    let index = row.index();
                    row.col(|ui| {
                        ui.label(egui::RichText::new(index.to_string()).weak());
                    });
                    for col in 0..table.column_count() {
                        row.col(|ui| {
                            ui.label(table.cell(index, col));
                        });
                    }
                });
            });
    });
}
