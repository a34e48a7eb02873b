#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod time_axis;
mod views;

use app::PredboardApp;
use pb_app::ConfigOverrides;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Optional first argument: dashboard config YAML.
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = match pb_app::resolve_config(config_path.as_deref(), &ConfigOverrides::default())
    {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %e, "falling back to default dashboard config");
            pb_data::DashboardConfig::default()
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_title("Predboard"),
        ..Default::default()
    };

    eframe::run_native(
        "Predboard",
        options,
        Box::new(move |cc| Ok(Box::new(PredboardApp::new(cc, config, config_path)))),
    )
}
