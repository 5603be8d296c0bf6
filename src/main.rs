mod app;
mod color;
mod config;
mod data;
mod error;
mod export;
mod state;
mod ui;

use std::sync::Arc;

use anyhow::Context;
use app::SpacexDashApp;
use config::DashboardConfig;
use eframe::egui;
use state::AppState;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = DashboardConfig::default();
    log::debug!(
        "config: {}",
        serde_json::to_string(&config).unwrap_or_default()
    );

    // The dashboard has nothing to show without data: fail before opening a window.
    let table = data::loader::load_file(&config.data_path)
        .inspect_err(|e| log::error!("Failed to load launch data: {e}"))
        .with_context(|| format!("loading {}", config.data_path.display()))?;

    if let Some(b) = table.payload_bounds() {
        log::info!("Payload bounds: {} – {} kg", b.min, b.max);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.inner_size)
            .with_min_inner_size(config.min_inner_size),
        ..Default::default()
    };

    let title = config.window_title.clone();
    let state = AppState::new(Arc::new(table), config);

    eframe::run_native(
        &title,
        options,
        Box::new(|_cc| Ok(Box::new(SpacexDashApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("window error: {e}"))
}
