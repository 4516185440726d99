//! Park Review Dashboard - theme-park review sentiment viewer
//!
//! Loads the regional sentiment tables and review samples once, then lets the user
//! browse review trends, monthly breakdowns and sampled reviews per park.

mod charts;
mod config;
mod data;
mod gui;
mod view;

use anyhow::Context;
use config::DashboardConfig;
use data::DataLoader;
use eframe::egui;
use gui::DashboardApp;
use std::sync::Arc;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config =
        DashboardConfig::load_default().context("failed to read dashboard configuration")?;

    // Nothing can be shown without data, so load failures stop here
    let data = DataLoader::load(&config)
        .inspect_err(|e| log::error!("Startup failed: {}", e))
        .context("failed to load dashboard data")?;
    let data = Arc::new(data);

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_min_inner_size([900.0, 600.0])
            .with_title("Park Review Dashboard"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Park Review Dashboard",
        options,
        Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, data, &config)))),
    )
    .map_err(|e| anyhow::anyhow!("dashboard window failed: {}", e))
}
