mod app;
mod cli;
mod color;
mod data;
mod state;
mod ui;

use app::ShipwreckApp;
use clap::Parser;
use cli::{Cli, ViewerConfig};
use eframe::egui;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ViewerConfig::from(Cli::parse());
    let mut state = AppState::new(config);
    let startup_path = state.config.data_path.clone();
    state.load_path(&startup_path);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Shipwreck Explorer",
        options,
        Box::new(move |_cc| Ok(Box::new(ShipwreckApp::new(state)))),
    )
}
