mod app;
mod color;
mod state;
mod ui;

use app::DashboardApp;
use eframe::egui;
use imgo_dashboard::config::DashboardConfig;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Load once up front; every page borrows this bundle.
    let config = DashboardConfig::from_env();
    let data_dir = config.data_dir.clone();
    let mut state = AppState::new(config);
    state.load_from(&data_dir);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "IMGO Demo",
        options,
        Box::new(move |_cc| Ok(Box::new(DashboardApp::new(state)))),
    )
}
