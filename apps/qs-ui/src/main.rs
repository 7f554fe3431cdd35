#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod views;

use app::SteamScopeApp;

fn main() -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_title("SteamScope"),
        ..Default::default()
    };

    eframe::run_native(
        "SteamScope",
        options,
        Box::new(|cc| Ok(Box::new(SteamScopeApp::new(cc)))),
    )
}
