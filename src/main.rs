//! Population Trends - population statistics dashboard
//!
//! Loads a population CSV, cleans it and renders five descriptive views.

mod charts;
mod data;
mod gui;
mod metrics;
mod report;

use eframe::egui;
use gui::PopTrendsApp;

fn main() -> eframe::Result<()> {
    env_logger::init();

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([1000.0, 640.0])
            .with_title("Population Trends"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Population Trends",
        options,
        Box::new(|cc| Ok(Box::new(PopTrendsApp::new(cc)))),
    )
}
