//! Population Trends Main Application
//! Main window with control panel and tabbed dashboard.

use crate::data::{DataCleaner, DataLoader};
use crate::gui::{ControlPanel, ControlPanelAction, Dashboard};
use crate::metrics::{AnalysisBundle, MetricsEngine};
use crate::report::ReportWriter;
use egui::SidePanel;
use polars::prelude::DataFrame;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;

/// Pipeline result from the background thread
enum PipelineResult {
    Progress(f32, String),
    Complete {
        df: DataFrame,
        bundle: Box<AnalysisBundle>,
    },
    Error(String),
}

/// Main application window.
pub struct PopTrendsApp {
    loader: DataLoader,
    control_panel: ControlPanel,
    dashboard: Dashboard,

    // Async load + analysis
    pipeline_rx: Option<Receiver<PipelineResult>>,
    is_running: bool,
}

impl PopTrendsApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self {
            loader: DataLoader::new(),
            control_panel: ControlPanel::new(),
            dashboard: Dashboard::new(),
            pipeline_rx: None,
            is_running: false,
        }
    }

    /// Handle CSV file selection; the whole load→clean→analyze pipeline runs
    /// in a background thread so the UI stays responsive.
    fn handle_browse_csv(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        else {
            return;
        };

        // A new upload supersedes the previous result; replacing the
        // receiver discards anything a still-running pipeline may send.
        self.dashboard.clear();
        self.control_panel.csv_path = Some(path.clone());
        self.control_panel.export_enabled = false;
        self.control_panel.set_progress(5.0, "Reading CSV file...");
        self.is_running = true;

        let (tx, rx) = channel();
        self.pipeline_rx = Some(rx);

        let path_str = path.to_string_lossy().to_string();
        log::info!("loading {path_str}");

        thread::spawn(move || {
            Self::run_pipeline(tx, &path_str);
        });
    }

    /// Run the pipeline (called from background thread)
    fn run_pipeline(tx: Sender<PipelineResult>, path: &str) {
        let _ = tx.send(PipelineResult::Progress(
            10.0,
            "Reading CSV file...".to_string(),
        ));
        let df = match DataLoader::read_frame(path) {
            Ok(df) => df,
            Err(e) => {
                let _ = tx.send(PipelineResult::Error(e.to_string()));
                return;
            }
        };

        let _ = tx.send(PipelineResult::Progress(
            40.0,
            "Cleaning data...".to_string(),
        ));
        let cleaned = match DataCleaner::clean(&df) {
            Ok(df) => df,
            Err(e) => {
                let _ = tx.send(PipelineResult::Error(e.to_string()));
                return;
            }
        };

        let _ = tx.send(PipelineResult::Progress(
            70.0,
            "Computing derived views...".to_string(),
        ));
        match MetricsEngine::analyze(&cleaned) {
            Ok(bundle) => {
                let _ = tx.send(PipelineResult::Complete {
                    df: cleaned,
                    bundle: Box::new(bundle),
                });
            }
            Err(e) => {
                let _ = tx.send(PipelineResult::Error(e.to_string()));
            }
        }
    }

    /// Check for pipeline results
    fn check_pipeline_results(&mut self) {
        let rx = self.pipeline_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Ok(result) = rx.try_recv() {
                match result {
                    PipelineResult::Progress(progress, status) => {
                        self.control_panel.set_progress(progress, &status);
                    }
                    PipelineResult::Complete { df, bundle } => {
                        self.loader.set_dataframe(df);
                        let rows = self.loader.get_row_count();
                        let columns = self.loader.get_columns().len();
                        self.dashboard.set_bundle(*bundle);
                        self.control_panel.export_enabled = true;
                        self.control_panel.set_progress(
                            100.0,
                            &format!("Complete! {} rows, {} columns", rows, columns),
                        );
                        log::info!("analysis complete: {rows} rows");
                        self.is_running = false;
                        should_keep_receiver = false;
                    }
                    PipelineResult::Error(error) => {
                        self.control_panel
                            .set_progress(0.0, &format!("Error: {}", error));
                        log::warn!("pipeline failed: {error}");
                        self.is_running = false;
                        should_keep_receiver = false;
                    }
                }
            }

            if should_keep_receiver {
                self.pipeline_rx = Some(rx);
            }
        }
    }

    /// Handle JSON report export for the current analysis
    fn handle_export_report(&mut self) {
        let Some(bundle) = self.dashboard.bundle() else {
            self.control_panel.set_progress(0.0, "No analysis to export");
            return;
        };

        let Some(output_path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .set_file_name("population_report.json")
            .save_file()
        else {
            return; // User cancelled
        };

        match ReportWriter::write_json(bundle, &output_path) {
            Ok(()) => {
                self.control_panel.set_progress(
                    100.0,
                    &format!("Complete! Report saved to {}", output_path.display()),
                );
                log::info!("report written to {}", output_path.display());
            }
            Err(e) => {
                self.control_panel
                    .set_progress(0.0, &format!("Error: {e:#}"));
                log::warn!("report export failed: {e:#}");
            }
        }
    }
}

impl eframe::App for PopTrendsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for background results
        self.check_pipeline_results();

        // Request repaint while the pipeline is running
        if self.is_running {
            ctx.request_repaint();
        }

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(260.0)
            .max_width(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui);

                    match action {
                        ControlPanelAction::BrowseCsv => {
                            if !self.is_running {
                                self.handle_browse_csv();
                            }
                        }
                        ControlPanelAction::ExportReport => {
                            self.handle_export_report();
                        }
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Dashboard
        egui::CentralPanel::default().show(ctx, |ui| {
            self.dashboard.show(ui);
        });
    }
}
