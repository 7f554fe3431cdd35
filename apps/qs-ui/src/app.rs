use crate::views::{StatsView, TraceView};
use egui_file_dialog::{DialogMode, FileDialog};
use qs_analytics::BatchSummary;
use qs_app::{AppError, Session};
use qs_table::BatchId;
use std::path::{Path, PathBuf};

/// Where the exporter drops the stable-phase log by convention.
const DEFAULT_DATA_PATH: &str = "data/df_stable_only.csv";

pub struct SteamScopeApp {
    session: Option<Session>,
    load_status: Option<LoadStatus>,
    file_dialog: FileDialog,
    last_directory: Option<PathBuf>,
    batch_ids: Vec<BatchId>,
    selected_batch_id: Option<BatchId>,
    summary: Option<BatchSummary>,
    trace_view: TraceView,
    stats_view: StatsView,
}

enum LoadStatus {
    MissingSource(PathBuf),
    Failed(String),
}

impl SteamScopeApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let mut app = Self {
            session: None,
            load_status: None,
            file_dialog: FileDialog::new(),
            last_directory: None,
            batch_ids: Vec::new(),
            selected_batch_id: None,
            summary: None,
            trace_view: TraceView::default(),
            stats_view: StatsView::default(),
        };

        // Pick up the conventional log location if it is there; starting
        // without one is not an error.
        let default_path = Path::new(DEFAULT_DATA_PATH);
        if default_path.exists() {
            app.open_log(default_path.to_path_buf());
        }

        app
    }

    fn open_log(&mut self, path: PathBuf) {
        // Remember the directory for next time
        if let Some(parent) = path.parent() {
            self.last_directory = Some(parent.to_path_buf());
        }

        self.session = None;
        self.batch_ids.clear();
        self.selected_batch_id = None;
        self.summary = None;
        self.trace_view.invalidate();

        match Session::open(&path) {
            Ok(session) => {
                self.batch_ids = session.batch_ids();
                self.selected_batch_id = self.batch_ids.first().cloned();
                self.session = Some(session);
                self.load_status = None;
                self.refresh_summary();
            }
            Err(AppError::SourceNotFound { path }) => {
                self.load_status = Some(LoadStatus::MissingSource(path));
            }
            Err(e) => {
                self.load_status = Some(LoadStatus::Failed(e.to_string()));
            }
        }
    }

    fn refresh_summary(&mut self) {
        self.summary = None;
        self.trace_view.invalidate();

        if let (Some(session), Some(batch_id)) =
            (self.session.as_ref(), self.selected_batch_id.as_ref())
        {
            match session.summarize(batch_id) {
                Ok(summary) => self.summary = Some(summary),
                Err(e) => self.load_status = Some(LoadStatus::Failed(e.to_string())),
            }
        }
    }

    fn show_metric_row(ui: &mut egui::Ui, summary: &BatchSummary) {
        ui.horizontal(|ui| {
            metric_card(ui, &format!("Batch #{}", summary.batch_id), "Batch ID");
            metric_card(
                ui,
                &summary.start_time.format("%Y-%m-%d").to_string(),
                "Date",
            );
            metric_card(
                ui,
                &format!(
                    "{} - {}",
                    summary.start_time.format("%H:%M:%S"),
                    summary.end_time.format("%H:%M:%S")
                ),
                "Time Range",
            );
            metric_card(
                ui,
                &format!("{:.2} mins", summary.duration_minutes),
                "Stable Duration",
            );
        });
    }
}

fn metric_card(ui: &mut egui::Ui, value: &str, label: &str) {
    ui.group(|ui| {
        ui.vertical(|ui| {
            ui.strong(value);
            ui.weak(label);
        });
    });
}

impl eframe::App for SteamScopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("SteamScope");
                ui.separator();

                if ui.button("Open Log…").clicked() {
                    let initial_dir = self.last_directory.as_ref().and_then(|p| p.to_str());
                    let _ = self
                        .file_dialog
                        .open(DialogMode::SelectFile, true, initial_dir);
                }

                if let Some(session) = self.session.as_ref() {
                    ui.separator();
                    ui.label(format!(
                        "{} ({} readings)",
                        session.source().display(),
                        session.table().len()
                    ));
                }
            });
        });

        self.file_dialog.update(ctx);
        if let Some(path) = self.file_dialog.take_selected() {
            self.open_log(path.to_path_buf());
        }

        let mut new_selection = None;
        egui::SidePanel::left("batch_selection")
            .default_width(180.0)
            .show(ctx, |ui| {
                ui.heading("Batch Selection");
                ui.separator();

                if self.batch_ids.is_empty() {
                    ui.label("No batches available");
                } else {
                    egui::ScrollArea::vertical().show(ui, |ui| {
                        for batch_id in &self.batch_ids {
                            let is_selected = self.selected_batch_id.as_ref() == Some(batch_id);
                            if ui
                                .selectable_label(is_selected, format!("Batch {}", batch_id))
                                .clicked()
                            {
                                new_selection = Some(batch_id.clone());
                            }
                        }
                    });
                }
            });

        if let Some(batch_id) = new_selection {
            self.selected_batch_id = Some(batch_id);
            self.refresh_summary();
        }

        egui::SidePanel::right("statistics")
            .default_width(260.0)
            .show(ctx, |ui| {
                self.stats_view.show(ui, self.summary.as_ref());
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            match &self.load_status {
                Some(LoadStatus::MissingSource(path)) => {
                    ui.colored_label(
                        egui::Color32::RED,
                        format!("Data file not found at {}", path.display()),
                    );
                    ui.label("Pick a batch log with Open Log… to continue.");
                    return;
                }
                Some(LoadStatus::Failed(message)) => {
                    ui.colored_label(egui::Color32::RED, format!("Failed to load log: {message}"));
                    return;
                }
                None => {}
            }

            if self.session.is_none() {
                ui.label("No log loaded. Use Open Log… to pick a batch log CSV.");
                return;
            }

            if let (Some(session), Some(summary)) = (self.session.as_ref(), self.summary.as_ref()) {
                Self::show_metric_row(ui, summary);
                ui.separator();
                self.trace_view.show(ui, session, summary);
            } else {
                ui.label("Select a batch to inspect");
            }
        });
    }
}
