use egui_plot::{Legend, Line, LineStyle, Plot, PlotPoints};
use qs_analytics::BatchSummary;
use qs_app::Session;
use qs_table::{BatchId, ProcessVariable};

/// Stacked time traces for the selected batch, x-axis in minutes from
/// the batch start.
#[derive(Default)]
pub struct TraceView {
    cached_batch_id: Option<BatchId>,
    cached_series: Vec<(ProcessVariable, Vec<[f64; 2]>)>,
}

impl TraceView {
    /// Drop the cached series; the next `show` rebuilds them.
    pub fn invalidate(&mut self) {
        self.cached_batch_id = None;
        self.cached_series.clear();
    }

    pub fn show(&mut self, ui: &mut egui::Ui, session: &Session, summary: &BatchSummary) {
        if self.cached_batch_id.as_ref() != Some(&summary.batch_id) {
            self.rebuild_cache(session, summary);
        }

        ui.heading(format!("Process Analysis - Batch {}", summary.batch_id));
        ui.separator();

        egui::ScrollArea::vertical().show(ui, |ui| {
            self.temperature_plot(ui);
            self.pressure_plot(ui);
            self.flow_plot(ui);
            self.valve_plot(ui);
        });
    }

    fn rebuild_cache(&mut self, session: &Session, summary: &BatchSummary) {
        self.cached_series.clear();
        let start = summary.start_time;

        for variable in ProcessVariable::ALL {
            let mut points = Vec::new();
            if let Ok(series) = session.series(&summary.batch_id, variable) {
                points = series
                    .iter()
                    .map(|(timestamp, value)| {
                        let minutes = (*timestamp - start).num_milliseconds() as f64 / 60_000.0;
                        [minutes, *value]
                    })
                    .collect();
            }
            self.cached_series.push((variable, points));
        }

        self.cached_batch_id = Some(summary.batch_id.clone());
    }

    fn points(&self, variable: ProcessVariable) -> Vec<[f64; 2]> {
        self.cached_series
            .iter()
            .find(|(v, _)| *v == variable)
            .map(|(_, points)| points.clone())
            .unwrap_or_default()
    }

    fn line(&self, variable: ProcessVariable) -> Option<Line> {
        let points = self.points(variable);
        if points.is_empty() {
            return None;
        }
        let plot_points: PlotPoints = points.into();
        Some(Line::new(plot_points).name(variable.column_name()))
    }

    fn setpoint_line(&self, variable: ProcessVariable) -> Option<Line> {
        self.line(variable)
            .map(|line| line.style(LineStyle::Dotted { spacing: 4.0 }))
    }

    fn temperature_plot(&self, ui: &mut egui::Ui) {
        let lines: Vec<Line> = [
            self.setpoint_line(ProcessVariable::ProcessTempSetpoint),
            self.line(ProcessVariable::ProcessTemp),
        ]
        .into_iter()
        .flatten()
        .collect();

        Plot::new("temperature_plot")
            .legend(Legend::default())
            .height(190.0)
            .y_axis_label("Temp (°C)")
            .show(ui, |plot_ui| {
                for line in lines {
                    plot_ui.line(line);
                }
            });
    }

    fn pressure_plot(&self, ui: &mut egui::Ui) {
        let lines: Vec<Line> = [
            self.setpoint_line(ProcessVariable::PressureSetpoint),
            self.line(ProcessVariable::InletSteamPressure),
            self.line(ProcessVariable::OutletSteamPressure),
        ]
        .into_iter()
        .flatten()
        .collect();

        Plot::new("pressure_plot")
            .legend(Legend::default())
            .height(190.0)
            .y_axis_label("Bar")
            .show(ui, |plot_ui| {
                for line in lines {
                    plot_ui.line(line);
                }
            });
    }

    fn flow_plot(&self, ui: &mut egui::Ui) {
        let lines: Vec<Line> = self.line(ProcessVariable::SteamFlowRate).into_iter().collect();

        Plot::new("flow_plot")
            .legend(Legend::default())
            .height(190.0)
            .y_axis_label("kg/hr")
            .show(ui, |plot_ui| {
                for line in lines {
                    plot_ui.line(line);
                }
            });
    }

    fn valve_plot(&self, ui: &mut egui::Ui) {
        let lines: Vec<Line> = self.line(ProcessVariable::ValveOpening).into_iter().collect();

        Plot::new("valve_plot")
            .legend(Legend::default())
            .height(190.0)
            .x_axis_label("Minutes from start")
            .y_axis_label("%")
            .include_y(0.0)
            .include_y(105.0)
            .show(ui, |plot_ui| {
                for line in lines {
                    plot_ui.line(line);
                }
            });
    }
}
