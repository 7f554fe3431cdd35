use egui_extras::{Column, TableBuilder};
use qs_analytics::{BatchSummary, VariableStats};
use qs_table::ProcessVariable;

/// Variables shown as statistics cards, in display order.
const STAT_VARIABLES: [ProcessVariable; 5] = [
    ProcessVariable::ProcessTemp,
    ProcessVariable::OutletSteamPressure,
    ProcessVariable::InletSteamPressure,
    ProcessVariable::SteamFlowRate,
    ProcessVariable::ValveOpening,
];

#[derive(Default)]
pub struct StatsView;

impl StatsView {
    pub fn show(&mut self, ui: &mut egui::Ui, summary: Option<&BatchSummary>) {
        ui.heading("Statistics");

        let Some(summary) = summary else {
            ui.label("Select a batch to see stable-phase statistics");
            return;
        };

        ui.label("Detailed breakdown for the stable phase.");
        ui.separator();

        egui::ScrollArea::vertical().show(ui, |ui| {
            for variable in STAT_VARIABLES {
                ui.group(|ui| {
                    ui.strong(variable.label());
                    match summary.stats_for(variable) {
                        Some(stats) => stat_table(ui, variable, stats),
                        None => {
                            ui.label("n/a - no valid samples in this batch");
                        }
                    }
                });
                ui.add_space(5.0);
            }
        });
    }
}

fn stat_table(ui: &mut egui::Ui, variable: ProcessVariable, stats: &VariableStats) {
    let std_text = if stats.std_dev.is_nan() {
        "n/a (single sample)".to_string()
    } else {
        format!("{:.4}", stats.std_dev)
    };

    let rows = [
        ("Mean:", format!("{:.2}", stats.mean)),
        ("Median:", format!("{:.2}", stats.median)),
        ("Max:", format!("{:.2}", stats.max)),
        ("Min:", format!("{:.2}", stats.min)),
        ("Std Dev:", std_text),
    ];

    // Each card needs its own table id within the shared panel.
    ui.push_id(variable.column_name(), |ui| {
        TableBuilder::new(ui)
            .column(Column::exact(70.0))
            .column(Column::remainder())
            .body(|mut body| {
                for (label, value) in rows {
                    body.row(18.0, |mut row| {
                        row.col(|ui| {
                            ui.label(label);
                        });
                        row.col(|ui| {
                            ui.strong(value);
                        });
                    });
                }
            });
    });
}
