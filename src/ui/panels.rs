use std::ops::RangeInclusive;

use eframe::egui::{self, Color32, RichText, Ui};

use crate::config::WIDGETS;
use crate::data::model::TimeUnit;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Main chart controls
// ---------------------------------------------------------------------------

/// Observation type, date bounds and smoothing selectors above the main chart.
pub fn sunspot_controls(ui: &mut Ui, state: &mut AppState) {
    let mut changed = false;
    let years = state
        .sunspot_view
        .as_ref()
        .map(|v| v.year_options.clone())
        .unwrap_or(0..=0);

    ui.horizontal(|ui: &mut Ui| {
        ui.label("Select Observation Type");
        let current = state.controls.precision;
        egui::ComboBox::from_id_salt("observation_type")
            .selected_text(current.as_str())
            .show_ui(ui, |ui: &mut Ui| {
                for unit in TimeUnit::OBSERVATION_TYPES {
                    if ui.selectable_label(current == unit, unit.as_str()).clicked() && current != unit {
                        state.set_precision(unit);
                    }
                }
            });

        ui.separator();
        ui.label("Begin Date:");
        let first_year = *years.start();
        changed |= year_combo(ui, "begin_year", &mut state.controls.lower_year, first_year, &years);
        ui.label("End Date:");
        let last_year = *years.end();
        changed |= year_combo(ui, "end_year", &mut state.controls.upper_year, last_year, &years);
    });

    ui.horizontal(|ui: &mut Ui| {
        ui.label("Smoothening Time Domain:");
        let options = state.controls.precision.smoothing_options();
        egui::ComboBox::from_id_salt("smoothing_unit")
            .selected_text(state.controls.smoothing_unit.as_str())
            .show_ui(ui, |ui: &mut Ui| {
                for &unit in options {
                    changed |= ui
                        .selectable_value(&mut state.controls.smoothing_unit, unit, unit.as_str())
                        .changed();
                }
            });

        ui.separator();
        ui.label("Smoothening Period:");
        egui::ComboBox::from_id_salt("smoothing_period")
            .selected_text(state.controls.smoothing_period.to_string())
            .show_ui(ui, |ui: &mut Ui| {
                for period in 0..WIDGETS.smoothing_period_options {
                    changed |= ui
                        .selectable_value(&mut state.controls.smoothing_period, period, period.to_string())
                        .changed();
                }
            });
    });

    if changed {
        state.refresh_sunspot_view();
    }
}

/// Year selector over the dataset's years. `None` shows as `default`.
fn year_combo(ui: &mut Ui, id: &str, value: &mut Option<i32>, default: i32, years: &RangeInclusive<i32>) -> bool {
    let mut changed = false;
    let shown = value.unwrap_or(default);
    egui::ComboBox::from_id_salt(id)
        .selected_text(shown.to_string())
        .height(300.0)
        .show_ui(ui, |ui: &mut Ui| {
            for year in years.clone() {
                if ui.selectable_label(shown == year, year.to_string()).clicked() {
                    *value = Some(year);
                    changed = true;
                }
            }
        });
    changed
}

// ---------------------------------------------------------------------------
// Cycle chart controls
// ---------------------------------------------------------------------------

pub fn cycle_controls(ui: &mut Ui, state: &mut AppState) {
    let mut changed = false;

    ui.label(RichText::new("Sun Cycle Period").strong());
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Select Domain for Sun Cycle Period");
        egui::ComboBox::from_id_salt("cycle_domain")
            .selected_text(state.controls.cycle_domain.as_str())
            .show_ui(ui, |ui: &mut Ui| {
                changed |= ui
                    .selectable_value(&mut state.controls.cycle_domain, TimeUnit::Years, "years")
                    .changed();
            });
    });
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Select Sun Cycle Time Period");
        changed |= ui
            .add(egui::Slider::new(
                &mut state.controls.cycle_length,
                WIDGETS.cycle_length_range,
            ))
            .changed();
    });

    if changed {
        state.refresh_cycle_view();
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open data folder…").clicked() {
                open_folder_dialog(state);
                ui.close_menu();
            }
            let can_export = state.sunspot_view.is_some();
            if ui.add_enabled(can_export, egui::Button::new("Export CSV…")).clicked() {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();
        ui.heading("SunDash: Monitoring and Analyzing Solar Activity");
        ui.separator();

        if let Some(view) = &state.sunspot_view {
            ui.label(format!("{} observations shown", view.raw.len()));
        }

        for msg in state.status_messages() {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_folder_dialog(state: &mut AppState) {
    let folder = rfd::FileDialog::new()
        .set_title("Folder containing SN_d_tot_V2.0.txt and SN_m_tot_V2.0.txt")
        .set_directory(&state.config.data_dir)
        .pick_folder();

    if let Some(dir) = folder {
        state.set_data_dir(dir);
    }
}

pub fn export_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export displayed series")
        .add_filter("CSV", &["csv"])
        .set_file_name("sunspots.csv")
        .save_file();

    if let Some(path) = file {
        state.export_view(&path);
    }
}
