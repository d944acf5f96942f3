use std::collections::BTreeMap;

use eframe::egui::{Color32, Ui};
use egui_plot::{Legend, Line, Plot, PlotPoints, Points};

use crate::state::{CycleView, SunspotView};

// ---------------------------------------------------------------------------
// Raw vs. smoothed sunspot numbers
// ---------------------------------------------------------------------------

pub fn sunspot_plot(ui: &mut Ui, view: Option<&SunspotView>) {
    let Some(view) = view else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No sunspot data loaded  (File → Open data folder…)");
        });
        return;
    };

    ui.vertical_centered(|ui: &mut Ui| ui.strong(&view.title));

    Plot::new("sunspot_plot")
        .legend(Legend::default())
        .x_axis_label("Year")
        .y_axis_label("Sunspot Number")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            let raw: PlotPoints = view.raw.points().into();
            plot_ui.line(Line::new(raw).name("Raw Data").color(Color32::LIGHT_BLUE).width(1.0));

            let smoothed: PlotPoints = view.smoothed_points().into();
            plot_ui.line(
                Line::new(smoothed)
                    .name("Smoothed Data")
                    .color(Color32::from_rgb(255, 140, 0))
                    .width(1.5),
            );
        });
}

// ---------------------------------------------------------------------------
// Cycle overlay scatter
// ---------------------------------------------------------------------------

pub fn cycle_plot(ui: &mut Ui, view: Option<&CycleView>) {
    let Some(view) = view else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label("Cycle view unavailable.");
        });
        return;
    };

    // One scatter per cycle so each repetition gets its own colour.
    let mut by_cycle: BTreeMap<i64, Vec<[f64; 2]>> = BTreeMap::new();
    for p in view.points.iter().filter(|p| p.sunspot_number >= 0.0) {
        by_cycle
            .entry(p.cycle_index)
            .or_default()
            .push([p.phase, p.sunspot_number]);
    }

    ui.vertical_centered(|ui: &mut Ui| ui.strong(&view.title));

    Plot::new("cycle_plot")
        .x_axis_label("Years")
        .y_axis_label("# of Sunspots")
        .allow_boxed_zoom(true)
        .show(ui, |plot_ui| {
            for (cycle, points) in by_cycle {
                plot_ui.points(
                    Points::new(points)
                        .name(format!("cycle {cycle}"))
                        .color(view.colors.color_for(cycle))
                        .radius(1.5),
                );
            }
        });
}
