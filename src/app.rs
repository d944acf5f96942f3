use eframe::egui;

use crate::config::DashConfig;
use crate::state::{AppState, Controls};
use crate::ui::{panels, plot, sun_image};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SunDashApp {
    pub state: AppState,
}

impl SunDashApp {
    /// Restore saved widget values, run both pipelines and fetch the first image.
    pub fn new(cc: &eframe::CreationContext<'_>, config: DashConfig) -> Self {
        let controls: Controls = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();

        let fetch_image = config.fetch_image_on_startup;
        let mut state = AppState::new(config, controls);
        state.refresh_all();
        if fetch_image {
            state.refresh_image();
        }
        Self { state }
    }
}

impl eframe::App for SunDashApp {
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.state.controls);
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Right side panel: solar image ----
        egui::SidePanel::right("sun_image_panel")
            .default_width(320.0)
            .resizable(true)
            .show(ctx, |ui| {
                sun_image::sun_image_panel(ui, &mut self.state);
            });

        // ---- Central panel: sunspot chart | cycle chart ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.columns(2, |columns| {
                panels::sunspot_controls(&mut columns[0], &mut self.state);
                columns[0].separator();
                plot::sunspot_plot(&mut columns[0], self.state.sunspot_view.as_ref());

                panels::cycle_controls(&mut columns[1], &mut self.state);
                columns[1].separator();
                plot::cycle_plot(&mut columns[1], self.state.cycle_view.as_ref());
            });
        });
    }
}
