use std::sync::Arc;

use eframe::egui::{self, Color32, RichText, Ui, load::Bytes};

use crate::state::AppState;

/// Live solar image with a refresh button.
pub fn sun_image_panel(ui: &mut Ui, state: &mut AppState) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.strong("Current Real Image of Sun");
        ui.add_space(4.0);

        match &state.sun_image {
            Some(image) => {
                ui.add(
                    egui::Image::from_bytes(image.uri(), Bytes::Shared(Arc::clone(&image.bytes)))
                        .max_width(ui.available_width())
                        .maintain_aspect_ratio(true),
                );
            }
            None => {
                let msg = state.image_error.as_deref().unwrap_or("No image loaded.");
                ui.label(RichText::new(msg).color(Color32::GRAY));
            }
        }

        ui.add_space(4.0);
        if ui.button("Refresh").clicked() {
            if let Some(old) = &state.sun_image {
                ui.ctx().forget_image(&old.uri());
            }
            state.refresh_image();
        }
    });
}
