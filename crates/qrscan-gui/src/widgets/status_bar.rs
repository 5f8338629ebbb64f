/// Bottom status bar -- camera state and the active device.
use crate::state::AppState;
use egui::Ui;
use qrscan_core::camera::CameraState;
use qrscan_core::model::ScanMode;

/// Draw the status bar at the bottom of the window.
pub fn status_bar(ui: &mut Ui, state: &AppState) {
    let color_weak = ui.visuals().weak_text_color();
    let color_normal = ui.visuals().text_color();
    let color_success = egui::Color32::from_rgb(0xa6, 0xe3, 0xa1);

    ui.horizontal(|ui| {
        match (state.session.mode(), state.session.camera_state()) {
            (ScanMode::Camera, CameraState::Starting) => {
                ui.spinner();
                ui.label(egui::RichText::new("Starting camera...").size(12.0).color(color_normal));
            }
            (ScanMode::Camera, CameraState::Running) => {
                ui.spinner();
                let device = state.session.camera_device_label().unwrap_or("camera");
                ui.label(
                    egui::RichText::new(format!("Scanning with {}", device))
                        .size(12.0)
                        .color(color_normal),
                );
                ui.separator();
                let config = state.session.config();
                ui.label(
                    egui::RichText::new(format!(
                        "{} fps, {}px region",
                        config.fps, config.region_of_interest
                    ))
                    .size(11.0)
                    .color(color_weak),
                );
            }
            _ => {
                ui.label(egui::RichText::new("Ready").size(12.0).color(color_weak));
            }
        }

        if state.session.last_result().is_success {
            ui.separator();
            ui.label(
                egui::RichText::new("\u{2713} QR code found")
                    .size(12.0)
                    .color(color_success),
            );
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let count = state.session.devices().len();
            ui.label(
                egui::RichText::new(format!(
                    "{} camera{}",
                    count,
                    if count == 1 { "" } else { "s" }
                ))
                .size(11.0)
                .color(color_weak),
            );
        });
    });
}
