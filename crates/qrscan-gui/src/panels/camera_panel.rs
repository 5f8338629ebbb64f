/// Camera panel -- device picker, start/stop, and the live preview with the
/// scan guide.
use crate::state::AppState;
use egui::Ui;
use qrscan_core::camera::CameraState;

/// Fill and stroke of the region-of-interest guide.
const GUIDE_COLOR: egui::Color32 = egui::Color32::from_rgb(0xa6, 0xe3, 0xa1);

/// Draw the camera panel.
pub fn camera_panel(ui: &mut Ui, state: &mut AppState) {
    device_picker(ui, state);
    ui.add_space(6.0);

    let camera_state = state.session.camera_state();
    ui.horizontal(|ui| {
        let can_start = camera_state == CameraState::Idle;
        if ui
            .add_enabled(
                can_start,
                egui::Button::new("▶ Start Camera").min_size(egui::vec2(120.0, 28.0)),
            )
            .clicked()
        {
            state.start_camera();
        }
        if ui
            .add_enabled(
                !can_start,
                egui::Button::new("⏹ Stop").min_size(egui::vec2(70.0, 28.0)),
            )
            .clicked()
        {
            state.stop_camera();
        }
        if camera_state == CameraState::Starting {
            ui.spinner();
            ui.label(egui::RichText::new("Opening camera...").color(ui.visuals().weak_text_color()));
        }
    });
    ui.add_space(8.0);

    upload_preview(ui.ctx(), state);
    match &state.preview_texture {
        Some(texture) if state.session.state().camera_active => {
            let response = ui.add(
                egui::Image::new(texture)
                    .max_size(ui.available_size())
                    .maintain_aspect_ratio(true),
            );
            draw_guide(ui, response.rect, state.preview_roi);
        }
        _ => placeholder(ui, camera_state),
    }
}

fn device_picker(ui: &mut Ui, state: &mut AppState) {
    let selected = state.session.selected_camera().map(str::to_string);
    let selected_label = selected
        .as_deref()
        .and_then(|id| state.session.devices().iter().find(|d| d.id == id))
        .map(|d| d.label.clone())
        .unwrap_or_else(|| "Automatic (rear camera first)".to_string());

    let mut choice = selected.clone();
    ui.horizontal(|ui| {
        ui.label("Camera:");
        egui::ComboBox::from_id_salt("camera_picker")
            .selected_text(selected_label)
            .width(240.0)
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut choice, None, "Automatic (rear camera first)");
                for device in state.session.devices() {
                    ui.selectable_value(&mut choice, Some(device.id.clone()), &device.label);
                }
            });
        if ui
            .button("🔄")
            .on_hover_text("Re-enumerate cameras")
            .clicked()
        {
            state.session.refresh_devices();
        }
    });
    if choice != selected {
        state.select_camera(choice);
    }
}

/// Move the newest preview frame into the texture.
fn upload_preview(ctx: &egui::Context, state: &mut AppState) {
    let Some(frame) = state.pending_preview.take() else {
        return;
    };
    let image = egui::ColorImage::from_rgb(
        [frame.width as usize, frame.height as usize],
        &frame.rgb,
    );
    match &mut state.preview_texture {
        Some(texture) => texture.set(image, egui::TextureOptions::LINEAR),
        None => {
            state.preview_texture =
                Some(ctx.load_texture("camera_preview", image, egui::TextureOptions::LINEAR));
        }
    }
}

/// Outline the decode region in the middle of the preview.
fn draw_guide(ui: &Ui, image_rect: egui::Rect, roi: (f32, f32)) {
    if roi.0 <= 0.0 || roi.1 <= 0.0 {
        return;
    }
    let size = egui::vec2(image_rect.width() * roi.0, image_rect.height() * roi.1);
    let guide = egui::Rect::from_center_size(image_rect.center(), size);
    let painter = ui.painter_at(image_rect);
    painter.rect_stroke(
        guide,
        4.0,
        egui::Stroke::new(2.0, GUIDE_COLOR),
        egui::StrokeKind::Inside,
    );
}

fn placeholder(ui: &mut Ui, camera_state: CameraState) {
    let (rect, _) = ui.allocate_exact_size(
        egui::vec2(ui.available_width(), ui.available_height().max(160.0)),
        egui::Sense::hover(),
    );
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 6.0, ui.visuals().extreme_bg_color);
    let text = match camera_state {
        CameraState::Idle => "Camera is off. Press Start Camera to scan.",
        CameraState::Starting => "Waiting for the camera...",
        CameraState::Running => "Waiting for the first frame...",
    };
    painter.text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        text,
        egui::FontId::proportional(14.0),
        ui.visuals().weak_text_color(),
    );
}
