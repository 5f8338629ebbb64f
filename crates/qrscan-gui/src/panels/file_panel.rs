/// File panel -- drop zone and path entry for image decoding.
use crate::state::AppState;
use egui::Ui;

/// Draw the file panel.
pub fn file_panel(ui: &mut Ui, state: &mut AppState) {
    let dragging = state.session.state().drag_active;
    let visuals = ui.visuals();
    let (fill, stroke) = if dragging {
        (
            visuals.selection.bg_fill.gamma_multiply(0.35),
            egui::Stroke::new(2.0, visuals.hyperlink_color),
        )
    } else {
        (
            visuals.extreme_bg_color,
            egui::Stroke::new(1.0, visuals.weak_text_color()),
        )
    };

    let (rect, _) = ui.allocate_exact_size(
        egui::vec2(ui.available_width(), 180.0),
        egui::Sense::hover(),
    );
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 8.0, fill);
    painter.rect_stroke(rect, 8.0, stroke, egui::StrokeKind::Inside);
    let prompt = if dragging {
        "Release to scan the image"
    } else {
        "Drop an image here, or paste an image path"
    };
    painter.text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        prompt,
        egui::FontId::proportional(16.0),
        ui.visuals().text_color(),
    );

    ui.add_space(10.0);
    ui.horizontal(|ui| {
        ui.label("Image file:");
        let field = ui.add(
            egui::TextEdit::singleline(&mut state.path_input)
                .hint_text("/path/to/qr.png")
                .desired_width(ui.available_width() - 80.0),
        );
        let submitted = field.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        if ui.button("📂 Load").clicked() || submitted {
            state.load_path_input();
        }
    });
}
