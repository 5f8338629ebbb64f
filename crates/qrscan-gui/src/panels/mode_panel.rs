/// Mode panel -- the camera / image toggle above the input area.
use crate::state::AppState;
use egui::Ui;
use qrscan_core::model::ScanMode;

/// Draw the two mode buttons.
pub fn mode_panel(ui: &mut Ui, state: &mut AppState) {
    let current = state.session.mode();
    ui.horizontal(|ui| {
        for (mode, icon) in [(ScanMode::Camera, "📷"), (ScanMode::File, "🖼")] {
            let text = egui::RichText::new(format!("{} {}", icon, mode.label())).size(14.0);
            if ui
                .add_sized([140.0, 30.0], egui::SelectableLabel::new(current == mode, text))
                .clicked()
            {
                state.switch_mode(mode);
            }
        }
    });
}
