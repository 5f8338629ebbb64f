/// Result panel -- the last decoded text and its actions.
use crate::state::AppState;
use egui::Ui;
use qrscan_core::model::{ResultAction, ResultKind};

/// Draw the result panel.
pub fn result_panel(ui: &mut Ui, state: &mut AppState) {
    let result = state.session.last_result().clone();
    ui.horizontal(|ui| {
        ui.heading("Result");
        let badge = match result.kind {
            ResultKind::Url => Some("URL"),
            ResultKind::PlainText => Some("Text"),
            ResultKind::None => None,
        };
        if let Some(badge) = badge {
            ui.label(
                egui::RichText::new(badge)
                    .size(11.0)
                    .color(ui.visuals().hyperlink_color),
            );
        }
    });

    let Some(text) = result.text() else {
        let hint = match state.session.saved_last_result() {
            Some(previous) => format!("No scan yet. Previous result: {}", previous),
            None => "No scan yet.".to_string(),
        };
        ui.label(egui::RichText::new(hint).color(ui.visuals().weak_text_color()));
        return;
    };

    ui.add(egui::Label::new(egui::RichText::new(text).monospace()).wrap());
    ui.add_space(4.0);
    ui.horizontal(|ui| {
        for action in result.kind.actions() {
            match action {
                ResultAction::Open => {
                    if ui.button("🌐 Open").on_hover_text("Open in browser").clicked() {
                        state.session.open_result();
                    }
                }
                ResultAction::Copy => {
                    if ui.button("📋 Copy").on_hover_text("Copy to clipboard").clicked() {
                        state.session.copy_result();
                    }
                }
            }
        }
    });
}
