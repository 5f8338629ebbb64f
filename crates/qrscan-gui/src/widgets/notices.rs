/// Notice toasts -- transient messages stacked in the top-right corner.
use crate::state::AppState;
use qrscan_core::model::NoticeLevel;

fn level_color(level: NoticeLevel) -> egui::Color32 {
    match level {
        NoticeLevel::Info => egui::Color32::from_rgb(0x89, 0xb4, 0xfa),
        NoticeLevel::Warning => egui::Color32::from_rgb(0xfa, 0xb3, 0x87),
        NoticeLevel::Error => egui::Color32::from_rgb(0xf3, 0x8b, 0xa8),
    }
}

/// Draw pending notices. Clicking one dismisses it.
pub fn notices(ctx: &egui::Context, state: &mut AppState) {
    if state.notices.is_empty() {
        return;
    }
    let mut dismissed = None;
    egui::Area::new(egui::Id::new("notices"))
        .anchor(egui::Align2::RIGHT_TOP, [-12.0, 48.0])
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            for (index, notice) in state.notices.iter().enumerate() {
                let color = level_color(notice.level);
                let response = egui::Frame::popup(ui.style())
                    .stroke(egui::Stroke::new(1.0, color))
                    .show(ui, |ui| {
                        ui.set_max_width(320.0);
                        ui.label(egui::RichText::new(&notice.message).color(color));
                        ui.label(
                            egui::RichText::new(notice.raised_at.format("%H:%M:%S").to_string())
                                .size(10.0)
                                .color(ui.visuals().weak_text_color()),
                        );
                    })
                    .response
                    .interact(egui::Sense::click());
                if response.on_hover_text("Click to dismiss").clicked() {
                    dismissed = Some(index);
                }
                ui.add_space(4.0);
            }
        });
    if let Some(index) = dismissed {
        state.dismiss_notice(index);
    }
}
