use eframe::egui;

use crate::ui::state::{ConversationStore, UiAction};

pub fn render(ui: &mut egui::Ui, store: &ConversationStore) -> Vec<UiAction> {
    let mut actions = Vec::new();
    let mut text = store.input_text().to_string();
    let mut send = false;

    ui.horizontal(|ui| {
        let width = ui.available_width() - 64.0;
        let response = ui.add_enabled(
            !store.is_pending(),
            egui::TextEdit::singleline(&mut text)
                .hint_text("Type your message...")
                .desired_width(width),
        );
        if response.changed() {
            actions.push(UiAction::EditInput(text.clone()));
        }

        let can_send = !store.is_pending() && !text.trim().is_empty();
        if ui
            .add_enabled(can_send, egui::Button::new("Send"))
            .clicked()
        {
            send = true;
        }

        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            send = true;
            response.request_focus();
        }
    });

    if send {
        actions.push(UiAction::Submit);
    }

    actions
}
