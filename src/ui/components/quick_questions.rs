use eframe::egui::{self, RichText};

use crate::ui::state::{ConversationStore, UiAction};

pub fn render(ui: &mut egui::Ui, store: &ConversationStore) -> Option<UiAction> {
    let questions = store.quick_questions();
    if questions.is_empty() {
        return None;
    }

    let mut picked = None;
    ui.label(RichText::new(store.language().quick_questions_heading()).strong());
    ui.horizontal_wrapped(|ui| {
        for question in questions {
            let button = ui.add_enabled(!store.is_pending(), egui::Button::new(*question));
            if button.clicked() {
                picked = Some(UiAction::PickQuickQuestion(question.to_string()));
            }
        }
    });
    ui.separator();

    picked
}
