use eframe::egui::{self, Color32, RichText};

use crate::common::Language;
use crate::ui::state::UiAction;

pub const HEADER_FILL: Color32 = Color32::from_rgb(170, 223, 128);
const BRAND_COLOR: Color32 = Color32::from_rgb(22, 163, 74);

pub fn render(ui: &mut egui::Ui, current: Language) -> Option<UiAction> {
    let mut selected = current;

    ui.horizontal(|ui| {
        ui.label(RichText::new("LCB").size(26.0).strong().color(BRAND_COLOR));
        ui.vertical(|ui| {
            ui.label(RichText::new("LCB Fertilizers").size(18.0).strong());
            ui.label("Customer support assistant");
        });

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            egui::ComboBox::from_id_salt("reply_language")
                .selected_text(selected.label())
                .show_ui(ui, |ui| {
                    for language in Language::ALL {
                        ui.selectable_value(&mut selected, language, language.label());
                    }
                });
        });
    });

    (selected != current).then_some(UiAction::SelectLanguage(selected))
}
