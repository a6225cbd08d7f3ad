use chrono::Local;
use eframe::egui::{self, Align, Color32, Layout, RichText, Stroke};

use crate::common::ChatMessage;

use super::markdown::{self, MarkdownCache};

const USER_FILL: Color32 = Color32::from_rgb(170, 223, 128);
const USER_BORDER: Color32 = Color32::from_rgb(134, 239, 172);
const ASSISTANT_FILL: Color32 = Color32::WHITE;
const ASSISTANT_BORDER: Color32 = Color32::from_rgb(229, 231, 235);
const TEXT_COLOR: Color32 = Color32::from_rgb(31, 41, 55);
const TIME_COLOR: Color32 = Color32::from_rgb(75, 85, 99);

pub fn frame(is_user: bool) -> egui::Frame {
    let (fill, border) = if is_user {
        (USER_FILL, USER_BORDER)
    } else {
        (ASSISTANT_FILL, ASSISTANT_BORDER)
    };
    egui::Frame::new()
        .fill(fill)
        .stroke(Stroke::new(2.0, border))
        .corner_radius(16.0)
        .inner_margin(egui::Margin::symmetric(16, 12))
}

/// User bubbles sit on the right, assistant bubbles on the left.
pub fn show(ui: &mut egui::Ui, message: &ChatMessage, cache: &mut MarkdownCache) {
    let layout = if message.is_user {
        Layout::right_to_left(Align::TOP)
    } else {
        Layout::left_to_right(Align::TOP)
    };
    let max_width = ui.available_width() * 0.75;

    ui.with_layout(layout, |ui| {
        frame(message.is_user).show(ui, |ui| {
            ui.set_max_width(max_width);
            ui.visuals_mut().override_text_color = Some(TEXT_COLOR);
            ui.vertical(|ui| {
                if message.is_user {
                    ui.add(egui::Label::new(&message.text).wrap());
                } else {
                    markdown::show(ui, cache.get(&message.id, &message.text));
                }
                ui.label(
                    RichText::new(time_label(message))
                        .size(10.0)
                        .color(TIME_COLOR),
                );
            });
        });
    });
}

fn time_label(message: &ChatMessage) -> String {
    message
        .timestamp
        .with_timezone(&Local)
        .format("%H:%M")
        .to_string()
}

/// Bubble shown on the assistant side while a reply is pending.
pub fn show_typing(ui: &mut egui::Ui) {
    ui.with_layout(Layout::left_to_right(Align::TOP), |ui| {
        frame(false).show(ui, |ui| {
            ui.spinner();
        });
    });
}
