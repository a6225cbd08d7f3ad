use eframe::egui::{self, Align};

use crate::common::ChatMessage;

use super::markdown::MarkdownCache;
use super::message_bubble;

pub fn render(
    ui: &mut egui::Ui,
    messages: &[ChatMessage],
    pending: bool,
    scroll_to_bottom: bool,
    cache: &mut MarkdownCache,
) {
    egui::ScrollArea::vertical()
        .auto_shrink([false; 2])
        .stick_to_bottom(true)
        .show(ui, |ui| {
            for message in messages {
                message_bubble::show(ui, message, cache);
                ui.add_space(12.0);
            }

            if pending {
                message_bubble::show_typing(ui);
            }

            let end = ui.allocate_response(egui::vec2(1.0, 1.0), egui::Sense::hover());
            if scroll_to_bottom {
                end.scroll_to_me(Some(Align::BOTTOM));
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_conversation_headlessly() {
        let messages = vec![
            ChatMessage::assistant("## Products\n\n- **Urea**\n- [DAP](https://lcb.example)"),
            ChatMessage::user("Tell me about your fertilizers"),
        ];
        let mut cache = MarkdownCache::default();

        let ctx = egui::Context::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                render(ui, &messages, true, true, &mut cache);
            });
        });

        assert_eq!(cache.get(&messages[0].id, "").len(), 2);
    }
}
