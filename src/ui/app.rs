use std::fs;
use std::path::Path;
use std::sync::Arc;

use eframe::egui;
use tokio::sync::mpsc;

use crate::common::{ChatCommand, ChatEvent, Reply};
use crate::config::AppConfig;

use super::components::markdown::MarkdownCache;
use super::components::{chat_area, header, input_bar, quick_questions};
use super::state::{ConversationStore, UiAction};

pub struct ChatApp {
    store: ConversationStore,
    markdown: MarkdownCache,
    command_sender: mpsc::Sender<ChatCommand>,
    event_receiver: mpsc::Receiver<ChatEvent>,
}

impl ChatApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: &AppConfig,
        command_sender: mpsc::Sender<ChatCommand>,
        event_receiver: mpsc::Receiver<ChatEvent>,
    ) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::light());
        if let Some(path) = &config.devanagari_font {
            install_font(&cc.egui_ctx, path);
        }

        Self {
            store: ConversationStore::new(config.default_language),
            markdown: MarkdownCache::default(),
            command_sender,
            event_receiver,
        }
    }

    fn handle_chat_events(&mut self) {
        while let Ok(event) = self.event_receiver.try_recv() {
            match event {
                ChatEvent::ReplyReceived(reply) => self.store.settle(reply),
            }
        }
    }

    fn apply(&mut self, action: UiAction) {
        if let Some(command) = self.store.dispatch(action) {
            self.send_command(command);
        }
    }

    fn send_command(&mut self, command: ChatCommand) {
        let ChatCommand::SendMessage { language, .. } = &command;
        let language = *language;

        if let Err(err) = self.command_sender.try_send(command) {
            log::warn!("Failed to send command to network: {err}");
            // Nothing will answer this turn, so close it here.
            self.store.settle(Reply::failed(language));
        }
    }
}

impl eframe::App for ChatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_chat_events();

        let mut actions = Vec::new();

        egui::TopBottomPanel::top("chat_header")
            .frame(
                egui::Frame::new()
                    .fill(header::HEADER_FILL)
                    .inner_margin(egui::Margin::same(16)),
            )
            .show(ctx, |ui| {
                actions.extend(header::render(ui, self.store.language()));
            });

        egui::TopBottomPanel::bottom("chat_input")
            .frame(egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::same(16)))
            .show(ctx, |ui| {
                actions.extend(quick_questions::render(ui, &self.store));
                actions.extend(input_bar::render(ui, &self.store));
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            let scroll = self.store.take_scroll_request();
            chat_area::render(
                ui,
                self.store.messages(),
                self.store.is_pending(),
                scroll,
                &mut self.markdown,
            );
        });

        for action in actions {
            self.apply(action);
        }
    }
}

fn install_font(ctx: &egui::Context, path: &Path) {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) => {
            log::warn!("Failed to load font {}: {err}", path.display());
            return;
        }
    };

    let mut fonts = egui::FontDefinitions::default();
    fonts.font_data.insert(
        "devanagari".to_owned(),
        Arc::new(egui::FontData::from_owned(bytes)),
    );
    for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
        fonts
            .families
            .entry(family)
            .or_default()
            .push("devanagari".to_owned());
    }
    ctx.set_fonts(fonts);
    log::info!("Loaded Devanagari font from {}", path.display());
}
