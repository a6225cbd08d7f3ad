use tokio::sync::mpsc;

use crate::common::{ChatCommand, ChatEvent};

use super::transport::ChatTransport;

pub struct ChatClient {
    transport: ChatTransport,
    event_sender: mpsc::Sender<ChatEvent>,
    command_receiver: mpsc::Receiver<ChatCommand>,
    repaint: Option<egui::Context>,
}

impl ChatClient {
    pub fn new(
        transport: ChatTransport,
        event_sender: mpsc::Sender<ChatEvent>,
        command_receiver: mpsc::Receiver<ChatCommand>,
    ) -> Self {
        Self {
            transport,
            event_sender,
            command_receiver,
            repaint: None,
        }
    }

    /// Wake the UI after each reply instead of repainting every frame.
    pub fn with_repaint(mut self, ctx: egui::Context) -> Self {
        self.repaint = Some(ctx);
        self
    }

    pub async fn run(mut self) {
        log::info!("Chat client started for {}", self.transport.chat_url());

        while let Some(command) = self.command_receiver.recv().await {
            if !self.handle_command(command).await {
                break;
            }
        }

        log::info!("Chat client stopped");
    }

    async fn handle_command(&mut self, command: ChatCommand) -> bool {
        match command {
            ChatCommand::SendMessage { text, language } => {
                let reply = self.transport.send(&text, language).await;
                log::debug!("Turn settled (delivered: {})", reply.is_delivered());

                if let Err(err) = self
                    .event_sender
                    .send(ChatEvent::ReplyReceived(reply))
                    .await
                {
                    log::warn!("Failed to notify UI about reply: {err}");
                    return false;
                }

                if let Some(ctx) = &self.repaint {
                    ctx.request_repaint();
                }
            }
        }
        true
    }
}
