mod common;
mod config;
mod network;
mod ui;

use std::env;

use clap::Parser;
use dotenvy::dotenv;
use network::{ChatClient, ChatTransport};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use ui::ChatApp;

#[derive(Parser)]
#[command(
    name = "lcb_chatbot",
    version,
    about = "LCB Fertilizers customer support chat"
)]
struct Cli {
    /// Path to JSON config file
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH, value_name = "FILE")]
    config: String,
    /// Base URL of the chat backend (overrides config and LCB_CHAT_ENDPOINT)
    #[arg(long, value_name = "URL")]
    endpoint: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), eframe::Error> {
    dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    let app_config = config::load_config(&cli.config)
        .with_endpoint_overrides(env::var(config::ENDPOINT_ENV).ok(), cli.endpoint);
    log::info!("Using chat endpoint {}", app_config.chat_url());

    // UI -> Network
    let (cmd_tx, cmd_rx) = mpsc::channel(16);
    // Network -> UI
    let (event_tx, event_rx) = mpsc::channel(16);

    let runtime = Handle::current();
    let transport = ChatTransport::new(&app_config);
    let mut network = Some((transport, event_tx, cmd_rx));
    let mut event_rx = Some(event_rx);

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_title("LCB Fertilizers")
            .with_inner_size([720.0, 800.0]),
        ..Default::default()
    };

    eframe::run_native(
        "LCB Fertilizers",
        options,
        Box::new(move |cc| {
            let event_receiver = event_rx
                .take()
                .expect("ChatApp should only be initialized once");

            // The client needs the egui context to wake the UI on replies.
            if let Some((transport, event_tx, cmd_rx)) = network.take() {
                let client =
                    ChatClient::new(transport, event_tx, cmd_rx).with_repaint(cc.egui_ctx.clone());
                runtime.spawn(client.run());
            }

            Ok(Box::new(ChatApp::new(
                cc,
                &app_config,
                cmd_tx.clone(),
                event_receiver,
            )))
        }),
    )
}
