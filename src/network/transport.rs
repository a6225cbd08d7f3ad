use reqwest::{Client, StatusCode};
use thiserror::Error;

use crate::common::{ChatRequest, ChatResponse, Language, Reply};
use crate::config::AppConfig;

pub const FALLBACK_REPLY: &str = "Sorry, I could not process that. Please try again.";

/// Why a turn could not be delivered. Only ever logged; the UI sees `Reply::Failed`.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("chat endpoint returned {0}")]
    Status(StatusCode),
}

/// One POST per user turn; no retries, no timeout.
#[derive(Debug, Clone)]
pub struct ChatTransport {
    client: Client,
    chat_url: String,
}

impl ChatTransport {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            chat_url: config.chat_url(),
        }
    }

    pub fn chat_url(&self) -> &str {
        &self.chat_url
    }

    pub async fn send(&self, text: &str, language: Language) -> Reply {
        match self.post(text, language).await {
            Ok(body) => {
                if body.success == Some(false) {
                    log::debug!("Chat endpoint flagged reply as unsuccessful");
                }
                match body.response.filter(|reply| !reply.is_empty()) {
                    Some(reply) => Reply::Delivered(reply),
                    None => Reply::Delivered(FALLBACK_REPLY.to_string()),
                }
            }
            Err(err) => {
                log::warn!("Error sending message: {err}");
                Reply::failed(language)
            }
        }
    }

    async fn post(&self, text: &str, language: Language) -> Result<ChatResponse, DeliveryError> {
        log::debug!("POST {} ({:?}, {} bytes)", self.chat_url, language, text.len());

        let response = self
            .client
            .post(&self.chat_url)
            .json(&ChatRequest {
                message: text,
                language,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DeliveryError::Status(status));
        }

        Ok(response.json::<ChatResponse>().await?)
    }
}
