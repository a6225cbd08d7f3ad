use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::common::Language;

pub const DEFAULT_CONFIG_PATH: &str = "config/chat.json";
pub const DEFAULT_ENDPOINT: &str = "http://localhost:5001";
pub const ENDPOINT_ENV: &str = "LCB_CHAT_ENDPOINT";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the chat backend; requests go to `{endpoint_base_url}/api/chat`.
    pub endpoint_base_url: String,
    pub default_language: Language,
    /// Font registered with egui so Devanagari text renders.
    pub devanagari_font: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint_base_url: DEFAULT_ENDPOINT.to_string(),
            default_language: Language::default(),
            devanagari_font: None,
        }
    }
}

impl AppConfig {
    pub fn chat_url(&self) -> String {
        format!("{}/api/chat", self.endpoint_base_url.trim_end_matches('/'))
    }

    /// Applies `LCB_CHAT_ENDPOINT` and then the CLI flag, later ones winning.
    pub fn with_endpoint_overrides(mut self, env: Option<String>, cli: Option<String>) -> Self {
        if let Some(endpoint) = cli.or(env).filter(|value| !value.trim().is_empty()) {
            self.endpoint_base_url = endpoint.trim().to_string();
        }
        self
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

pub fn read_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str::<AppConfig>(&content).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })
}

pub fn load_config(path: &str) -> AppConfig {
    match read_config(Path::new(path)) {
        Ok(config) => config,
        Err(ConfigError::Read { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
            log::info!("Config file {path} not found; using defaults");
            AppConfig::default()
        }
        Err(err) => {
            log::warn!("{err}; using defaults");
            AppConfig::default()
        }
    }
}
