//! Layered application settings: defaults, optional TOML file, environment

use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Chat-completion settings
#[derive(Debug, Clone, Deserialize)]
pub struct ChatSettings {
    /// Hosted chat model identifier
    pub model: String,
    /// Reply token budget
    pub max_tokens: u32,
    /// Review text character budget before truncation
    pub max_text_chars: usize,
    /// Retries after the first failed attempt
    pub max_retries: u32,
    /// Base backoff delay in milliseconds
    pub retry_base_ms: u64,
}

/// Captioning settings
#[derive(Debug, Clone, Deserialize)]
pub struct CaptionSettings {
    /// Hosted captioning model identifier
    pub model: String,
    /// Generation token budget
    pub max_new_tokens: u32,
    /// Caption character budget before truncation
    pub max_chars: usize,
}

/// Downloader settings
#[derive(Debug, Clone, Deserialize)]
pub struct DownloadSettings {
    /// Directory the images are written under
    pub output_dir: PathBuf,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Upper bound on concurrent fetches
    pub max_workers: usize,
    /// Default cap on URLs taken from the CSV
    pub url_limit: usize,
}

/// Application settings
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub chat: ChatSettings,
    pub caption: CaptionSettings,
    pub download: DownloadSettings,
}

impl Settings {
    /// Load settings from defaults, an optional `revlens.toml` (working
    /// directory or user config directory), and `REVLENS__*` environment
    /// overrides, in that order
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("chat.model", "llama-3.1-8b-instant")?
            .set_default("chat.max_tokens", 300)?
            .set_default("chat.max_text_chars", 2000)?
            .set_default("chat.max_retries", 2)?
            .set_default("chat.retry_base_ms", 800)?
            .set_default("caption.model", "Salesforce/blip-image-captioning-base")?
            .set_default("caption.max_new_tokens", 40)?
            .set_default("caption.max_chars", 300)?
            .set_default("download.output_dir", "image")?
            .set_default("download.timeout_secs", 10)?
            .set_default("download.max_workers", 8)?
            .set_default("download.url_limit", 200)?;

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("revlens").join("revlens.toml");
            builder = builder.add_source(File::from(user_config).required(false));
        }

        builder
            .add_source(File::with_name("revlens").required(false))
            .add_source(Environment::with_prefix("REVLENS").separator("__"))
            .build()?
            .try_deserialize()
    }
}
