pub mod blip;
pub mod groq;

mod http;

pub use blip::BlipCaptionProvider;
pub use groq::GroqChatProvider;
pub use http::HttpClient;

use crate::moderation::Result;
use async_trait::async_trait;

/// Core trait for hosted chat-completion providers
///
/// Implementations send a system+user message pair with deterministic
/// decoding and a strict-JSON response constraint, and return the raw
/// message content.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Provider identifier (e.g., "groq")
    fn id(&self) -> &'static str;

    /// Request a completion and return the assistant message content
    async fn complete(&self, system: &str, user: &str) -> Result<String>;
}

/// Core trait for hosted image-captioning providers
#[async_trait]
pub trait CaptionProvider: Send + Sync {
    /// Provider identifier (e.g., "blip")
    fn id(&self) -> &'static str;

    /// Generate a caption for the given encoded image bytes
    async fn caption(&self, image: &[u8], max_new_tokens: u32) -> Result<String>;
}
