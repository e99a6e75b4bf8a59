mod augment;
mod captioner;
mod classifier;
mod prompt;
mod provider;
mod retry;
mod types;


pub use augment::ImageAugmentedClassifier;
pub use captioner::{CaptionOptions, Captioner};
pub use classifier::{ClassifierOptions, ReviewClassifier};
pub use provider::{
    BlipCaptionProvider, CaptionProvider, ChatProvider, GroqChatProvider, HttpClient,
};
pub use retry::RetryPolicy;
pub use types::{Classification, ReviewRecord, Violation};

/// Moderation result type
pub type Result<T> = std::result::Result<T, ModerationError>;

/// Moderation error types
#[derive(Debug, thiserror::Error)]
pub enum ModerationError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
