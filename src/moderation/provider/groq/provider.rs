use super::api_types::{ChatMessage, ChatRequest, ChatResponse, ResponseFormat};
use crate::moderation::{
    ModerationError, Result,
    provider::{ChatProvider, HttpClient},
};
use async_trait::async_trait;
use tracing::debug;

const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Default model used when none is configured
pub const DEFAULT_CHAT_MODEL: &str = "llama-3.1-8b-instant";

/// Default reply token budget
pub const DEFAULT_MAX_TOKENS: u32 = 300;

/// Hosted chat-completion provider (Groq, OpenAI-compatible wire shape)
pub struct GroqChatProvider {
    client: HttpClient,
    model: String,
    max_tokens: u32,
}

impl GroqChatProvider {
    /// Create a provider with an explicit API key and model
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: HttpClient::new(GROQ_BASE_URL).with_bearer(api_key),
            model: model.into(),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    /// Create a provider using `GROQ_API_KEY` from `.env` / environment
    ///
    /// A missing key is a fatal configuration error at construction time.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        let key = std::env::var("GROQ_API_KEY").map_err(|_| {
            ModerationError::Config(
                "Missing GROQ_API_KEY. Put it in .env or as an environment variable.".to_string(),
            )
        })?;
        Ok(Self::new(key, DEFAULT_CHAT_MODEL))
    }

    /// Builder pattern: set the model identifier
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Builder pattern: set the reply token budget
    #[must_use]
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Model identifier this provider sends
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl ChatProvider for GroqChatProvider {
    fn id(&self) -> &'static str {
        "groq"
    }

    async fn complete(&self, system: &str, user: &str) -> Result<String> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user.to_string(),
                },
            ],
            // Deterministic decoding for labeling
            temperature: 0.0,
            response_format: ResponseFormat::json_object(),
            max_tokens: self.max_tokens,
        };

        let response: ChatResponse = self.client.post_json("/chat/completions", &request).await?;

        if let Some(usage) = &response.usage {
            debug!(
                "Chat completion used {:?} prompt / {:?} completion tokens",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| ModerationError::Parse("Chat response missing content".to_string()))
    }
}
