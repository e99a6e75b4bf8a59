use super::api_types::{CaptionCandidate, CaptionParameters, CaptionRequest};
use crate::moderation::{
    ModerationError, Result,
    provider::{CaptionProvider, HttpClient},
};
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;

const HF_INFERENCE_BASE_URL: &str = "https://api-inference.huggingface.co";

/// Default captioning model used when none is configured
pub const DEFAULT_CAPTION_MODEL: &str = "Salesforce/blip-image-captioning-base";

/// Hosted image-captioning provider (BLIP family, HuggingFace-style endpoint)
pub struct BlipCaptionProvider {
    client: HttpClient,
    model: String,
}

impl BlipCaptionProvider {
    /// Create a provider for the given model identifier
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            client: HttpClient::new(HF_INFERENCE_BASE_URL),
            model: model.into(),
        }
    }

    /// Builder pattern: authenticate with an API token
    #[must_use]
    pub fn with_api_token(mut self, token: impl Into<String>) -> Self {
        self.client = self.client.with_bearer(token);
        self
    }

    /// Model identifier this provider queries
    pub fn model(&self) -> &str {
        &self.model
    }
}

impl Default for BlipCaptionProvider {
    fn default() -> Self {
        Self::new(DEFAULT_CAPTION_MODEL)
    }
}

#[async_trait]
impl CaptionProvider for BlipCaptionProvider {
    fn id(&self) -> &'static str {
        "blip"
    }

    async fn caption(&self, image: &[u8], max_new_tokens: u32) -> Result<String> {
        let request = CaptionRequest {
            inputs: BASE64.encode(image),
            parameters: CaptionParameters { max_new_tokens },
        };

        let endpoint = format!("/models/{}", self.model);
        let candidates: Vec<CaptionCandidate> =
            self.client.post_json(&endpoint, &request).await?;

        candidates
            .into_iter()
            .next()
            .map(|c| c.generated_text)
            .ok_or_else(|| {
                ModerationError::Parse("Captioning response contained no candidates".to_string())
            })
    }
}
