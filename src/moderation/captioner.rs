use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use super::prompt;
use super::provider::CaptionProvider;
use super::{ModerationError, Result};

/// Captioner configuration
#[derive(Debug, Clone)]
pub struct CaptionOptions {
    /// Generation token budget for the hosted model
    pub max_new_tokens: u32,
    /// Character budget for the returned caption
    pub max_chars: usize,
}

impl Default for CaptionOptions {
    fn default() -> Self {
        Self {
            max_new_tokens: 40,
            max_chars: 300,
        }
    }
}

impl CaptionOptions {
    /// Builder pattern: set the generation token budget
    pub fn with_max_new_tokens(mut self, max_new_tokens: u32) -> Self {
        self.max_new_tokens = max_new_tokens;
        self
    }

    /// Builder pattern: set the caption character budget
    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }
}

/// Image captioner over a hosted vision-language model
///
/// Explicitly constructed and caller-owned; there is no lazily initialized
/// global model handle.
pub struct Captioner {
    provider: Arc<dyn CaptionProvider>,
    options: CaptionOptions,
}

impl Captioner {
    /// Create a captioner over the given provider handle
    pub fn new(provider: Arc<dyn CaptionProvider>, options: CaptionOptions) -> Self {
        Self { provider, options }
    }

    /// Generate a short caption for a local image file
    ///
    /// Fails with `NotFound` if the path is not a file and with `Decode` if
    /// the file is not a readable image. No retry at this layer.
    pub async fn caption(&self, image_path: &Path) -> Result<String> {
        self.caption_with_budget(image_path, None).await
    }

    /// Generate a caption with an explicit generation token budget
    pub async fn caption_with_budget(
        &self,
        image_path: &Path,
        max_new_tokens: Option<u32>,
    ) -> Result<String> {
        if !image_path.is_file() {
            return Err(ModerationError::NotFound(format!(
                "Image not found: {}",
                image_path.display()
            )));
        }

        let bytes = tokio::fs::read(image_path).await?;

        // Validate the image before the hosted call
        image::load_from_memory(&bytes).map_err(|e| {
            ModerationError::Decode(format!(
                "Unable to open image '{}': {e}",
                image_path.display()
            ))
        })?;

        let tokens = max_new_tokens.unwrap_or(self.options.max_new_tokens);
        let raw = self.provider.caption(&bytes, tokens).await?;
        let caption = prompt::truncate(raw.trim(), self.options.max_chars);

        debug!(
            "Captioned {} via {}: {}",
            image_path.display(),
            self.provider.id(),
            caption
        );

        Ok(caption)
    }
}
