use std::sync::Arc;

use tracing::{debug, warn};

use super::prompt;
use super::provider::ChatProvider;
use super::retry::RetryPolicy;
use super::types::{Classification, ReviewRecord};
use super::{ModerationError, Result};

/// Text classifier configuration
#[derive(Debug, Clone)]
pub struct ClassifierOptions {
    /// Character budget for the review text; longer input is truncated
    pub max_text_chars: usize,
    /// Retry policy for transient API failures
    pub retry: RetryPolicy,
}

impl Default for ClassifierOptions {
    fn default() -> Self {
        Self {
            max_text_chars: 2000,
            retry: RetryPolicy::default(),
        }
    }
}

impl ClassifierOptions {
    /// Builder pattern: set the text character budget
    pub fn with_max_text_chars(mut self, max_text_chars: usize) -> Self {
        self.max_text_chars = max_text_chars;
        self
    }

    /// Builder pattern: set the retry policy
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

/// Text review classifier backed by a hosted chat model
///
/// Classification never fails from the caller's point of view: exhausted
/// retries yield the fixed `LLM_ERROR` record so results can always be
/// treated as data.
pub struct ReviewClassifier {
    provider: Arc<dyn ChatProvider>,
    options: ClassifierOptions,
}

impl ReviewClassifier {
    /// Create a classifier over the given provider handle
    pub fn new(provider: Arc<dyn ChatProvider>, options: ClassifierOptions) -> Self {
        Self { provider, options }
    }

    /// Classify a single text-only review
    pub async fn classify(&self, review: &ReviewRecord) -> Classification {
        let safe_text = prompt::truncate(review.text.trim(), self.options.max_text_chars);
        let user_message = prompt::build_user_message(review, &safe_text);

        let outcome = self
            .options
            .retry
            .run(|| self.request_classification(&user_message))
            .await;

        match outcome {
            Ok(classification) => {
                debug!(
                    "Review classified as {} (provider: {})",
                    classification.violation,
                    self.provider.id()
                );
                classification
            }
            Err(err) => {
                warn!(
                    "Classification failed after {} attempts: {}",
                    self.options.retry.attempts(),
                    err
                );
                Classification::llm_error(err.to_string())
            }
        }
    }

    async fn request_classification(&self, user_message: &str) -> Result<Classification> {
        let content = self
            .provider
            .complete(prompt::SYSTEM_MESSAGE, user_message)
            .await?;

        serde_json::from_str(&content)
            .map_err(|e| ModerationError::Parse(format!("Model reply was not valid JSON: {e}")))
    }
}
