use std::path::Path;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::moderation::{
    Classification, ImageAugmentedClassifier, ReviewClassifier, ReviewRecord,
};

/// Agent configuration
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Pause between batch items to respect provider rate limits
    pub batch_delay: Duration,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            batch_delay: Duration::from_millis(250),
        }
    }
}

/// Moderation agent service orchestrating the classifiers
pub struct ModerationAgent {
    classifier: ReviewClassifier,
    augmented: Option<ImageAugmentedClassifier>,
    config: AgentConfig,
}

impl ModerationAgent {
    /// Create an agent over a text classifier
    pub fn new(classifier: ReviewClassifier) -> Self {
        Self {
            classifier,
            augmented: None,
            config: AgentConfig::default(),
        }
    }

    /// Builder pattern: attach an image-augmented classifier
    #[must_use]
    pub fn with_augmented(mut self, augmented: ImageAugmentedClassifier) -> Self {
        self.augmented = Some(augmented);
        self
    }

    /// Builder pattern: set agent configuration
    #[must_use]
    pub fn with_config(mut self, config: AgentConfig) -> Self {
        self.config = config;
        self
    }

    /// Moderate a single text-only review
    pub async fn moderate_review(&self, review: &ReviewRecord) -> Classification {
        info!(
            "Moderating review for {} ({})",
            review.place_name.as_deref().unwrap_or("<unnamed place>"),
            review.category
        );

        let result = self.classifier.classify(review).await;

        if result.is_error() {
            warn!("Review moderation fell back to the error record");
        } else {
            debug!(
                "Moderation outcome: {} (confidence: {:?})",
                result.violation, result.confidence
            );
        }

        result
    }

    /// Moderate a review together with its attached image
    ///
    /// Captioning failures are reported; classification failures are already
    /// folded into the error record.
    pub async fn moderate_review_with_image(
        &self,
        review: &ReviewRecord,
        image_path: &Path,
    ) -> Result<Classification, ModerationAgentError> {
        let augmented = self
            .augmented
            .as_ref()
            .ok_or(ModerationAgentError::AugmentedNotConfigured)?;

        info!(
            "Moderating review with image {} for {}",
            image_path.display(),
            review.place_name.as_deref().unwrap_or("<unnamed place>")
        );

        augmented
            .classify(review, image_path)
            .await
            .map_err(|e| ModerationAgentError::CaptionFailed(e.to_string()))
    }

    /// Moderate a batch of reviews sequentially
    pub async fn moderate_batch(&self, reviews: &[ReviewRecord]) -> Vec<Classification> {
        let mut results = Vec::with_capacity(reviews.len());

        for review in reviews {
            let result = self.moderate_review(review).await;
            results.push(result);

            if !self.config.batch_delay.is_zero() {
                tokio::time::sleep(self.config.batch_delay).await;
            }
        }

        let errors = results.iter().filter(|r| r.is_error()).count();
        info!(
            "Moderated {} reviews ({} error records)",
            results.len(),
            errors
        );

        results
    }
}

/// Moderation agent errors
#[derive(Debug, thiserror::Error)]
pub enum ModerationAgentError {
    #[error("No image-augmented classifier configured")]
    AugmentedNotConfigured,

    #[error("Captioning failed: {0}")]
    CaptionFailed(String),
}
