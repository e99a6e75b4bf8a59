use std::path::Path;

use tracing::debug;

use super::Result;
use super::captioner::Captioner;
use super::classifier::ReviewClassifier;
use super::types::{Classification, ReviewRecord};

/// Classifier for reviews that carry an attached image
///
/// Captions the image, appends the caption to the review text as a trailing
/// sentence, and delegates the decision to the text classifier. Captioning
/// failures propagate; classification failures are already absorbed into the
/// error record by the text classifier.
pub struct ImageAugmentedClassifier {
    captioner: Captioner,
    classifier: ReviewClassifier,
}

impl ImageAugmentedClassifier {
    /// Compose a captioner and a text classifier
    pub fn new(captioner: Captioner, classifier: ReviewClassifier) -> Self {
        Self {
            captioner,
            classifier,
        }
    }

    /// Classify a review together with its attached image
    pub async fn classify(
        &self,
        review: &ReviewRecord,
        image_path: &Path,
    ) -> Result<Classification> {
        let caption = self.captioner.caption(image_path).await?;

        let mut augmented = review.clone();
        augmented.text = augment_text(&review.text, &caption);

        debug!("Augmented review text: {}", augmented.text);

        let mut result = self.classifier.classify(&augmented).await;
        result.image_caption = Some(caption);

        Ok(result)
    }
}

/// Append the caption sentence to the review text
pub(crate) fn augment_text(base: &str, caption: &str) -> String {
    let base = base.trim();
    if base.is_empty() {
        format!("With a picture of {caption}.")
    } else {
        format!("{base} With a picture of {caption}.")
    }
}
