use serde::{Deserialize, Serialize};

/// Violation tag classification
///
/// Exactly one tag applies per classified review. When several would apply,
/// the lower precedence rank wins (see [`Violation::precedence`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Violation {
    Advertisement,
    RantNoVisit,
    Irrelevant,
    ImageAdvertisement,
    ImageIrrelevant,
    Ok,
    /// Sentinel returned when the hosted model could not be reached
    #[serde(rename = "LLM_ERROR")]
    LlmError,
}

impl Violation {
    /// Precedence rank used when several tags would apply (lower wins)
    pub fn precedence(&self) -> u8 {
        match self {
            Self::Advertisement => 0,
            Self::RantNoVisit => 1,
            Self::Irrelevant => 2,
            Self::ImageAdvertisement => 3,
            Self::ImageIrrelevant => 4,
            Self::Ok => 5,
            Self::LlmError => 6,
        }
    }

    /// Whether this tag marks a policy violation
    pub fn is_violation(&self) -> bool {
        !matches!(self, Self::Ok | Self::LlmError)
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Advertisement => write!(f, "advertisement"),
            Self::RantNoVisit => write!(f, "rant_no_visit"),
            Self::Irrelevant => write!(f, "irrelevant"),
            Self::ImageAdvertisement => write!(f, "image_advertisement"),
            Self::ImageIrrelevant => write!(f, "image_irrelevant"),
            Self::Ok => write!(f, "ok"),
            Self::LlmError => write!(f, "LLM_ERROR"),
        }
    }
}

/// A single location review to moderate
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewRecord {
    /// Business category (place type), e.g. "Pizza restaurant"
    pub category: String,
    /// Star rating, if available
    pub rating: Option<f64>,
    /// Review text
    pub text: String,
    /// Business name for extra grounding
    pub place_name: Option<String>,
}

impl ReviewRecord {
    /// Create a new review with required fields
    pub fn new(category: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            rating: None,
            text: text.into(),
            place_name: None,
        }
    }

    /// Builder pattern: set rating
    pub fn with_rating(mut self, rating: Option<f64>) -> Self {
        self.rating = rating;
        self
    }

    /// Builder pattern: set place name
    pub fn with_place_name(mut self, place_name: impl Into<String>) -> Self {
        self.place_name = Some(place_name.into());
        self
    }
}

/// Classification record returned for every moderated review
///
/// Mirrors the JSON document the hosted model is instructed to emit. The
/// `relevant` and `confidence` keys are absent on the error record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relevant: Option<bool>,
    pub violation: Violation,
    /// Mirror of `violation`, kept for downstream consumers
    pub classification: Violation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub reasoning: String,
    #[serde(default)]
    pub indicators: Vec<String>,
    /// Caption used to augment the review text, present on image-augmented
    /// results only
    #[serde(rename = "_image_caption", skip_serializing_if = "Option::is_none")]
    pub image_caption: Option<String>,
}

impl Classification {
    /// The fixed error-shaped record returned when the hosted model could
    /// not produce a classification
    pub fn llm_error(reason: impl Into<String>) -> Self {
        Self {
            relevant: None,
            violation: Violation::LlmError,
            classification: Violation::LlmError,
            confidence: None,
            reasoning: reason.into(),
            indicators: Vec::new(),
            image_caption: None,
        }
    }

    /// Whether this record is the error sentinel
    pub fn is_error(&self) -> bool {
        self.violation == Violation::LlmError
    }
}
