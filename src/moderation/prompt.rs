//! Prompt construction for the hosted chat model

use super::types::ReviewRecord;

/// System message sent with every classification request
pub const SYSTEM_MESSAGE: &str = "You are a strict review moderation classifier. \
    Return STRICT JSON only (double-quoted keys/strings). \
    Booleans must be lowercase true/false. No extra text.";

/// Ellipsis marker appended to truncated text
pub const ELLIPSIS: char = '\u{2026}';

/// Build the user message for a review, with `text` already truncated
pub fn build_user_message(review: &ReviewRecord, text: &str) -> String {
    let rating = review
        .rating
        .map(|r| r.to_string())
        .unwrap_or_default();

    format!(
        r#"Task: Classify a location review for relevance and policy violations.

Definitions (pick exactly one violation):
- advertisement: contains promotional links/codes, phone numbers, coupons, "call now", or unrelated marketing.
- rant_no_visit: reviewer clearly states they did not visit (e.g., "never been", "haven't been", "heard it's...").
- irrelevant: off-topic; not about this place or its services; about another product/person/event; misplaced review (clearly for a different business type); filler/emoji-only.
- image_advertisement: the attached picture shows promotional or marketing material unrelated to a genuine visit.
- image_irrelevant: the attached picture has nothing to do with this place or its services.
- ok: none of the above AND the review is about this place.

Precedence: if several definitions apply, pick the first matching one in the
order advertisement, rant_no_visit, irrelevant, image_advertisement,
image_irrelevant, ok.

Intent & fallback principle:
If none of the violation categories apply and the review is about the place, classify as "ok".
Default to "ok" when in doubt, because the goal is to increase user trust, ensure fair business representation, and enhance platform credibility.

Output STRICT JSON only (double-quoted keys/strings; booleans lowercase):
{{
  "relevant": true|false,
  "violation": "advertisement"|"rant_no_visit"|"irrelevant"|"image_advertisement"|"image_irrelevant"|"ok",
  "classification": "advertisement"|"rant_no_visit"|"irrelevant"|"image_advertisement"|"image_irrelevant"|"ok",
  "confidence": 0.0-1.0,
  "reasoning": "<short phrase>",
  "indicators": ["token1","token2"]
}}

Data:
Place Name: {place_name}
Place Type: {place_type}
Rating: {rating}
Text: "{review_text}"
"#,
        place_name = review.place_name.as_deref().unwrap_or(""),
        place_type = review.category,
        rating = rating,
        review_text = escape_quotes(text),
    )
}

/// Truncate `text` past `budget` characters, appending an ellipsis marker
///
/// Operates on characters, not bytes, so multi-byte input never splits.
pub fn truncate(text: &str, budget: usize) -> String {
    if text.chars().count() <= budget {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(budget).collect();
    truncated.push(ELLIPSIS);
    truncated
}

/// Escape embedded double quotes so the review text survives the template
fn escape_quotes(text: &str) -> String {
    text.replace('"', "\\\"")
}
