use serde::{Deserialize, Serialize};

// Captioning request (image bytes travel base64-encoded)
#[derive(Debug, Serialize)]
pub struct CaptionRequest {
    pub inputs: String,
    pub parameters: CaptionParameters,
}

#[derive(Debug, Serialize)]
pub struct CaptionParameters {
    pub max_new_tokens: u32,
}

// Captioning response: an array of generated candidates
#[derive(Debug, Deserialize)]
pub struct CaptionCandidate {
    pub generated_text: String,
}
