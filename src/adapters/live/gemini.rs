//! Live adapter for the Gemini `generateContent` API.

use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::credential::Credential;
use crate::error::StudioError;
use crate::ports::generative_model::{
    Candidate, ContentRequest, ContentResponse, GenerateFuture, GenerativeModel, InlineImage,
    Part, ResponseModality, SafetyRating,
};

/// Default endpoint prefix for Gemini models.
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Live Gemini model that calls the Google AI API.
pub struct GeminiModel {
    client: Client,
    base_url: String,
}

impl GeminiModel {
    /// Create a new Gemini adapter targeting `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client: Client::new(), base_url }
    }
}

impl Default for GeminiModel {
    fn default() -> Self {
        Self::new(GEMINI_API_BASE)
    }
}

impl GenerativeModel for GeminiModel {
    fn generate_content(
        &self,
        credential: &Credential,
        request: &ContentRequest,
    ) -> GenerateFuture<'_> {
        let credential = credential.clone();
        let request = request.clone();
        Box::pin(async move {
            let url = format!("{}/{}:generateContent", self.base_url, request.model);
            let body = request_body(&request);

            tracing::debug!(
                model = %request.model,
                parts = request.parts.len(),
                modality = ?request.modality,
                "Sending generateContent request"
            );

            let response = self
                .client
                .post(&url)
                .header("x-goog-api-key", credential.expose())
                .json(&body)
                .send()
                .await?;

            let status = response.status();
            let response_text = response.text().await?;

            if !status.is_success() {
                return Err(StudioError::Api { status: status.as_u16(), message: response_text });
            }

            let parsed: GeminiResponse = serde_json::from_str(&response_text).map_err(|e| {
                StudioError::Api { status: 200, message: format!("Failed to parse response: {e}") }
            })?;

            Ok(parsed.into_response())
        })
    }
}

/// Build the JSON body for a `generateContent` call.
fn request_body(request: &ContentRequest) -> Value {
    let parts: Vec<Value> = request
        .parts
        .iter()
        .map(|part| match part {
            Part::Text { text } => json!({ "text": text }),
            Part::InlineData { inline_data } => json!({
                "inlineData": {
                    "mimeType": inline_data.mime_type,
                    "data": inline_data.data,
                }
            }),
        })
        .collect();

    let mut body = json!({
        "contents": [{ "parts": parts }],
    });

    if let Some(ref instruction) = request.system_instruction {
        body["systemInstruction"] = json!({ "parts": [{ "text": instruction }] });
    }

    if request.modality == ResponseModality::Image {
        body["generationConfig"] = json!({ "responseModalities": ["IMAGE"] });
    }

    body
}

// --- Gemini API response types ---

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

impl GeminiResponse {
    fn into_response(self) -> ContentResponse {
        let candidates = self
            .candidates
            .into_iter()
            .map(|c| Candidate {
                parts: c
                    .content
                    .map(|content| content.parts.into_iter().filter_map(GeminiPart::into_part).collect())
                    .unwrap_or_default(),
                finish_reason: c.finish_reason,
                safety_ratings: c
                    .safety_ratings
                    .into_iter()
                    .map(|r| SafetyRating {
                        category: r.category,
                        probability: r.probability,
                        blocked: r.blocked,
                    })
                    .collect(),
            })
            .collect();
        ContentResponse { candidates }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiContent>,
    finish_reason: Option<String>,
    #[serde(default)]
    safety_ratings: Vec<GeminiSafetyRating>,
}

#[derive(Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

/// Assumed when the provider omits the MIME type of an inline image.
const FALLBACK_MIME_TYPE: &str = "image/jpeg";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPart {
    text: Option<String>,
    inline_data: Option<GeminiInlineData>,
}

impl GeminiPart {
    fn into_part(self) -> Option<Part> {
        if let Some(inline) = self.inline_data {
            let mime_type =
                if inline.mime_type.is_empty() { FALLBACK_MIME_TYPE.to_string() } else { inline.mime_type };
            return Some(Part::image(InlineImage::new(mime_type, inline.data)));
        }
        self.text.map(Part::text)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiInlineData {
    #[serde(default)]
    mime_type: String,
    data: String,
}

#[derive(Deserialize)]
struct GeminiSafetyRating {
    category: String,
    probability: String,
    #[serde(default)]
    blocked: bool,
}
