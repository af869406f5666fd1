//! Generative model port for multi-part content generation APIs.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::credential::Credential;
use crate::error::StudioError;

/// Inline binary payload: base64 data plus its MIME type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineImage {
    /// MIME type of the payload (e.g., `"image/jpeg"`).
    pub mime_type: String,
    /// Base64-encoded bytes, without any data-URL prefix.
    pub data: String,
}

impl InlineImage {
    /// Wrap already-encoded data.
    pub fn new(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self { mime_type: mime_type.into(), data: data.into() }
    }
}

/// One element of an ordered request or response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Part {
    /// Plain text.
    Text {
        /// The text content.
        text: String,
    },
    /// Inline binary data.
    InlineData {
        /// The payload.
        inline_data: InlineImage,
    },
}

impl Part {
    /// A text part.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// An inline image part.
    #[must_use]
    pub fn image(image: InlineImage) -> Self {
        Self::InlineData { inline_data: image }
    }
}

/// What kind of output the request asks the model for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseModality {
    /// Text-only answer.
    Text,
    /// Image answer.
    Image,
}

/// A request to a generative model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentRequest {
    /// The resolved model identifier (e.g., `"gemini-2.5-flash-image"`).
    pub model: String,
    /// Optional system instruction.
    #[serde(default)]
    pub system_instruction: Option<String>,
    /// Ordered input parts.
    pub parts: Vec<Part>,
    /// Requested output modality.
    pub modality: ResponseModality,
}

/// Safety rating attached to a candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyRating {
    /// Harm category (e.g., `"HARM_CATEGORY_DANGEROUS_CONTENT"`).
    pub category: String,
    /// Probability bucket (e.g., `"NEGLIGIBLE"`).
    pub probability: String,
    /// Whether this category blocked the response.
    #[serde(default)]
    pub blocked: bool,
}

/// One candidate answer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Candidate {
    /// Content parts. Empty when the provider returned no content.
    #[serde(default)]
    pub parts: Vec<Part>,
    /// Why generation stopped (e.g., `"STOP"`, `"SAFETY"`).
    #[serde(default)]
    pub finish_reason: Option<String>,
    /// Safety diagnostics.
    #[serde(default)]
    pub safety_ratings: Vec<SafetyRating>,
}

/// A model response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentResponse {
    /// Candidate answers, possibly none.
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl ContentResponse {
    /// Concatenated text of the first candidate.
    #[must_use]
    pub fn text(&self) -> String {
        self.candidates
            .first()
            .map(|c| {
                c.parts
                    .iter()
                    .filter_map(|p| match p {
                        Part::Text { text } => Some(text.as_str()),
                        Part::InlineData { .. } => None,
                    })
                    .collect::<String>()
            })
            .unwrap_or_default()
    }

    /// The first inline payload of the first candidate.
    #[must_use]
    pub fn first_inline_image(&self) -> Option<&InlineImage> {
        self.candidates.first()?.parts.iter().find_map(|p| match p {
            Part::InlineData { inline_data } => Some(inline_data),
            Part::Text { .. } => None,
        })
    }
}

/// Boxed future type returned by [`GenerativeModel::generate_content`].
pub type GenerateFuture<'a> =
    Pin<Box<dyn Future<Output = Result<ContentResponse, StudioError>> + Send + 'a>>;

/// Generates content from ordered text/image parts via an external API.
pub trait GenerativeModel: Send + Sync {
    /// Issue one request authenticated with `credential`.
    fn generate_content(
        &self,
        credential: &Credential,
        request: &ContentRequest,
    ) -> GenerateFuture<'_>;
}
