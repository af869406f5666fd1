//! Unified error type for nailstudio.

use thiserror::Error;

use crate::ports::SafetyRating;

/// Errors that can occur while driving a studio session.
#[derive(Debug, Error)]
pub enum StudioError {
    /// A required input (credential, prompt, master image, ...) is missing.
    ///
    /// Raised before any network I/O is attempted.
    #[error("{0}")]
    Precondition(String),

    /// Prompt enhancement failed.
    #[error("Could not enhance the prompt with Gemini.")]
    Generation(#[source] Box<StudioError>),

    /// An image call failed at the transport or provider level.
    #[error("Failed to generate a single image.")]
    ImageGeneration(#[source] Box<StudioError>),

    /// The provider answered but returned no inline image.
    #[error("Image generation failed. The API did not return an image. Finish Reason: {}.", .finish_reason.as_deref().unwrap_or("unknown"))]
    NoImageProduced {
        /// Finish reason reported on the first candidate, if any.
        finish_reason: Option<String>,
        /// Safety ratings reported on the first candidate.
        safety_ratings: Vec<SafetyRating>,
    },

    /// A text call succeeded but carried no text.
    #[error("The model returned no text. Finish Reason: {}.", .finish_reason.as_deref().unwrap_or("unknown"))]
    EmptyText {
        /// Finish reason reported on the first candidate, if any.
        finish_reason: Option<String>,
    },

    /// The variation call with the given 1-based number failed.
    #[error("Failed to generate variation {number}. Please try again.")]
    VariationGeneration {
        /// 1-based number of the failing call.
        number: usize,
        /// Underlying failure.
        #[source]
        source: Box<StudioError>,
    },

    /// The variation loop produced a different number of images than requested.
    #[error("Could not generate all the requested image variations ({produced} of {requested}).")]
    VariationCountMismatch {
        /// Number of variations requested.
        requested: usize,
        /// Number of variations produced.
        produced: usize,
    },

    /// Caption generation failed.
    #[error("Could not generate a caption with Gemini.")]
    CaptionGeneration(#[source] Box<StudioError>),

    /// An API returned an error response.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the API.
        message: String,
    },

    /// A network error occurred.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A reference image could not be read or encoded.
    #[error("Failed to read file as base64 string: {0}")]
    Read(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),

    /// Invalid argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Image format conversion error.
    #[error("Image conversion error: {0}")]
    ImageConversion(String),

    /// No API key configured.
    #[error("No API key for {provider}. Set {env_var} or add it to config file.")]
    MissingApiKey {
        /// The provider name.
        provider: String,
        /// The environment variable name.
        env_var: String,
    },

    /// The in-flight operation was aborted.
    #[error("Operation cancelled.")]
    Cancelled,
}

impl StudioError {
    /// Whether the provider answered but refused or produced nothing usable,
    /// as opposed to a transport failure.
    #[must_use]
    pub fn is_blocked_result(&self) -> bool {
        match self {
            Self::NoImageProduced { .. } => true,
            Self::VariationGeneration { source, .. } => source.is_blocked_result(),
            _ => false,
        }
    }
}
