//! All calls to the external generative model.
//!
//! The gateway holds no credential of its own: every operation takes the
//! session's [`Credential`] explicitly, and a `&Credential` can only exist for
//! a non-empty key, so no request is ever built without one.

use std::time::Duration;

use crate::credential::Credential;
use crate::error::StudioError;
use crate::model::ModelSet;
use crate::ports::{ContentRequest, GenerativeModel, InlineImage, Part, ResponseModality};
use crate::prompts;

/// Pause between consecutive variation requests.
pub const DEFAULT_VARIATION_DELAY: Duration = Duration::from_secs(3);

/// Builds multi-part requests for the text and image models and interprets
/// their responses.
pub struct AiGateway {
    model: Box<dyn GenerativeModel>,
    models: ModelSet,
    variation_delay: Duration,
}

impl AiGateway {
    /// Create a gateway over the given port.
    #[must_use]
    pub fn new(model: Box<dyn GenerativeModel>, models: ModelSet) -> Self {
        Self { model, models, variation_delay: DEFAULT_VARIATION_DELAY }
    }

    /// Override the pause between variation requests.
    #[must_use]
    pub fn with_variation_delay(mut self, delay: Duration) -> Self {
        self.variation_delay = delay;
        self
    }

    /// The models requests are sent to.
    #[must_use]
    pub fn models(&self) -> &ModelSet {
        &self.models
    }

    /// Ask the text model for a single-paragraph, style-grounded image prompt.
    ///
    /// # Errors
    ///
    /// Returns [`StudioError::Generation`] wrapping the provider failure.
    pub async fn enhance_prompt(
        &self,
        credential: &Credential,
        reference: Option<&InlineImage>,
        current: &str,
    ) -> Result<String, StudioError> {
        let mut parts = Vec::with_capacity(2);
        if let Some(image) = reference {
            parts.push(Part::image(image.clone()));
        }
        parts.push(Part::text(prompts::enhance_request(current)));

        self.generate_text(credential, prompts::enhance_system_instruction(), parts)
            .await
            .map_err(|e| {
                tracing::error!("Error enhancing prompt: {e}");
                StudioError::Generation(Box::new(e))
            })
    }

    /// Generate the first master image, reference image first when present.
    ///
    /// # Errors
    ///
    /// See [`AiGateway::edit_image`].
    pub async fn generate_initial_image(
        &self,
        credential: &Credential,
        prompt: &str,
        reference: Option<&InlineImage>,
    ) -> Result<InlineImage, StudioError> {
        let mut parts = vec![Part::text(prompt)];
        if let Some(image) = reference {
            parts.insert(0, Part::image(image.clone()));
        }
        self.generate_single_image(credential, parts).await
    }

    /// Edit the master image with `prompt`. A new reference image, when
    /// given, goes before the master.
    ///
    /// # Errors
    ///
    /// Returns [`StudioError::NoImageProduced`] when the provider answered
    /// without an image, and [`StudioError::ImageGeneration`] for transport or
    /// provider errors.
    pub async fn edit_image(
        &self,
        credential: &Credential,
        prompt: &str,
        master: &InlineImage,
        reference: Option<&InlineImage>,
    ) -> Result<InlineImage, StudioError> {
        let mut parts = vec![Part::image(master.clone()), Part::text(prompt)];
        if let Some(image) = reference {
            parts.insert(0, Part::image(image.clone()));
        }
        self.generate_single_image(credential, parts).await
    }

    /// Generate `count` pose variations of the master, one request at a time.
    ///
    /// Poses are taken from [`prompts::POSES`] in order, wrapping after the
    /// tenth. The first failure aborts the batch and nothing is returned.
    ///
    /// # Errors
    ///
    /// Returns [`StudioError::VariationGeneration`] naming the failed call.
    pub async fn generate_image_variations(
        &self,
        credential: &Credential,
        master: &InlineImage,
        count: usize,
    ) -> Result<Vec<InlineImage>, StudioError> {
        let mut variations = Vec::with_capacity(count);

        for index in 0..count {
            let pose = prompts::pose_for(index);
            tracing::info!("Generating variation {} with pose: {pose}", index + 1);

            let parts = vec![Part::image(master.clone()), Part::text(prompts::variation_instruction(pose))];
            let image = self.generate_single_image(credential, parts).await.map_err(|e| {
                tracing::error!("Error generating variation {}: {e}", index + 1);
                StudioError::VariationGeneration { number: index + 1, source: Box::new(e) }
            })?;
            variations.push(image);

            // Rate limit
            if index + 1 < count {
                tokio::time::sleep(self.variation_delay).await;
            }
        }

        if variations.len() != count {
            return Err(StudioError::VariationCountMismatch {
                requested: count,
                produced: variations.len(),
            });
        }
        Ok(variations)
    }

    /// Write the five-line social caption for the described design.
    ///
    /// The template (15 keywords, 5 hashtags) is an instruction to the model
    /// and is not checked here.
    ///
    /// # Errors
    ///
    /// Returns [`StudioError::CaptionGeneration`] wrapping the provider failure.
    pub async fn generate_caption(
        &self,
        credential: &Credential,
        prompt: &str,
    ) -> Result<String, StudioError> {
        let parts = vec![Part::text(prompts::caption_request(prompt))];
        self.generate_text(credential, prompts::caption_system_instruction(), parts)
            .await
            .map_err(|e| {
                tracing::error!("Error generating caption: {e}");
                StudioError::CaptionGeneration(Box::new(e))
            })
    }

    async fn generate_text(
        &self,
        credential: &Credential,
        system_instruction: String,
        parts: Vec<Part>,
    ) -> Result<String, StudioError> {
        let request = ContentRequest {
            model: self.models.text.clone(),
            system_instruction: Some(system_instruction),
            parts,
            modality: ResponseModality::Text,
        };
        let response = self.model.generate_content(credential, &request).await?;
        let text = response.text().trim().to_string();
        if text.is_empty() {
            let finish_reason = response.candidates.first().and_then(|c| c.finish_reason.clone());
            return Err(StudioError::EmptyText { finish_reason });
        }
        Ok(text)
    }

    async fn generate_single_image(
        &self,
        credential: &Credential,
        parts: Vec<Part>,
    ) -> Result<InlineImage, StudioError> {
        let request = ContentRequest {
            model: self.models.image.clone(),
            system_instruction: None,
            parts,
            modality: ResponseModality::Image,
        };

        let response = self.model.generate_content(credential, &request).await.map_err(|e| {
            tracing::error!("Error during single image generation: {e}");
            StudioError::ImageGeneration(Box::new(e))
        })?;

        if let Some(image) = response.first_inline_image() {
            return Ok(image.clone());
        }

        let candidate = response.candidates.first();
        let finish_reason = candidate.and_then(|c| c.finish_reason.clone());
        let safety_ratings = candidate.map(|c| c.safety_ratings.clone()).unwrap_or_default();
        tracing::warn!(
            finish_reason = finish_reason.as_deref().unwrap_or("unknown"),
            safety_ratings = ?safety_ratings,
            "The API did not return an image"
        );
        Err(StudioError::NoImageProduced { finish_reason, safety_ratings })
    }
}
