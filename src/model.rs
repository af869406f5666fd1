//! Model name resolution.

/// Default model for prompt enhancement and captions.
pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";

/// Default model for image generation and edits.
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";

/// Short name aliases for popular models.
const ALIASES: &[(&str, &str)] = &[
    ("nano-banana", "gemini-2.5-flash-image"),
    ("nano-banana-pro", "gemini-3-pro-image-preview"),
    ("flash", "gemini-2.5-flash"),
    ("pro", "gemini-2.5-pro"),
];

/// Resolve a model name (alias or exact) to the full model identifier.
#[must_use]
pub fn resolve_model(name: &str) -> String {
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == name)
        .map_or_else(|| name.to_string(), |(_, full)| (*full).to_string())
}

/// The pair of models a session talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSet {
    /// Text model (enhancement, captions).
    pub text: String,
    /// Image model (generation, edits, variations).
    pub image: String,
}

impl ModelSet {
    /// Build a model set, resolving aliases.
    ///
    /// # Errors
    ///
    /// Returns an error if either name is not a Gemini model.
    pub fn new(text: &str, image: &str) -> Result<Self, String> {
        let text = resolve_model(text);
        let image = resolve_model(image);
        for model in [&text, &image] {
            if !model.starts_with("gemini") {
                return Err(format!("Unknown model '{model}'. Expected 'gemini-*' or an alias."));
            }
        }
        Ok(Self { text, image })
    }
}

impl Default for ModelSet {
    fn default() -> Self {
        Self { text: DEFAULT_TEXT_MODEL.to_string(), image: DEFAULT_IMAGE_MODEL.to_string() }
    }
}
