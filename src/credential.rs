//! The API key held for the lifetime of a session.

use std::fmt;

use crate::error::StudioError;

/// An opaque, non-empty API key.
///
/// Only ever held in memory. The `Debug` output is redacted and the type is
/// deliberately not `Serialize`, so it cannot end up in logs or cassettes.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Build a credential from user input, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`StudioError::Precondition`] if the key is empty after trimming.
    pub fn new(key: impl AsRef<str>) -> Result<Self, StudioError> {
        let key = key.as_ref().trim();
        if key.is_empty() {
            return Err(StudioError::Precondition("API Key is missing.".into()));
        }
        Ok(Self(key.to_string()))
    }

    /// The raw key, for placing in a request header.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}
