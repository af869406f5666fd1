//! Recording adapter for the `GenerativeModel` port.

use std::sync::{Arc, Mutex};

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::credential::Credential;
use crate::ports::generative_model::{ContentRequest, GenerateFuture, GenerativeModel};

/// Records content generation interactions while delegating to an inner implementation.
///
/// Only the request is recorded; the credential never reaches the cassette.
pub struct RecordingGenerativeModel {
    inner: Box<dyn GenerativeModel>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingGenerativeModel {
    /// Creates a new recording model wrapping the given implementation.
    pub fn new(inner: Box<dyn GenerativeModel>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl GenerativeModel for RecordingGenerativeModel {
    fn generate_content(
        &self,
        credential: &Credential,
        request: &ContentRequest,
    ) -> GenerateFuture<'_> {
        let credential = credential.clone();
        let request = request.clone();
        let recorder = Arc::clone(&self.recorder);

        Box::pin(async move {
            let result = self.inner.generate_content(&credential, &request).await;
            record_result(&recorder, "generative_model", "generate_content", &request, &result);
            result
        })
    }
}
