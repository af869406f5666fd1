//! Scripted fake of the generative model port for unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::credential::Credential;
use crate::error::StudioError;
use crate::ports::{
    Candidate, ContentRequest, ContentResponse, GenerateFuture, GenerativeModel, InlineImage,
    Part, SafetyRating,
};

/// What the fake does for one call.
pub enum Reply {
    /// Resolve immediately with this result.
    Respond(Result<ContentResponse, StudioError>),
    /// Never resolve.
    Hang,
}

/// Shared log of every request the fake received.
pub type RequestLog = Arc<Mutex<Vec<ContentRequest>>>;

/// Serves scripted replies in order and logs requests.
pub struct ScriptedModel {
    replies: Mutex<VecDeque<Reply>>,
    log: RequestLog,
}

impl ScriptedModel {
    pub fn new(replies: Vec<Reply>) -> (Self, RequestLog) {
        let log = RequestLog::default();
        (Self { replies: Mutex::new(replies.into()), log: Arc::clone(&log) }, log)
    }
}

impl GenerativeModel for ScriptedModel {
    fn generate_content(
        &self,
        credential: &Credential,
        request: &ContentRequest,
    ) -> GenerateFuture<'_> {
        assert!(!credential.expose().is_empty());
        self.log.lock().unwrap().push(request.clone());
        let reply = self.replies.lock().unwrap().pop_front().expect("script exhausted");
        match reply {
            Reply::Respond(result) => Box::pin(async move { result }),
            Reply::Hang => Box::pin(std::future::pending::<Result<ContentResponse, StudioError>>()),
        }
    }
}

pub fn text(s: &str) -> Reply {
    Reply::Respond(Ok(ContentResponse {
        candidates: vec![Candidate {
            parts: vec![Part::text(s)],
            finish_reason: Some("STOP".into()),
            safety_ratings: Vec::new(),
        }],
    }))
}

pub fn image(data: &str) -> Reply {
    Reply::Respond(Ok(ContentResponse {
        candidates: vec![Candidate {
            parts: vec![Part::image(InlineImage::new("image/png", data))],
            finish_reason: Some("STOP".into()),
            safety_ratings: Vec::new(),
        }],
    }))
}

pub fn blocked(reason: &str) -> Reply {
    Reply::Respond(Ok(ContentResponse {
        candidates: vec![Candidate {
            parts: Vec::new(),
            finish_reason: Some(reason.into()),
            safety_ratings: vec![SafetyRating {
                category: "HARM_CATEGORY_DANGEROUS_CONTENT".into(),
                probability: "MEDIUM".into(),
                blocked: true,
            }],
        }],
    }))
}

pub fn transport_error() -> Reply {
    Reply::Respond(Err(StudioError::Api { status: 503, message: "backend unavailable".into() }))
}

pub fn credential() -> Credential {
    Credential::new("test-key").unwrap()
}

/// Text of every text part in a request, in order.
pub fn texts(request: &ContentRequest) -> Vec<&str> {
    request
        .parts
        .iter()
        .filter_map(|p| match p {
            Part::Text { text } => Some(text.as_str()),
            Part::InlineData { .. } => None,
        })
        .collect()
}
