//! The studio session: phase, artifacts and the transitions between them.

use std::fmt;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::credential::Credential;
use crate::error::StudioError;
use crate::gateway::AiGateway;
use crate::ports::InlineImage;

/// Variations requested when the user has not picked a number.
pub const DEFAULT_VARIATION_COUNT: usize = 5;

/// Largest batch of variations a user can request.
pub const MAX_VARIATION_COUNT: usize = 10;

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No master image yet.
    Idle,
    /// A master image is being generated or edited.
    GeneratingMaster,
    /// A master image exists and can be edited or varied.
    Editing,
    /// Variations and caption are being generated.
    GeneratingVariations,
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Idle => "idle",
            Self::GeneratingMaster => "generating the master image",
            Self::Editing => "editing",
            Self::GeneratingVariations => "generating variations",
        })
    }
}

/// An image produced during the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    /// Unique id derived from the generation time.
    pub id: String,
    /// Base64 payload and MIME type as returned by the provider.
    pub image: InlineImage,
}

/// Aborts whatever request the session currently has in flight.
///
/// Obtained from [`Session::abort_handle`] before starting an operation, so
/// it can be used while the session itself is borrowed.
#[derive(Debug, Clone, Default)]
pub struct AbortHandle {
    current: Arc<Mutex<Option<CancellationToken>>>,
}

impl AbortHandle {
    /// Abort the in-flight operation. Returns `false` if nothing was running.
    pub fn abort(&self) -> bool {
        let guard = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        match guard.as_ref() {
            Some(token) => {
                token.cancel();
                true
            }
            None => false,
        }
    }

    fn begin(&self) -> InFlight {
        let token = CancellationToken::new();
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.clone());
        InFlight { current: Arc::clone(&self.current), token }
    }
}

/// Registration of the running operation's token; unregisters on drop.
struct InFlight {
    current: Arc<Mutex<Option<CancellationToken>>>,
    token: CancellationToken,
}

impl InFlight {
    fn token(&self) -> &CancellationToken {
        &self.token
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

/// Sets the phase for the duration of an operation and restores a stable
/// phase on every exit path, including a dropped future.
struct PhaseGuard<'a> {
    phase: &'a watch::Sender<SessionPhase>,
    on_exit: SessionPhase,
}

impl<'a> PhaseGuard<'a> {
    fn enter(
        phase: &'a watch::Sender<SessionPhase>,
        during: SessionPhase,
        on_exit: SessionPhase,
    ) -> Self {
        phase.send_replace(during);
        Self { phase, on_exit }
    }

    fn exit_to(&mut self, phase: SessionPhase) {
        self.on_exit = phase;
    }
}

impl Drop for PhaseGuard<'_> {
    fn drop(&mut self) {
        self.phase.send_replace(self.on_exit);
    }
}

async fn cancellable<T>(
    token: &CancellationToken,
    operation: impl Future<Output = Result<T, StudioError>>,
) -> Result<T, StudioError> {
    tokio::select! {
        biased;
        () = token.cancelled() => Err(StudioError::Cancelled),
        result = operation => result,
    }
}

fn next_id(prefix: &str, seq: &mut u64) -> String {
    *seq += 1;
    format!("{prefix}-{}-{seq}", chrono::Utc::now().timestamp_millis())
}

/// One user's studio session.
///
/// Every operation takes `&mut self`, so at most one is in flight at a time.
/// While one runs, [`Session::phase_watch`] and [`Session::abort_handle`]
/// are the way in from outside. Failed operations record their message in [`Session::error`] and return
/// the error as well.
pub struct Session {
    gateway: AiGateway,
    credential: Option<Credential>,
    prompt: String,
    reference: Option<InlineImage>,
    master: Option<GeneratedImage>,
    variations: Vec<GeneratedImage>,
    caption: String,
    phase: watch::Sender<SessionPhase>,
    error: Option<String>,
    variation_count: usize,
    next_seq: u64,
    abort: AbortHandle,
}

impl Session {
    /// Start an idle session with no credential.
    #[must_use]
    pub fn new(gateway: AiGateway) -> Self {
        Self {
            gateway,
            credential: None,
            prompt: String::new(),
            reference: None,
            master: None,
            variations: Vec::new(),
            caption: String::new(),
            phase: watch::Sender::new(SessionPhase::Idle),
            error: None,
            variation_count: DEFAULT_VARIATION_COUNT,
            next_seq: 0,
            abort: AbortHandle::default(),
        }
    }

    // --- state seen by the presentation layer ---

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        *self.phase.borrow()
    }

    /// Receiver that sees every phase change, including those made while an
    /// operation holds the session.
    #[must_use]
    pub fn phase_watch(&self) -> watch::Receiver<SessionPhase> {
        self.phase.subscribe()
    }

    /// Current prompt text.
    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Attached reference image.
    #[must_use]
    pub fn reference_image(&self) -> Option<&InlineImage> {
        self.reference.as_ref()
    }

    /// Current master image.
    #[must_use]
    pub fn master_image(&self) -> Option<&GeneratedImage> {
        self.master.as_ref()
    }

    /// Latest committed variations.
    #[must_use]
    pub fn variations(&self) -> &[GeneratedImage] {
        &self.variations
    }

    /// Latest committed caption, empty if none.
    #[must_use]
    pub fn caption(&self) -> &str {
        &self.caption
    }

    /// Current error message.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Number of variations the next batch will request.
    #[must_use]
    pub fn variation_count(&self) -> usize {
        self.variation_count
    }

    /// Whether an API key has been supplied.
    #[must_use]
    pub fn has_credential(&self) -> bool {
        self.credential.is_some()
    }

    /// Handle for aborting the in-flight request from elsewhere.
    #[must_use]
    pub fn abort_handle(&self) -> AbortHandle {
        self.abort.clone()
    }

    // --- inputs ---

    /// Store the API key for this session.
    ///
    /// # Errors
    ///
    /// Returns [`StudioError::Precondition`] for a blank key; the session is
    /// left unchanged.
    pub fn submit_credential(&mut self, key: &str) -> Result<(), StudioError> {
        self.credential = Some(Credential::new(key)?);
        Ok(())
    }

    /// Replace the prompt text.
    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    /// Choose how many variations the next batch requests.
    ///
    /// # Errors
    ///
    /// Returns [`StudioError::InvalidArgument`] outside `1..=10`.
    pub fn set_variation_count(&mut self, count: usize) -> Result<(), StudioError> {
        if !(1..=MAX_VARIATION_COUNT).contains(&count) {
            return Err(StudioError::InvalidArgument(format!(
                "Variation count must be between 1 and {MAX_VARIATION_COUNT}, got {count}"
            )));
        }
        self.variation_count = count;
        Ok(())
    }

    /// Clear the error message.
    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Start over: drop every artifact and return to [`SessionPhase::Idle`].
    ///
    /// The credential and the chosen variation count survive.
    pub fn reset(&mut self) {
        self.prompt.clear();
        self.reference = None;
        self.master = None;
        self.variations.clear();
        self.caption.clear();
        self.error = None;
        self.phase.send_replace(SessionPhase::Idle);
    }

    /// Start over with a new reference image (or none).
    pub fn replace_reference_image(&mut self, image: Option<InlineImage>) {
        self.reset();
        self.reference = image;
    }

    /// Remove the reference image, which also starts over.
    pub fn clear_reference_image(&mut self) {
        self.replace_reference_image(None);
    }

    // --- actions ---

    /// Replace the prompt with an enhanced version. The phase is unchanged.
    ///
    /// # Errors
    ///
    /// Fails without network I/O if the credential or both prompt and
    /// reference image are missing; otherwise with the gateway error.
    pub async fn enhance_prompt(&mut self) -> Result<(), StudioError> {
        self.error = None;
        let in_flight = self.abort.begin();
        let result = self.try_enhance_prompt(in_flight.token()).await;
        drop(in_flight);
        self.settle(result)
    }

    /// Generate from `Idle`, or update the master while `Editing`.
    ///
    /// # Errors
    ///
    /// See [`Session::start_generation`] and [`Session::update_master`].
    pub async fn primary_action(&mut self) -> Result<(), StudioError> {
        match self.phase() {
            SessionPhase::Editing => self.update_master().await,
            _ => self.start_generation().await,
        }
    }

    /// Generate the first master image, enhancing an empty prompt first.
    ///
    /// On failure the session returns to [`SessionPhase::Idle`].
    ///
    /// # Errors
    ///
    /// Fails without network I/O if the session is not idle or the
    /// credential or both prompt and reference image are missing; otherwise
    /// with the gateway error.
    pub async fn start_generation(&mut self) -> Result<(), StudioError> {
        self.error = None;
        let in_flight = self.abort.begin();
        let result = self.try_start_generation(in_flight.token()).await;
        drop(in_flight);
        self.settle(result)
    }

    /// Edit the master image with the current prompt and reference image.
    ///
    /// The previous master is kept unless the edit succeeds.
    ///
    /// # Errors
    ///
    /// Fails without network I/O if there is no master image to edit;
    /// otherwise with the gateway error.
    pub async fn update_master(&mut self) -> Result<(), StudioError> {
        self.error = None;
        let in_flight = self.abort.begin();
        let result = self.try_update_master(in_flight.token()).await;
        drop(in_flight);
        self.settle(result)
    }

    /// Generate the variation batch and then the caption.
    ///
    /// Both are committed together, only if both succeed. The session is back
    /// in [`SessionPhase::Editing`] afterwards either way.
    ///
    /// # Errors
    ///
    /// Fails without network I/O if there is no master image; otherwise with
    /// the variation or caption error.
    pub async fn generate_variations_and_caption(&mut self) -> Result<(), StudioError> {
        self.error = None;
        let in_flight = self.abort.begin();
        let result = self.try_generate_variations_and_caption(in_flight.token()).await;
        drop(in_flight);
        self.settle(result)
    }

    // --- internals ---

    fn settle(&mut self, result: Result<(), StudioError>) -> Result<(), StudioError> {
        match result {
            Ok(()) => Ok(()),
            Err(StudioError::Cancelled) => {
                tracing::info!("Operation aborted, starting over");
                self.reset();
                Err(StudioError::Cancelled)
            }
            Err(e) => {
                tracing::debug!(blocked = e.is_blocked_result(), error = %e, "Operation failed");
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    fn require_credential(&self) -> Result<Credential, StudioError> {
        self.credential
            .clone()
            .ok_or_else(|| StudioError::Precondition("API Key is missing.".into()))
    }

    fn has_input(&self) -> bool {
        !self.prompt.trim().is_empty() || self.reference.is_some()
    }

    fn require_master(&self, action: &str) -> Result<InlineImage, StudioError> {
        self.master
            .as_ref()
            .map(|m| m.image.clone())
            .ok_or_else(|| StudioError::Precondition(format!("A master image is required to {action}.")))
    }

    async fn try_enhance_prompt(&mut self, token: &CancellationToken) -> Result<(), StudioError> {
        let credential = self.require_credential()?;
        if !self.has_input() {
            return Err(StudioError::Precondition(
                "Please provide a prompt or an image to enhance.".into(),
            ));
        }
        let enhanced = cancellable(
            token,
            self.gateway.enhance_prompt(&credential, self.reference.as_ref(), &self.prompt),
        )
        .await?;
        self.prompt = enhanced;
        Ok(())
    }

    async fn try_start_generation(&mut self, token: &CancellationToken) -> Result<(), StudioError> {
        let credential = self.require_credential()?;
        if self.phase() != SessionPhase::Idle {
            return Err(StudioError::Precondition(format!(
                "Cannot generate a new image while {}.",
                self.phase()
            )));
        }
        if !self.has_input() {
            return Err(StudioError::Precondition(
                "A prompt or reference image is required to generate an image.".into(),
            ));
        }
        self.variations.clear();
        self.caption.clear();

        let mut phase =
            PhaseGuard::enter(&self.phase, SessionPhase::GeneratingMaster, SessionPhase::Idle);

        if self.prompt.trim().is_empty() {
            let enhanced = cancellable(
                token,
                self.gateway.enhance_prompt(&credential, self.reference.as_ref(), ""),
            )
            .await?;
            tracing::info!("Adopted enhanced prompt");
            self.prompt = enhanced;
        }

        let image = cancellable(
            token,
            self.gateway.generate_initial_image(&credential, &self.prompt, self.reference.as_ref()),
        )
        .await?;

        self.master = Some(GeneratedImage { id: next_id("master", &mut self.next_seq), image });
        phase.exit_to(SessionPhase::Editing);
        Ok(())
    }

    async fn try_update_master(&mut self, token: &CancellationToken) -> Result<(), StudioError> {
        let credential = self.require_credential()?;
        if self.phase() != SessionPhase::Editing {
            return Err(StudioError::Precondition(format!(
                "Cannot update the master image while {}.",
                self.phase()
            )));
        }
        let master = self.require_master("update it")?;
        if !self.has_input() {
            return Err(StudioError::Precondition(
                "A prompt or reference image is required to update the image.".into(),
            ));
        }
        self.variations.clear();
        self.caption.clear();

        let _phase = PhaseGuard::enter(
            &self.phase,
            SessionPhase::GeneratingMaster,
            SessionPhase::Editing,
        );

        let image = cancellable(
            token,
            self.gateway.edit_image(&credential, &self.prompt, &master, self.reference.as_ref()),
        )
        .await?;

        self.master = Some(GeneratedImage { id: next_id("master", &mut self.next_seq), image });
        Ok(())
    }

    async fn try_generate_variations_and_caption(
        &mut self,
        token: &CancellationToken,
    ) -> Result<(), StudioError> {
        let credential = self.require_credential()?;
        if self.phase() != SessionPhase::Editing {
            return Err(StudioError::Precondition(format!(
                "Cannot generate variations while {}.",
                self.phase()
            )));
        }
        let master = self.require_master("generate variations")?;
        self.variations.clear();
        self.caption.clear();
        let count = self.variation_count;

        let _phase = PhaseGuard::enter(
            &self.phase,
            SessionPhase::GeneratingVariations,
            SessionPhase::Editing,
        );

        let images = cancellable(
            token,
            self.gateway.generate_image_variations(&credential, &master, count),
        )
        .await?;
        let caption =
            cancellable(token, self.gateway.generate_caption(&credential, &self.prompt)).await?;

        let seq = &mut self.next_seq;
        self.variations = images
            .into_iter()
            .enumerate()
            .map(|(index, image)| GeneratedImage { id: next_id(&format!("var-{index}"), seq), image })
            .collect();
        self.caption = caption;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModelSet;
    use crate::prompts::POSES;
    use crate::testing::{self, image, text, transport_error, Reply, ScriptedModel};

    fn session(replies: Vec<Reply>) -> (Session, testing::RequestLog) {
        let (model, log) = ScriptedModel::new(replies);
        let gateway = AiGateway::new(Box::new(model), ModelSet::default());
        let mut session = Session::new(gateway);
        session.submit_credential("test-key").unwrap();
        (session, log)
    }

    fn reference() -> InlineImage {
        InlineImage::new("image/jpeg", "REFERENCE")
    }

    async fn editing_session(extra: Vec<Reply>) -> (Session, testing::RequestLog) {
        let mut replies = vec![image("MASTER")];
        replies.extend(extra);
        let (mut s, log) = session(replies);
        s.set_prompt("glossy french tips");
        s.start_generation().await.unwrap();
        assert_eq!(s.phase(), SessionPhase::Editing);
        (s, log)
    }

    #[tokio::test]
    async fn no_call_without_credential() {
        let (model, log) = ScriptedModel::new(vec![]);
        let mut s = Session::new(AiGateway::new(Box::new(model), ModelSet::default()));
        s.set_prompt("ombre");

        let err = s.start_generation().await.unwrap_err();
        assert!(matches!(err, StudioError::Precondition(_)));
        assert!(s.enhance_prompt().await.is_err());
        assert_eq!(s.error(), Some("API Key is missing."));
        assert_eq!(s.phase(), SessionPhase::Idle);
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn blank_credential_is_rejected() {
        let (mut s, _) = session(vec![]);
        let (model, _) = ScriptedModel::new(vec![]);
        let mut fresh = Session::new(AiGateway::new(Box::new(model), ModelSet::default()));
        assert!(fresh.submit_credential("   ").is_err());
        assert!(!fresh.has_credential());
        assert!(s.submit_credential("").is_err());
        assert!(s.has_credential());
    }

    #[tokio::test]
    async fn start_without_prompt_or_reference_makes_no_calls() {
        let (mut s, log) = session(vec![]);
        let err = s.start_generation().await.unwrap_err();
        assert!(matches!(err, StudioError::Precondition(_)));
        assert_eq!(s.phase(), SessionPhase::Idle);
        assert_eq!(
            s.error(),
            Some("A prompt or reference image is required to generate an image.")
        );
        assert!(log.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn full_flow_from_reference_only() {
        let (mut s, log) = session(vec![
            text("Enhanced: almond chrome nails on a fluffy pillow."),
            image("MASTER"),
            image("V0"),
            image("V1"),
            image("V2"),
            text("Obsessing over these!\nDM us to book!"),
        ]);
        s.replace_reference_image(Some(reference()));
        s.set_variation_count(3).unwrap();

        s.start_generation().await.unwrap();
        assert_eq!(s.prompt(), "Enhanced: almond chrome nails on a fluffy pillow.");
        assert_eq!(s.phase(), SessionPhase::Editing);
        assert_eq!(s.master_image().unwrap().image.data, "MASTER");
        assert!(s.master_image().unwrap().id.starts_with("master-"));

        s.generate_variations_and_caption().await.unwrap();
        assert_eq!(s.phase(), SessionPhase::Editing);
        let data: Vec<_> = s.variations().iter().map(|v| v.image.data.as_str()).collect();
        assert_eq!(data, ["V0", "V1", "V2"]);
        assert!(s.variations()[1].id.starts_with("var-1-"));
        assert_eq!(s.caption(), "Obsessing over these!\nDM us to book!");
        assert!(s.error().is_none());

        let requests = log.lock().unwrap();
        assert_eq!(requests.len(), 6);
        // enhance, then the reference leads the generation request
        assert_eq!(requests[1].parts[0], crate::ports::Part::image(reference()));
        for (i, req) in requests[2..5].iter().enumerate() {
            assert!(testing::texts(req)[0].contains(POSES[i]));
        }
        assert!(testing::texts(&requests[5])[0].contains("almond chrome nails"));
    }

    #[tokio::test]
    async fn start_failure_returns_to_idle() {
        let (mut s, _) = session(vec![transport_error()]);
        s.set_prompt("ombre");
        let err = s.start_generation().await.unwrap_err();
        assert!(matches!(err, StudioError::ImageGeneration(_)));
        assert_eq!(s.phase(), SessionPhase::Idle);
        assert!(s.master_image().is_none());
        assert_eq!(s.error(), Some("Failed to generate a single image."));
    }

    #[tokio::test]
    async fn failed_enhancement_during_start_keeps_prompt_empty() {
        let (mut s, log) = session(vec![transport_error()]);
        s.replace_reference_image(Some(reference()));
        assert!(s.start_generation().await.is_err());
        assert_eq!(s.prompt(), "");
        assert_eq!(s.phase(), SessionPhase::Idle);
        assert_eq!(log.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_replaces_master_with_new_id() {
        let (mut s, log) = editing_session(vec![image("EDITED")]).await;
        let first_id = s.master_image().unwrap().id.clone();

        s.set_prompt("make them longer");
        s.primary_action().await.unwrap();
        assert_eq!(s.phase(), SessionPhase::Editing);
        let master = s.master_image().unwrap();
        assert_eq!(master.image.data, "EDITED");
        assert_ne!(master.id, first_id);

        let requests = log.lock().unwrap();
        assert_eq!(requests[1].parts[0], crate::ports::Part::image(InlineImage::new("image/png", "MASTER")));
    }

    #[tokio::test]
    async fn failed_edit_keeps_prior_master() {
        let (mut s, _) = editing_session(vec![transport_error()]).await;
        let before = s.master_image().unwrap().clone();

        let err = s.update_master().await.unwrap_err();
        assert!(matches!(err, StudioError::ImageGeneration(_)));
        assert_eq!(s.phase(), SessionPhase::Editing);
        assert_eq!(s.master_image(), Some(&before));
        assert!(s.error().is_some());
    }

    #[tokio::test]
    async fn update_requires_editing_phase() {
        let (mut s, log) = session(vec![]);
        s.set_prompt("ombre");
        let err = s.update_master().await.unwrap_err();
        assert!(matches!(err, StudioError::Precondition(_)));
        assert!(log.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn failed_variation_discards_partial_batch() {
        let (mut s, log) =
            editing_session(vec![image("V0"), image("V1"), transport_error()]).await;
        s.set_variation_count(4).unwrap();
        let master_before = s.master_image().unwrap().clone();

        let err = s.generate_variations_and_caption().await.unwrap_err();
        assert!(matches!(err, StudioError::VariationGeneration { number: 3, .. }));
        assert!(s.variations().is_empty());
        assert_eq!(s.caption(), "");
        assert_eq!(s.phase(), SessionPhase::Editing);
        assert_eq!(s.master_image(), Some(&master_before));
        assert_eq!(s.error(), Some("Failed to generate variation 3. Please try again."));
        // master + three variation attempts, no caption call
        assert_eq!(log.lock().unwrap().len(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_caption_discards_variations() {
        let (mut s, _) =
            editing_session(vec![image("V0"), transport_error()]).await;
        s.set_variation_count(1).unwrap();

        let err = s.generate_variations_and_caption().await.unwrap_err();
        assert!(matches!(err, StudioError::CaptionGeneration(_)));
        assert!(s.variations().is_empty());
        assert_eq!(s.phase(), SessionPhase::Editing);
    }

    #[tokio::test(start_paused = true)]
    async fn new_batch_clears_previous_results_first() {
        let (mut s, _) = editing_session(vec![
            image("V0"),
            text("caption one"),
            transport_error(),
        ])
        .await;
        s.set_variation_count(1).unwrap();
        s.generate_variations_and_caption().await.unwrap();
        assert_eq!(s.variations().len(), 1);

        assert!(s.generate_variations_and_caption().await.is_err());
        assert!(s.variations().is_empty());
        assert_eq!(s.caption(), "");
    }

    #[tokio::test]
    async fn variations_require_master() {
        let (mut s, log) = session(vec![]);
        let err = s.generate_variations_and_caption().await.unwrap_err();
        assert!(matches!(err, StudioError::Precondition(_)));
        assert_eq!(s.phase(), SessionPhase::Idle);
        assert!(log.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn replacing_reference_discards_everything() {
        let (mut s, _) = editing_session(vec![image("V0"), text("caption")]).await;
        s.set_variation_count(1).unwrap();
        s.generate_variations_and_caption().await.unwrap();

        s.replace_reference_image(Some(reference()));
        assert_eq!(s.phase(), SessionPhase::Idle);
        assert_eq!(s.prompt(), "");
        assert!(s.master_image().is_none());
        assert!(s.variations().is_empty());
        assert_eq!(s.caption(), "");
        assert_eq!(s.reference_image(), Some(&reference()));
        assert!(s.has_credential());
        assert_eq!(s.variation_count(), 1);

        s.clear_reference_image();
        assert!(s.reference_image().is_none());
    }

    #[tokio::test]
    async fn enhance_action_replaces_prompt() {
        let (mut s, _) = session(vec![text("Vivid ombre nails."), transport_error()]);
        s.set_prompt("ombre");
        s.enhance_prompt().await.unwrap();
        assert_eq!(s.prompt(), "Vivid ombre nails.");
        assert_eq!(s.phase(), SessionPhase::Idle);

        assert!(s.enhance_prompt().await.is_err());
        assert_eq!(s.prompt(), "Vivid ombre nails.");
        assert_eq!(s.error(), Some("Could not enhance the prompt with Gemini."));

        s.dismiss_error();
        assert!(s.error().is_none());
    }

    #[tokio::test]
    async fn next_action_clears_previous_error() {
        let (mut s, _) = session(vec![image("MASTER")]);
        assert!(s.start_generation().await.is_err());
        assert!(s.error().is_some());

        s.set_prompt("chrome");
        s.start_generation().await.unwrap();
        assert!(s.error().is_none());
    }

    #[test]
    fn variation_count_bounds() {
        let (mut s, _) = session(vec![]);
        assert_eq!(s.variation_count(), DEFAULT_VARIATION_COUNT);
        assert!(s.set_variation_count(0).is_err());
        assert!(s.set_variation_count(11).is_err());
        s.set_variation_count(10).unwrap();
        assert_eq!(s.variation_count(), 10);
    }

    #[tokio::test]
    async fn abort_starts_over() {
        let (mut s, _) = session(vec![Reply::Hang]);
        s.set_prompt("ombre");
        let handle = s.abort_handle();
        assert!(!handle.abort());

        let (result, aborted) = tokio::join!(s.start_generation(), async {
            tokio::task::yield_now().await;
            handle.abort()
        });
        assert!(aborted);
        assert!(matches!(result, Err(StudioError::Cancelled)));
        assert_eq!(s.phase(), SessionPhase::Idle);
        assert_eq!(s.prompt(), "");
        assert!(s.error().is_none());
    }

    #[tokio::test]
    async fn dropped_operation_restores_phase() {
        let (mut s, _) = editing_session(vec![Reply::Hang]).await;
        {
            let op = s.generate_variations_and_caption();
            let _ = tokio::time::timeout(std::time::Duration::from_millis(10), op).await;
        }
        assert_eq!(s.phase(), SessionPhase::Editing);
    }

    #[tokio::test]
    async fn dropped_operation_unregisters_abort() {
        let (mut s, _) = editing_session(vec![Reply::Hang]).await;
        let handle = s.abort_handle();
        {
            let op = s.generate_variations_and_caption();
            let _ = tokio::time::timeout(std::time::Duration::from_millis(10), op).await;
        }
        assert!(!handle.abort());
    }

    #[tokio::test]
    async fn master_phase_is_visible_while_pending() {
        let (mut s, _) = session(vec![Reply::Hang]);
        s.set_prompt("ombre");
        let mut phases = s.phase_watch();
        let handle = s.abort_handle();

        let (result, seen) = tokio::join!(s.start_generation(), async {
            let seen = *phases.wait_for(|p| *p != SessionPhase::Idle).await.unwrap();
            handle.abort();
            seen
        });
        assert_eq!(seen, SessionPhase::GeneratingMaster);
        assert!(matches!(result, Err(StudioError::Cancelled)));
        assert_eq!(*phases.borrow(), SessionPhase::Idle);
    }

    #[tokio::test]
    async fn variations_phase_is_visible_while_pending() {
        let (mut s, _) = editing_session(vec![Reply::Hang]).await;
        let mut phases = s.phase_watch();
        let handle = s.abort_handle();

        let (result, seen) = tokio::join!(s.generate_variations_and_caption(), async {
            let seen = *phases
                .wait_for(|p| *p == SessionPhase::GeneratingVariations)
                .await
                .unwrap();
            handle.abort();
            seen
        });
        assert_eq!(seen, SessionPhase::GeneratingVariations);
        assert!(matches!(result, Err(StudioError::Cancelled)));
    }

    #[tokio::test]
    async fn whitespace_prompt_counts_as_empty() {
        let (mut s, log) = session(vec![]);
        s.set_prompt("  \n ");
        let err = s.start_generation().await.unwrap_err();
        assert!(matches!(err, StudioError::Precondition(_)));
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn ids_are_unique_within_a_millisecond() {
        let mut seq = 0;
        let a = next_id("master", &mut seq);
        let b = next_id("master", &mut seq);
        assert_ne!(a, b);
    }
}
