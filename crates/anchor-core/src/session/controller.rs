//! Session controller: the conversation state machine.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::completion::{CompletionClient, CompletionRequest};
use crate::error::{AnchorError, Result};
use crate::prompt;
use crate::safety::{KeywordRiskClassifier, RiskClassifier, SafetyVerdict};
use crate::store::SessionStore;

use super::message::Message;
use super::state::SessionState;
use super::summary::SessionSummary;

/// Result of a `send_message` call that was accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// The companion answered; the reply was appended.
    Replied(Message),
    /// The completion call failed; the fallback reply was appended.
    Fallback(Message),
    /// The message tripped the safety filter and was discarded.
    Diverted(SafetyVerdict),
    /// The reply arrived after its session was closed and was dropped.
    Discarded,
}

/// Read-only copy of the controller's state, for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    pub state: SessionState,
    pub messages: Vec<Message>,
    pub loading: bool,
    pub summary: Option<SessionSummary>,
    pub trigger: Option<String>,
}

#[derive(Default)]
struct ControllerInner {
    state: SessionState,
    messages: Vec<Message>,
    loading: bool,
    /// Bumped whenever the conversation is closed or replaced, so a reply
    /// that outlives its session can be recognised.
    generation: u64,
    summary: Option<SessionSummary>,
    trigger: Option<String>,
}

impl ControllerInner {
    fn begin(&mut self) {
        self.state = SessionState::Active;
        self.messages = vec![prompt::greeting_message()];
        self.loading = false;
        self.generation += 1;
        self.summary = None;
        self.trigger = None;
    }
}

/// Drives one user's conversation with the companion.
///
/// All actions take `&self`; the state lock is never held across the
/// completion call, which is what lets a concurrent `send_message` see
/// `loading` and be rejected. Store writes happen under the lock so they are
/// ordered with the transitions that cause them.
pub struct SessionController {
    classifier: Arc<dyn RiskClassifier>,
    completion: Arc<dyn CompletionClient>,
    store: Arc<dyn SessionStore>,
    inner: Mutex<ControllerInner>,
}

impl SessionController {
    /// Creates an idle controller using the built-in keyword classifier.
    pub fn new(completion: Arc<dyn CompletionClient>, store: Arc<dyn SessionStore>) -> Self {
        Self {
            classifier: Arc::new(KeywordRiskClassifier::default()),
            completion,
            store,
            inner: Mutex::new(ControllerInner::default()),
        }
    }

    /// Replaces the risk classifier.
    pub fn with_classifier(mut self, classifier: Arc<dyn RiskClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    pub async fn state(&self) -> SessionState {
        self.inner.lock().await.state
    }

    pub async fn messages(&self) -> Vec<Message> {
        self.inner.lock().await.messages.clone()
    }

    pub async fn is_loading(&self) -> bool {
        self.inner.lock().await.loading
    }

    pub async fn view(&self) -> SessionView {
        let inner = self.inner.lock().await;
        SessionView {
            state: inner.state,
            messages: inner.messages.clone(),
            loading: inner.loading,
            summary: inner.summary.clone(),
            trigger: inner.trigger.clone(),
        }
    }

    /// Idle → Active. Returns the greeting.
    pub async fn start_session(&self) -> Result<Message> {
        self.begin(SessionState::Idle, "start a session").await
    }

    /// SummaryShown → Active. Returns the greeting.
    pub async fn start_new_session(&self) -> Result<Message> {
        self.begin(SessionState::SummaryShown, "start a new session").await
    }

    async fn begin(&self, expected: SessionState, action: &'static str) -> Result<Message> {
        let mut inner = self.inner.lock().await;
        if inner.state != expected {
            return Err(AnchorError::invalid_transition(action, inner.state));
        }
        inner.begin();

        tracing::info!(from = %expected, "Session started");
        self.save_snapshot(&inner.messages).await;
        Ok(prompt::greeting_message())
    }

    /// Restores a conversation saved by a previous process, if any.
    ///
    /// Only valid while idle. Returns the number of restored messages.
    pub async fn resume_saved_session(&self) -> Result<Option<usize>> {
        let mut inner = self.inner.lock().await;
        if inner.state != SessionState::Idle {
            return Err(AnchorError::invalid_transition(
                "resume a saved session",
                inner.state,
            ));
        }

        let Some(snapshot) = self.store.load_snapshot().await? else {
            return Ok(None);
        };
        if snapshot.messages.is_empty() {
            return Ok(None);
        }

        inner.begin();
        inner.messages = snapshot.messages;
        tracing::info!(saved_at = %snapshot.saved_at, "Session resumed");
        Ok(Some(inner.messages.len()))
    }

    /// Sends one user message.
    ///
    /// Unsafe text diverts the session and is dropped. Safe text is appended
    /// and answered; a failed completion call is answered with the fallback
    /// reply instead of an error.
    ///
    /// # Errors
    ///
    /// - `InvalidTransition` when no session is active
    /// - `Busy` while a previous reply is outstanding
    /// - `InvalidInput` for blank text
    pub async fn send_message(&self, text: &str) -> Result<SendOutcome> {
        let (generation, request) = {
            let mut inner = self.inner.lock().await;
            if inner.state != SessionState::Active {
                return Err(AnchorError::invalid_transition("send a message", inner.state));
            }
            if inner.loading {
                return Err(AnchorError::Busy);
            }
            if text.trim().is_empty() {
                return Err(AnchorError::InvalidInput("message is empty".into()));
            }

            let verdict = self.classifier.check(text);
            if !verdict.safe {
                inner.state = SessionState::SafetyDiverted;
                inner.trigger = verdict.trigger.clone();
                inner.generation += 1;

                tracing::info!("Session diverted to safety mode");
                self.clear_snapshot().await;
                return Ok(SendOutcome::Diverted(verdict));
            }

            inner.messages.push(Message::user(text));
            inner.loading = true;
            (inner.generation, CompletionRequest::for_log(&inner.messages))
        };

        tracing::debug!(messages = request.messages().len(), "Requesting completion");
        let result = self.completion.complete(&request).await;

        let mut inner = self.inner.lock().await;
        if inner.generation != generation || inner.state != SessionState::Active {
            tracing::debug!("Dropping reply for a closed session");
            return Ok(SendOutcome::Discarded);
        }

        let outcome = match result {
            Ok(content) => SendOutcome::Replied(Message::assistant(content)),
            Err(err) => {
                tracing::warn!(error = %err, "Completion failed, answering with fallback");
                SendOutcome::Fallback(prompt::fallback_message())
            }
        };
        if let SendOutcome::Replied(reply) | SendOutcome::Fallback(reply) = &outcome {
            inner.messages.push(reply.clone());
        }
        inner.loading = false;

        self.save_snapshot(&inner.messages).await;
        Ok(outcome)
    }

    /// Active → SummaryShown. The log is kept; a history entry is recorded.
    pub async fn end_session(&self) -> Result<SessionSummary> {
        let mut inner = self.inner.lock().await;
        if inner.state != SessionState::Active {
            return Err(AnchorError::invalid_transition("end the session", inner.state));
        }
        let summary = SessionSummary::from_log(&inner.messages);
        inner.state = SessionState::SummaryShown;
        inner.loading = false;
        inner.generation += 1;
        inner.summary = Some(summary.clone());

        tracing::info!(user_messages = summary.message_count, "Session ended");
        if let Err(err) = self.store.add_to_history(summary.clone()).await {
            tracing::warn!(error = %err, "Failed to record session history");
        }
        self.clear_snapshot().await;
        Ok(summary)
    }

    /// SafetyDiverted → Idle. Clears the log.
    pub async fn exit_safety_mode(&self) -> Result<()> {
        let mut inner = self.inner.lock().await;
        if inner.state != SessionState::SafetyDiverted {
            return Err(AnchorError::invalid_transition(
                "exit safety mode",
                inner.state,
            ));
        }
        inner.state = SessionState::Idle;
        inner.messages.clear();
        inner.loading = false;
        inner.trigger = None;

        tracing::info!("Safety mode exited");
        self.clear_snapshot().await;
        Ok(())
    }

    // Callers hold the state lock.
    async fn save_snapshot(&self, messages: &[Message]) {
        if let Err(err) = self.store.save_snapshot(messages).await {
            tracing::warn!(error = %err, "Failed to save session snapshot");
        }
    }

    async fn clear_snapshot(&self) {
        if let Err(err) = self.store.clear_snapshot().await {
            tracing::warn!(error = %err, "Failed to clear session snapshot");
        }
    }
}
