use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::application::{ChatClient, SessionRepository};
use crate::domain::{ChatSession, ChatTurn, CompletionOutcome, DomainError, SegmentMode};

use super::require_session;

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant";

/// Runs one user submission: append the prompt, ask the model, append its raw
/// reply, and split that reply for display.
///
/// The session lock is held for the whole chain, so concurrent submissions to
/// one session are applied one after another and never interleave.
pub struct SendMessageUseCase {
    session_repo: Arc<dyn SessionRepository>,
    chat_client: Arc<dyn ChatClient>,
    system_prompt: String,
    segment_mode: SegmentMode,
}

impl SendMessageUseCase {
    pub fn new(session_repo: Arc<dyn SessionRepository>, chat_client: Arc<dyn ChatClient>) -> Self {
        Self {
            session_repo,
            chat_client,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            segment_mode: SegmentMode::default(),
        }
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    pub fn with_segment_mode(mut self, mode: SegmentMode) -> Self {
        self.segment_mode = mode;
        self
    }

    /// Returns a snapshot of the session after the turn, and the turn itself.
    ///
    /// Completion failures do not surface as `Err`: they are reported through
    /// [`ChatTurn::error`] and leave an empty assistant message behind.
    pub async fn execute(
        &self,
        session_id: &str,
        text: &str,
    ) -> Result<(ChatSession, ChatTurn), DomainError> {
        if text.trim().is_empty() {
            return Err(DomainError::invalid_input("Message must not be empty"));
        }

        let handle = require_session(self.session_repo.as_ref(), session_id).await?;
        let mut session = handle.lock().await;

        session.append_user(text);
        debug!(
            "Session {}: sending {} messages to {}",
            session_id,
            session.transcript().len(),
            self.chat_client.model_name()
        );

        let start_time = Instant::now();
        let outcome = match self
            .chat_client
            .complete(&self.system_prompt, session.transcript().messages())
            .await
        {
            Ok(text) => CompletionOutcome::Completed(text),
            Err(e) => {
                warn!("Session {}: completion failed: {}", session_id, e);
                CompletionOutcome::Failed(format!("Error occurred: {}", e))
            }
        };

        session.append_assistant(outcome.reply_text());
        let reply = self.segment_mode.apply(outcome.reply_text());

        info!(
            "Session {}: reply in {:.2?} ({} chars, reasoning={})",
            session_id,
            start_time.elapsed(),
            outcome.reply_text().len(),
            reply.has_reasoning()
        );

        Ok((session.clone(), ChatTurn::new(outcome, reply)))
    }
}
