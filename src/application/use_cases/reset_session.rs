use std::sync::Arc;

use tracing::info;

use crate::application::SessionRepository;
use crate::domain::{ChatSession, DomainError};

use super::require_session;

/// Discards a session's transcript and starts over from the greeting.
pub struct ResetSessionUseCase {
    session_repo: Arc<dyn SessionRepository>,
}

impl ResetSessionUseCase {
    pub fn new(session_repo: Arc<dyn SessionRepository>) -> Self {
        Self { session_repo }
    }

    pub async fn execute(&self, session_id: &str) -> Result<ChatSession, DomainError> {
        let handle = require_session(self.session_repo.as_ref(), session_id).await?;
        let mut session = handle.lock().await;
        let dropped = session.transcript().len().saturating_sub(1);
        session.reset();
        info!("Reset session {} ({} messages dropped)", session_id, dropped);
        Ok(session.clone())
    }
}
