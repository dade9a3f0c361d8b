use std::sync::Arc;

use crate::application::SessionRepository;
use crate::domain::{ChatSession, DomainError};

use super::require_session;

pub struct GetTranscriptUseCase {
    session_repo: Arc<dyn SessionRepository>,
}

impl GetTranscriptUseCase {
    pub fn new(session_repo: Arc<dyn SessionRepository>) -> Self {
        Self { session_repo }
    }

    pub async fn execute(&self, session_id: &str) -> Result<ChatSession, DomainError> {
        let handle = require_session(self.session_repo.as_ref(), session_id).await?;
        let session = handle.lock().await.clone();
        Ok(session)
    }
}
