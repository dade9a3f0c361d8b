use std::sync::Arc;

use tracing::debug;

use crate::application::SessionRepository;
use crate::domain::{ChatSession, DomainError, DEFAULT_GREETING};

pub struct StartSessionUseCase {
    session_repo: Arc<dyn SessionRepository>,
    greeting: String,
}

impl StartSessionUseCase {
    pub fn new(session_repo: Arc<dyn SessionRepository>) -> Self {
        Self {
            session_repo,
            greeting: DEFAULT_GREETING.to_string(),
        }
    }

    pub fn with_greeting(mut self, greeting: impl Into<String>) -> Self {
        self.greeting = greeting.into();
        self
    }

    /// Creates a fresh session holding only the greeting and returns a snapshot of it.
    pub async fn execute(&self) -> Result<ChatSession, DomainError> {
        let handle = self
            .session_repo
            .create(ChatSession::new(self.greeting.clone()))
            .await?;
        let session = handle.lock().await.clone();
        debug!("Started session {}", session.id());
        Ok(session)
    }
}
