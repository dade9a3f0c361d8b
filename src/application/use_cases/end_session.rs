use std::sync::Arc;

use tracing::info;

use crate::application::SessionRepository;
use crate::domain::DomainError;

pub struct EndSessionUseCase {
    session_repo: Arc<dyn SessionRepository>,
}

impl EndSessionUseCase {
    pub fn new(session_repo: Arc<dyn SessionRepository>) -> Self {
        Self { session_repo }
    }

    pub async fn execute(&self, session_id: &str) -> Result<(), DomainError> {
        if !self.session_repo.delete(session_id).await? {
            return Err(DomainError::not_found(format!(
                "Session not found: {}",
                session_id
            )));
        }
        info!("Ended session {}", session_id);
        Ok(())
    }
}
