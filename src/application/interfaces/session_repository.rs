use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ChatSession, DomainError};

/// Shared handle to one live session.
///
/// Holding the lock is the single-writer token for that session's transcript.
pub type SessionHandle = Arc<Mutex<ChatSession>>;

/// Storage for live chat sessions.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn create(&self, session: ChatSession) -> Result<SessionHandle, DomainError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<SessionHandle>, DomainError>;

    async fn list_ids(&self) -> Result<Vec<String>, DomainError>;

    /// Returns `false` when no session had that id.
    async fn delete(&self, id: &str) -> Result<bool, DomainError>;

    async fn count(&self) -> Result<usize, DomainError>;
}
