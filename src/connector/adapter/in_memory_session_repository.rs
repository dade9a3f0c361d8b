use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

use crate::application::{SessionHandle, SessionRepository};
use crate::domain::{ChatSession, DomainError};

/// Process-lifetime session store. Nothing survives a restart.
pub struct InMemorySessionRepository {
    sessions: RwLock<HashMap<String, SessionHandle>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemorySessionRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn create(&self, session: ChatSession) -> Result<SessionHandle, DomainError> {
        let id = session.id().to_string();
        let handle = Arc::new(Mutex::new(session));

        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(&id) {
            return Err(DomainError::internal(format!("Duplicate session id: {}", id)));
        }
        sessions.insert(id.clone(), Arc::clone(&handle));

        debug!("Stored session {} ({} live)", id, sessions.len());
        Ok(handle)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<SessionHandle>, DomainError> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(id).cloned())
    }

    async fn list_ids(&self) -> Result<Vec<String>, DomainError> {
        let sessions = self.sessions.read().await;
        let mut ids: Vec<String> = sessions.keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }

    async fn delete(&self, id: &str) -> Result<bool, DomainError> {
        let mut sessions = self.sessions.write().await;
        Ok(sessions.remove(id).is_some())
    }

    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.sessions.read().await.len())
    }
}
