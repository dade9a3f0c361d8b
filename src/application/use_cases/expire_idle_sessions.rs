use std::sync::Arc;

use tracing::{debug, info};

use crate::application::SessionRepository;
use crate::domain::DomainError;

pub const DEFAULT_SESSION_TTL_SECS: u64 = 3600;

/// Drops sessions nobody has written to for longer than the TTL.
///
/// A session whose lock is held has a turn in flight and is never evicted.
pub struct ExpireIdleSessionsUseCase {
    session_repo: Arc<dyn SessionRepository>,
    ttl_secs: u64,
}

impl ExpireIdleSessionsUseCase {
    pub fn new(session_repo: Arc<dyn SessionRepository>) -> Self {
        Self {
            session_repo,
            ttl_secs: DEFAULT_SESSION_TTL_SECS,
        }
    }

    pub fn with_ttl_secs(mut self, ttl_secs: u64) -> Self {
        self.ttl_secs = ttl_secs;
        self
    }

    /// Returns the ids that were evicted.
    pub async fn execute(&self) -> Result<Vec<String>, DomainError> {
        let ttl = i64::try_from(self.ttl_secs).unwrap_or(i64::MAX);
        let mut evicted = Vec::new();

        for id in self.session_repo.list_ids().await? {
            let Some(handle) = self.session_repo.find_by_id(&id).await? else {
                continue;
            };
            let Ok(session) = handle.try_lock() else {
                debug!("Session {} is busy, skipping", id);
                continue;
            };
            if session.seconds_since_update() < ttl {
                continue;
            }
            // Lock stays held across the delete.
            if self.session_repo.delete(&id).await? {
                evicted.push(id);
            }
            drop(session);
        }

        if !evicted.is_empty() {
            info!("Expired {} idle session(s)", evicted.len());
        }
        Ok(evicted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connector::InMemorySessionRepository;
    use crate::domain::ChatSession;

    #[tokio::test]
    async fn test_idle_sessions_are_evicted() {
        let repo = Arc::new(InMemorySessionRepository::new());
        let handle = repo.create(ChatSession::new("hi")).await.unwrap();
        let id = handle.lock().await.id().to_string();

        let evicted = ExpireIdleSessionsUseCase::new(repo.clone())
            .with_ttl_secs(0)
            .execute()
            .await
            .unwrap();

        assert_eq!(evicted, vec![id.clone()]);
        assert!(repo.find_by_id(&id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_recent_sessions_are_kept() {
        let repo = Arc::new(InMemorySessionRepository::new());
        repo.create(ChatSession::new("hi")).await.unwrap();

        let evicted = ExpireIdleSessionsUseCase::new(repo.clone())
            .execute()
            .await
            .unwrap();

        assert!(evicted.is_empty());
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_busy_session_is_not_evicted() {
        let repo = Arc::new(InMemorySessionRepository::new());
        let busy = repo.create(ChatSession::new("hi")).await.unwrap();
        repo.create(ChatSession::new("hi")).await.unwrap();

        let guard = busy.lock().await;
        let evicted = ExpireIdleSessionsUseCase::new(repo.clone())
            .with_ttl_secs(0)
            .execute()
            .await
            .unwrap();

        assert_eq!(evicted.len(), 1);
        assert!(!evicted.contains(&guard.id().to_string()));
        assert_eq!(repo.count().await.unwrap(), 1);
    }
}
