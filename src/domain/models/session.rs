use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Transcript;

/// One browser (or terminal) conversation and its transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSession {
    id: String,
    transcript: Transcript,
    created_at: i64,
    updated_at: i64,
}

impl ChatSession {
    pub fn new(greeting: impl Into<String>) -> Self {
        let now = current_timestamp();
        Self {
            id: Uuid::new_v4().to_string(),
            transcript: Transcript::new(greeting),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn created_at(&self) -> i64 {
        self.created_at
    }

    pub fn updated_at(&self) -> i64 {
        self.updated_at
    }

    pub fn append_user(&mut self, text: impl Into<String>) {
        self.transcript.append_user(text);
        self.touch();
    }

    pub fn append_assistant(&mut self, text: impl Into<String>) {
        self.transcript.append_assistant(text);
        self.touch();
    }

    pub fn reset(&mut self) {
        self.transcript.reset();
        self.touch();
    }

    pub fn seconds_since_update(&self) -> i64 {
        current_timestamp().saturating_sub(self.updated_at)
    }

    fn touch(&mut self) {
        self.updated_at = current_timestamp();
    }
}

fn current_timestamp() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sessions_get_distinct_ids() {
        let a = ChatSession::new("hi");
        let b = ChatSession::new("hi");
        assert_ne!(a.id(), b.id());
        assert!(Uuid::parse_str(a.id()).is_ok());
    }

    #[test]
    fn test_session_mutations_touch_transcript() {
        let mut session = ChatSession::new("hi");
        session.append_user("question");
        session.append_assistant("answer");
        assert_eq!(session.transcript().len(), 3);
        assert!(session.updated_at() >= session.created_at());

        session.reset();
        assert!(session.transcript().is_fresh());
    }

    #[test]
    fn test_fresh_session_is_not_idle() {
        let session = ChatSession::new("hi");
        assert!((0..=1).contains(&session.seconds_since_update()));
    }
}
