use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tracing::debug;

use crate::application::ChatClient;
use crate::domain::{DomainError, Message, Role};

/// Offline stand-in for a reasoning model.
///
/// Replies to the latest user message with a short `<think>` block followed by
/// an echo of the prompt, or fails every call when built with
/// [`MockChatClient::failing`].
pub struct MockChatClient {
    failure: Option<String>,
    calls: AtomicUsize,
}

impl MockChatClient {
    pub fn new() -> Self {
        Self {
            failure: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(msg: impl Into<String>) -> Self {
        Self {
            failure: Some(msg.into()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn reply_to(history: &[Message]) -> String {
        let prompt = history
            .iter()
            .rev()
            .find(|m| m.role() == Role::User)
            .map(|m| m.content())
            .unwrap_or("");

        format!(
            "<think>\nThe user said \"{}\" after {} earlier messages. Echo it back.\n</think>\n\nYou said: {}",
            prompt,
            history.len().saturating_sub(1),
            prompt
        )
    }
}

impl Default for MockChatClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatClient for MockChatClient {
    async fn complete(&self, _system: &str, history: &[Message]) -> Result<String, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(msg) = &self.failure {
            return Err(DomainError::completion(msg.clone()));
        }

        debug!("MockChatClient: replying to {} messages", history.len());
        Ok(Self::reply_to(history))
    }

    fn model_name(&self) -> &str {
        "mock-reasoner"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::segment;

    #[tokio::test]
    async fn test_mock_reply_segments_cleanly() {
        let client = MockChatClient::new();
        let history = vec![Message::assistant("Hello!"), Message::user("ping")];

        let raw = client.complete("sys", &history).await.unwrap();
        let seg = segment(&raw);

        assert!(seg.has_reasoning());
        assert_eq!(seg.answer(), "You said: ping");
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn test_failing_mock_errors_every_call() {
        let client = MockChatClient::failing("offline");

        let err = client.complete("sys", &[]).await.unwrap_err();

        assert!(err.is_completion_error());
        assert_eq!(client.call_count(), 1);
    }
}
