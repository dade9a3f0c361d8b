use serde::{Deserialize, Serialize};

use super::Message;

pub const DEFAULT_GREETING: &str = "Hello! How can I help you today?";

/// Ordered chat history owned by one session.
///
/// Always holds at least the greeting. Messages are only ever appended; the
/// only other mutation is [`Transcript::reset`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    greeting: String,
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new(greeting: impl Into<String>) -> Self {
        let greeting = greeting.into();
        Self {
            messages: vec![Message::assistant(greeting.clone())],
            greeting,
        }
    }

    pub fn append_user(&mut self, text: impl Into<String>) {
        self.messages.push(Message::user(text));
    }

    /// Stores the raw, unsegmented reply.
    pub fn append_assistant(&mut self, text: impl Into<String>) {
        self.messages.push(Message::assistant(text));
    }

    pub fn reset(&mut self) {
        self.messages = vec![Message::assistant(self.greeting.clone())];
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn greeting(&self) -> &str {
        &self.greeting
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn is_fresh(&self) -> bool {
        self.messages.len() == 1
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new(DEFAULT_GREETING)
    }
}
