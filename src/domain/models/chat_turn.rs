use serde::{Deserialize, Serialize};

use super::Segmented;

/// Result of one call to the completion endpoint.
///
/// Keeps "the model replied with nothing" apart from "the call failed", which
/// both end up as an empty assistant message in the transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum CompletionOutcome {
    Completed(String),
    Failed(String),
}

impl CompletionOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, CompletionOutcome::Failed(_))
    }

    /// Text to store as the assistant message. Failures store an empty reply.
    pub fn reply_text(&self) -> &str {
        match self {
            CompletionOutcome::Completed(text) => text,
            CompletionOutcome::Failed(_) => "",
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            CompletionOutcome::Completed(_) => None,
            CompletionOutcome::Failed(msg) => Some(msg),
        }
    }
}

/// What a single user submission produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    outcome: CompletionOutcome,
    reply: Segmented,
}

impl ChatTurn {
    pub fn new(outcome: CompletionOutcome, reply: Segmented) -> Self {
        Self { outcome, reply }
    }

    pub fn outcome(&self) -> &CompletionOutcome {
        &self.outcome
    }

    pub fn reply(&self) -> &Segmented {
        &self.reply
    }

    /// The single user-visible error notification for this turn, if any.
    pub fn error(&self) -> Option<&str> {
        self.outcome.error()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_outcome_stores_empty_reply() {
        let outcome = CompletionOutcome::Failed("boom".to_string());
        assert!(outcome.is_failed());
        assert_eq!(outcome.reply_text(), "");
        assert_eq!(outcome.error(), Some("boom"));
    }

    #[test]
    fn test_empty_success_is_not_a_failure() {
        let outcome = CompletionOutcome::Completed(String::new());
        assert!(!outcome.is_failed());
        assert_eq!(outcome.error(), None);
    }
}
