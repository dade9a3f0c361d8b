use serde::{Deserialize, Serialize};

use crate::domain::{ChatSession, ChatTurn, Message, Role, SegmentMode, Segmented};

/// Body of `POST /api/sessions/{id}/messages`.
#[derive(Debug, Serialize, Deserialize)]
pub struct SendMessageRequest {
    pub content: String,
}

/// A reply split for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyView {
    /// Text between the first `<think>` and `</think>`, if both were present
    pub reasoning: Option<String>,

    /// Everything outside the reasoning span
    pub answer: String,
}

impl From<&Segmented> for ReplyView {
    fn from(seg: &Segmented) -> Self {
        Self {
            reasoning: seg.reasoning().map(String::from),
            answer: seg.answer().to_string(),
        }
    }
}

/// One transcript entry as the UI sees it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageView {
    pub role: Role,

    /// Raw stored content, markers included
    pub content: String,

    pub reasoning: Option<String>,

    pub answer: String,
}

impl MessageView {
    /// Assistant messages are split on every render; other roles are shown as typed.
    pub fn from_message(message: &Message, mode: SegmentMode) -> Self {
        let (reasoning, answer) = match message.role() {
            Role::Assistant => mode.apply(message.content()).into_parts(),
            _ => (None, message.content().to_string()),
        };
        Self {
            role: message.role(),
            content: message.content().to_string(),
            reasoning,
            answer,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionView {
    pub id: String,
    pub messages: Vec<MessageView>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl SessionView {
    pub fn from_session(session: &ChatSession, mode: SegmentMode) -> Self {
        Self {
            id: session.id().to_string(),
            messages: session
                .transcript()
                .messages()
                .iter()
                .map(|m| MessageView::from_message(m, mode))
                .collect(),
            created_at: session.created_at(),
            updated_at: session.updated_at(),
        }
    }
}

/// Response to a submitted message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnResponse {
    pub session: SessionView,
    pub reply: ReplyView,

    /// User-visible notification when the completion call failed
    pub error: Option<String>,
}

impl TurnResponse {
    pub fn new(session: &ChatSession, turn: &ChatTurn, mode: SegmentMode) -> Self {
        Self {
            session: SessionView::from_session(session, mode),
            reply: ReplyView::from(turn.reply()),
            error: turn.error().map(String::from),
        }
    }
}
