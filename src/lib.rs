pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use application::{
    ChatClient, EndSessionUseCase, ExpireIdleSessionsUseCase, GetTranscriptUseCase,
    ResetSessionUseCase, SendMessageUseCase, SessionHandle, SessionRepository,
    StartSessionUseCase, DEFAULT_SESSION_TTL_SECS, DEFAULT_SYSTEM_PROMPT,
};

pub use cli::Commands;

pub use connector::api::{Container, ContainerConfig};
pub use connector::{ApiCredential, InMemorySessionRepository, MockChatClient, OpenAiChatClient};

pub use domain::{
    segment, segment_checked, ChatSession, ChatTurn, CompletionOutcome, DomainError, Message,
    Role, SegmentMode, Segmented, Transcript, DEFAULT_GREETING,
};
