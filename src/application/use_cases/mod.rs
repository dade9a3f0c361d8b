mod end_session;
mod expire_idle_sessions;
mod get_transcript;
mod reset_session;
mod send_message;
mod start_session;

pub use end_session::*;
pub use expire_idle_sessions::*;
pub use get_transcript::*;
pub use reset_session::*;
pub use send_message::*;
pub use start_session::*;

use crate::application::{SessionHandle, SessionRepository};
use crate::domain::DomainError;

async fn require_session(
    session_repo: &dyn SessionRepository,
    id: &str,
) -> Result<SessionHandle, DomainError> {
    session_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found(format!("Session not found: {}", id)))
}
