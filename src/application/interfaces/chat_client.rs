use async_trait::async_trait;

use crate::domain::{DomainError, Message};

/// Sends a conversation to a chat-completion model and returns its reply.
///
/// Implementors encapsulate transport, serialization, and vendor-specific API
/// details. Use cases stay decoupled from any particular provider or HTTP
/// client library.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Send `system` as the leading instruction followed by `history`, and
    /// return the raw text of the first completion choice.
    async fn complete(&self, system: &str, history: &[Message]) -> Result<String, DomainError>;

    fn model_name(&self) -> &str;
}
