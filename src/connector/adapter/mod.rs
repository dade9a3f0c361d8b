mod in_memory_session_repository;
mod mock_chat_client;
mod openai_chat_client;
mod secrets;
pub mod web;

pub use in_memory_session_repository::*;
pub use mock_chat_client::*;
pub use openai_chat_client::*;
pub use secrets::*;
