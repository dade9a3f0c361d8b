//! # Connector Layer
//!
//! External integrations implementing application ports:
//! - Chat completion (OpenAI-compatible HTTP, plus an offline mock)
//! - Session storage (in-memory)
//! - Presentation (axum web UI, CLI controllers)

pub mod adapter;
pub mod api;

pub use adapter::*;
