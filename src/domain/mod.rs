//! # Domain Layer
//!
//! Chat messages, transcripts, sessions, and reply segmentation.
//! This layer is independent of external frameworks and infrastructure.

mod error;
pub mod models;

pub use error::DomainError;
pub use models::*;
