//! # Application Layer
//!
//! Ports and use cases coordinating the domain with chat clients and session storage.

pub mod interfaces;
pub mod use_cases;

pub use interfaces::*;
pub use use_cases::*;
