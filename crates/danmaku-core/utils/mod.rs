//! Utility functions and shared types for danmaku-core
//!
//! Contains the crate error type and the deterministic hashing used to
//! derive reproducible style identifiers.

pub mod errors;
pub mod hashers;

pub use errors::{CoreError, ErrorCategory, Result};
pub use hashers::create_deterministic_hasher;
