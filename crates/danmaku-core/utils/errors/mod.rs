//! Error types for danmaku-core
//!
//! Provides the crate-wide `CoreError` enum and its `ErrorCategory`.
//!
//! # Error Philosophy
//!
//! - Use `thiserror` for structured error handling (no `anyhow` in the library)
//! - Only configuration and I/O problems are fatal to a conversion run
//! - Per-comment problems are logged and skipped, never surfaced as errors
//! - Include suggestions for common error scenarios
//!
//! # Examples
//!
//! ```rust
//! use danmaku_core::utils::errors::{CoreError, ErrorCategory};
//!
//! let err = CoreError::config("alpha must be within 0..=1");
//! assert_eq!(err.category(), ErrorCategory::Configuration);
//! assert!(err.suggestion().is_some());
//! ```

mod category;
mod core;

pub use category::ErrorCategory;
pub use self::core::{CoreError, Result};

/// Convert from standard I/O errors
impl From<std::io::Error> for CoreError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Convert from formatting errors raised by output sinks
impl From<std::fmt::Error> for CoreError {
    fn from(err: std::fmt::Error) -> Self {
        Self::Format(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.xml");
        let core_err: CoreError = io_err.into();
        assert!(matches!(core_err, CoreError::Io(ref msg) if msg.contains("missing.xml")));
        assert_eq!(core_err.category(), ErrorCategory::Io);
    }

    #[test]
    fn fmt_error_conversion() {
        let core_err: CoreError = std::fmt::Error.into();
        assert!(matches!(core_err, CoreError::Format(_)));
        assert!(!core_err.is_recoverable());
    }
}
