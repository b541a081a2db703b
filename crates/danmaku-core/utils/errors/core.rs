//! Core error type for danmaku-core operations

use std::fmt;

use thiserror::Error;

/// Result type for core operations, using the crate's unified `CoreError`.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Main error type for danmaku-core operations
///
/// Scheduling itself never fails: saturation and degenerate geometry are
/// resolved by defined fallbacks. These variants cover the things that can
/// go wrong around it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A comment record violates the model invariants
    #[error("Invalid comment: {0}")]
    InvalidComment(String),

    /// A text filter expression failed to compile
    #[error("Invalid regular expression '{pattern}': {message}")]
    InvalidFilter { pattern: String, message: String },

    /// Stage or timing configuration is unusable
    #[error("Configuration error: {0}")]
    Config(String),

    /// A source document could not be parsed at all
    #[error("Parse error: {0}")]
    Parse(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Writing to the output sink failed
    #[error("Output formatting error: {0}")]
    Format(String),
}

impl CoreError {
    /// Create configuration error from message
    pub fn config<T: fmt::Display>(message: T) -> Self {
        Self::Config(message.to_string())
    }

    /// Create parse error from message
    pub fn parse<T: fmt::Display>(message: T) -> Self {
        Self::Parse(message.to_string())
    }

    /// Create comment validation error from message
    pub fn invalid_comment<T: fmt::Display>(message: T) -> Self {
        Self::InvalidComment(message.to_string())
    }

    /// Create filter error for a specific pattern
    pub fn invalid_filter<T: fmt::Display>(pattern: &str, message: T) -> Self {
        Self::InvalidFilter {
            pattern: pattern.to_string(),
            message: message.to_string(),
        }
    }

    /// Check if the run can continue after this error
    ///
    /// A rejected comment only loses that comment. Everything else aborts
    /// the conversion before or while output is written.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        match self {
            Self::InvalidComment(_) => true,
            Self::InvalidFilter { .. }
            | Self::Config(_)
            | Self::Parse(_)
            | Self::Io(_)
            | Self::Format(_) => false,
        }
    }

    /// Get a hint for resolving the error, if one applies
    #[must_use]
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::InvalidFilter { .. } => {
                Some("Check the filter for unbalanced parentheses or brackets")
            }
            Self::Config(_) => Some("Check stage size, font size, opacity and durations"),
            Self::Parse(_) => Some("Ensure the input is a well-formed comment XML document"),
            Self::InvalidComment(_) | Self::Io(_) | Self::Format(_) => None,
        }
    }
}
