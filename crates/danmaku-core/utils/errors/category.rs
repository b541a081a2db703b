//! Error categorization for grouping and display

use super::CoreError;
use std::fmt;

/// Error category for filtering and user interface organization
///
/// # Examples
///
/// ```rust
/// use danmaku_core::utils::errors::{CoreError, ErrorCategory};
///
/// let error = CoreError::parse("unexpected end of document");
/// assert_eq!(error.category(), ErrorCategory::Input);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Source documents and comment records
    Input,

    /// Text filter expressions
    Filter,

    /// Stage and timing configuration
    Configuration,

    /// Reading input or writing output
    Io,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl ErrorCategory {
    /// Get human-readable category name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Filter => "filter",
            Self::Configuration => "configuration",
            Self::Io => "io",
        }
    }

    /// Check if errors in this category are typically user-fixable
    #[must_use]
    pub const fn is_user_fixable(self) -> bool {
        !matches!(self, Self::Io)
    }
}

impl CoreError {
    /// Get error category for filtering/grouping
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidComment(_) | Self::Parse(_) => ErrorCategory::Input,
            Self::InvalidFilter { .. } => ErrorCategory::Filter,
            Self::Config(_) => ErrorCategory::Configuration,
            Self::Io(_) | Self::Format(_) => ErrorCategory::Io,
        }
    }
}
