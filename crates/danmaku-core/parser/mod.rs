//! Source-format readers
//!
//! Readers turn a source document into [`Comment`]s. A document that cannot
//! be parsed at all is an error; a single malformed record is reported as a
//! [`SourceIssue`] and skipped so one bad line never loses a whole file.

#[cfg(feature = "niconico")]
#[cfg_attr(docsrs, doc(cfg(feature = "niconico")))]
pub mod niconico;

use std::borrow::Cow;

use crate::comment::Comment;

/// A record that was skipped while reading a source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceIssue {
    /// Position of the record among the records of its kind, from 0
    pub record: usize,
    /// What was wrong with it
    pub message: String,
}

/// Comments read from one or more sources
#[derive(Debug, Clone, Default)]
pub struct ReadOutcome {
    /// Successfully decoded comments
    pub comments: Vec<Comment>,
    /// Skipped records
    pub issues: Vec<SourceIssue>,
}

impl ReadOutcome {
    /// Append another outcome
    pub fn extend(&mut self, other: Self) {
        self.comments.extend(other.comments);
        self.issues.extend(other.issues);
    }
}

/// Replace control characters that XML 1.0 forbids with U+FFFD
///
/// Tab, line feed and carriage return are kept.
#[must_use]
pub fn replace_control_chars(text: &str) -> Cow<'_, str> {
    if !text.chars().any(is_forbidden_control) {
        return Cow::Borrowed(text);
    }
    Cow::Owned(
        text.chars()
            .map(|c| if is_forbidden_control(c) { '\u{FFFD}' } else { c })
            .collect(),
    )
}

const fn is_forbidden_control(c: char) -> bool {
    matches!(c, '\u{0}'..='\u{8}' | '\u{B}' | '\u{C}' | '\u{E}'..='\u{1F}')
}
