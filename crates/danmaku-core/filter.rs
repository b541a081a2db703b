//! Text filters applied before scheduling
//!
//! Patterns are compiled up front. A bad pattern is a configuration error
//! and fails the run before any comment is placed.

use crate::{utils::CoreError, Result};
use regex::Regex;

/// A set of compiled regular expressions
///
/// A comment is filtered out when its text matches any of them.
#[derive(Debug, Clone, Default)]
pub struct CommentFilter {
    patterns: Vec<Regex>,
}

impl CommentFilter {
    /// Compile every non-empty pattern
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidFilter`] naming the first pattern that
    /// fails to compile.
    pub fn new<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut compiled = Vec::new();
        for pattern in patterns {
            let pattern = pattern.as_ref();
            if pattern.is_empty() {
                continue;
            }
            let regex =
                Regex::new(pattern).map_err(|e| CoreError::invalid_filter(pattern, e))?;
            compiled.push(regex);
        }
        Ok(Self { patterns: compiled })
    }

    /// Compile patterns from the contents of a filter file
    ///
    /// One pattern per line. Lines are trimmed and blank lines ignored.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidFilter`] for the first invalid line.
    pub fn from_lines(contents: &str) -> Result<Self> {
        Self::new(contents.lines().map(str::trim))
    }

    /// Add the patterns of another filter to this one
    #[must_use]
    pub fn merged(mut self, other: Self) -> Self {
        self.patterns.extend(other.patterns);
        self
    }

    /// Whether `text` matches any pattern
    #[must_use]
    pub fn is_match(&self, text: &str) -> bool {
        self.patterns.iter().any(|regex| regex.is_match(text))
    }

    /// Number of compiled patterns
    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether no pattern is configured
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
