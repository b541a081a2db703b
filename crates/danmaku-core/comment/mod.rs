//! Comment model
//!
//! A [`Comment`] is the normalized record every source reader produces and
//! the only thing the scheduler and renderer see. Geometry is estimated once
//! at construction from the text and font size: one font-size unit per
//! character horizontally and per line vertically. This is an approximation,
//! not text shaping.
//!
//! # Example
//!
//! ```rust
//! use danmaku_core::comment::{CommentBuilder, Placement};
//!
//! let comment = CommentBuilder::new("first line\nsecond")
//!     .timeline(5.0)
//!     .font_size(9.0)
//!     .placement(Placement::Scroll)
//!     .build()?;
//!
//! assert_eq!(comment.line_count(), 2);
//! assert_eq!(comment.height(), 18.0);
//! assert_eq!(comment.width(), 90.0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod color;
mod placement;

pub use color::Rgb;
pub use placement::Placement;

use crate::{utils::CoreError, Result};

/// Font size used when a builder is not given one
pub const DEFAULT_FONT_SIZE: f64 = 25.0;

/// A single overlay comment with its derived geometry
///
/// Immutable once built; use [`CommentBuilder`] to construct one.
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    timeline: f64,
    submitted_at: i64,
    sequence: u64,
    text: String,
    placement: Placement,
    color: Rgb,
    font_size: f64,
    is_pictorial: bool,
    line_count: usize,
    height: f64,
    width: f64,
}

impl Comment {
    /// Playback position in seconds at which the comment appears
    #[must_use]
    pub const fn timeline(&self) -> f64 {
        self.timeline
    }

    /// Source submission time, used only to break ordering ties
    #[must_use]
    pub const fn submitted_at(&self) -> i64 {
        self.submitted_at
    }

    /// Decode order, the final ordering tie-break
    #[must_use]
    pub const fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Raw comment text, possibly spanning several lines
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Motion class
    #[must_use]
    pub const fn placement(&self) -> Placement {
        self.placement
    }

    /// Text color
    #[must_use]
    pub const fn color(&self) -> Rgb {
        self.color
    }

    /// Font size in pixels
    #[must_use]
    pub const fn font_size(&self) -> f64 {
        self.font_size
    }

    /// Whether this is block-character art that bypasses collision scheduling
    #[must_use]
    pub const fn is_pictorial(&self) -> bool {
        self.is_pictorial
    }

    /// Number of text lines
    #[must_use]
    pub const fn line_count(&self) -> usize {
        self.line_count
    }

    /// Estimated vertical footprint in pixels (`line_count * font_size`)
    #[must_use]
    pub const fn height(&self) -> f64 {
        self.height
    }

    /// Estimated horizontal footprint in pixels (longest line * `font_size`)
    #[must_use]
    pub const fn width(&self) -> f64 {
        self.width
    }

    /// Number of grid rows the comment covers once placed
    #[must_use]
    pub fn row_span(&self) -> usize {
        self.height.ceil() as usize
    }
}

/// Number of characters in the longest line of `text`
///
/// Counts Unicode scalar values, so wide CJK glyphs count the same as
/// Latin letters.
#[must_use]
pub fn longest_line_chars(text: &str) -> usize {
    text.split('\n')
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0)
}

/// Builder for [`Comment`] records
///
/// Defaults: timeline 0, white, scrolling, font size 25, not pictorial.
#[derive(Debug, Clone)]
pub struct CommentBuilder {
    timeline: f64,
    submitted_at: i64,
    sequence: u64,
    text: String,
    placement: Placement,
    color: Rgb,
    font_size: f64,
    is_pictorial: bool,
}

impl CommentBuilder {
    /// Start a comment with the given text
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            timeline: 0.0,
            submitted_at: 0,
            sequence: 0,
            text: text.into(),
            placement: Placement::default(),
            color: Rgb::WHITE,
            font_size: DEFAULT_FONT_SIZE,
            is_pictorial: false,
        }
    }

    /// Set the playback position in seconds
    #[must_use]
    pub fn timeline(mut self, seconds: f64) -> Self {
        self.timeline = seconds;
        self
    }

    /// Set the submission timestamp
    #[must_use]
    pub fn submitted_at(mut self, timestamp: i64) -> Self {
        self.submitted_at = timestamp;
        self
    }

    /// Set the decode sequence number
    ///
    /// Defaults to 0. Comments of one batch need distinct sequence numbers
    /// for the timeline order to be total; see [`crate::timeline`].
    #[must_use]
    pub fn sequence(mut self, sequence: u64) -> Self {
        self.sequence = sequence;
        self
    }

    /// Set the motion class
    #[must_use]
    pub fn placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    /// Set the text color
    #[must_use]
    pub fn color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    /// Set the font size in pixels
    #[must_use]
    pub fn font_size(mut self, size: f64) -> Self {
        self.font_size = size;
        self
    }

    /// Mark the comment as block-character art
    #[must_use]
    pub fn pictorial(mut self, pictorial: bool) -> Self {
        self.is_pictorial = pictorial;
        self
    }

    /// Validate and compute the derived geometry
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidComment`] if the timeline is negative or
    /// not finite, or the font size is not a positive finite number.
    pub fn build(self) -> Result<Comment> {
        if !self.timeline.is_finite() || self.timeline < 0.0 {
            return Err(CoreError::invalid_comment(format!(
                "timeline must be a non-negative number of seconds, got {}",
                self.timeline
            )));
        }
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(CoreError::invalid_comment(format!(
                "font size must be positive, got {}",
                self.font_size
            )));
        }

        let line_count = self.text.matches('\n').count() + 1;
        let height = line_count as f64 * self.font_size;
        let width = longest_line_chars(&self.text) as f64 * self.font_size;

        Ok(Comment {
            timeline: self.timeline,
            submitted_at: self.submitted_at,
            sequence: self.sequence,
            text: self.text,
            placement: self.placement,
            color: self.color,
            font_size: self.font_size,
            is_pictorial: self.is_pictorial,
            line_count,
            height,
            width,
        })
    }
}
