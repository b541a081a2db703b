//! Event renderer
//!
//! Turns scheduler assignments into positioned, timed ASS dialogue events.
//! Rendering is a pure function of the assignment and the run settings, so
//! rendering the same assignment twice gives byte-identical lines.
//!
//! # Example
//!
//! ```rust
//! use danmaku_core::comment::{CommentBuilder, Placement};
//! use danmaku_core::render::{EventRenderer, StyleId};
//! use danmaku_core::scheduler::schedule;
//! use danmaku_core::StageConfig;
//!
//! let comment = CommentBuilder::new("hello")
//!     .timeline(1.5)
//!     .placement(Placement::Top)
//!     .build()?;
//! let config = StageConfig::default();
//! let decisions = schedule([&comment], &config);
//! let renderer = EventRenderer::new(&config, StyleId::new("Run"));
//!
//! let events = renderer.render(decisions[0].assignment().unwrap());
//! assert_eq!(
//!     events[0].to_string(),
//!     "Dialogue: 2,0:00:01.50,0:00:06.50,Run,,0000,0000,0000,,{\\an8\\pos(341, 0)}hello"
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod color;
mod escape;
mod header;
mod timestamp;

pub use color::{convert_color, uses_bt709, COLOR_REFERENCE_STAGE};
pub use escape::{escape_text, unescape_text, EMPTY_LINE_PLACEHOLDER, LINE_BREAK, SPACE_PLACEHOLDER};
pub use header::{
    alpha_byte, write_header, StyleId, PICTORIAL_FONT_FACE, PICTORIAL_FONT_SIZE,
};
pub use timestamp::{format_ass_time, format_timestamp, seconds_to_centiseconds};

use core::fmt;

use crate::{
    comment::{Comment, Placement, Rgb},
    scheduler::{Assignment, AssignmentKind},
    StageConfig,
};

/// Dialogue layer used for every event
pub const EVENT_LAYER: u8 = 2;

/// Row distance between consecutive lines of a pictorial comment
pub const PICTORIAL_ROW_STEP: usize = 10;

/// Override-block anchor for stationary events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// `\an8`: top center
    TopCenter,
    /// `\an2`: bottom center
    BottomCenter,
}

impl Anchor {
    const fn tag(self) -> u8 {
        match self {
            Self::TopCenter => 8,
            Self::BottomCenter => 2,
        }
    }
}

/// Where an event sits on screen over its lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    /// Fixed position
    Fixed { anchor: Anchor, x: i64, y: i64 },
    /// Linear horizontal travel over the whole duration
    Move { from_x: i64, to_x: i64, y: i64 },
}

impl fmt::Display for Motion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Fixed { anchor, x, y } => write!(f, "\\an{}\\pos({x}, {y})", anchor.tag()),
            Self::Move { from_x, to_x, y } => write!(f, "\\move({from_x}, {y}, {to_x}, {y})"),
        }
    }
}

/// A style tag emitted only where a comment departs from the run style
#[derive(Debug, Clone, PartialEq)]
pub enum StyleOverride {
    /// `\fs`: font size
    FontSize(f64),
    /// `\c`: primary color as `BBGGRR`
    Color(String),
    /// `\3c`: outline color as `BBGGRR`
    OutlineColor(String),
}

impl fmt::Display for StyleOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FontSize(size) => write!(f, "\\fs{size:.0}"),
            Self::Color(bgr) => write!(f, "\\c&H{bgr}&"),
            Self::OutlineColor(bgr) => write!(f, "\\3c&H{bgr}&"),
        }
    }
}

/// One rendered dialogue line
#[derive(Debug, Clone, PartialEq)]
pub struct DialogueEvent {
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: f64,
    /// Style name
    pub style: String,
    /// Position or movement
    pub motion: Motion,
    /// Style tags after the motion tag
    pub overrides: Vec<StyleOverride>,
    /// Escaped text
    pub text: String,
}

impl fmt::Display for DialogueEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Dialogue: {EVENT_LAYER},{},{},{},,0000,0000,0000,,{{{}",
            format_timestamp(self.start),
            format_timestamp(self.end),
            self.style,
            self.motion
        )?;
        for tag in &self.overrides {
            write!(f, "{tag}")?;
        }
        write!(f, "}}{}", self.text)
    }
}

/// Renders assignments of one run into dialogue events
#[derive(Debug, Clone)]
pub struct EventRenderer {
    stage_width: u32,
    usable_height: u32,
    font_size: f64,
    style: StyleId,
}

impl EventRenderer {
    /// Create a renderer for a run
    #[must_use]
    pub fn new(config: &StageConfig, style: StyleId) -> Self {
        Self {
            stage_width: config.width,
            usable_height: config.usable_height(),
            font_size: config.font_size,
            style,
        }
    }

    /// Run style name
    #[must_use]
    pub const fn style(&self) -> &StyleId {
        &self.style
    }

    /// Render one assignment
    ///
    /// Pictorial comments yield one event per text line; everything else
    /// yields exactly one event.
    #[must_use]
    pub fn render(&self, assignment: &Assignment<'_>) -> Vec<DialogueEvent> {
        let comment = assignment.comment();
        if assignment.kind() == AssignmentKind::Pictorial {
            let style = self.style.pictorial();
            let last = comment.line_count() - 1;
            return comment
                .text()
                .split('\n')
                .enumerate()
                .map(|(index, line)| DialogueEvent {
                    start: assignment.start(),
                    end: assignment.end(),
                    style: style.clone(),
                    motion: self.motion(
                        comment,
                        assignment.row() + Self::line_offset(comment, index, last),
                    ),
                    overrides: self.overrides(comment, PICTORIAL_FONT_SIZE),
                    text: escape_text(line),
                })
                .collect();
        }

        vec![DialogueEvent {
            start: assignment.start(),
            end: assignment.end(),
            style: self.style.to_string(),
            motion: self.motion(comment, assignment.row()),
            overrides: self.overrides(comment, self.font_size),
            text: escape_text(comment.text()),
        }]
    }

    /// Row offset of line `index` of pictorial art whose last line is `last`
    ///
    /// Bottom rows are measured upward from the reserve, so the first line
    /// gets the largest offset and stays on top.
    const fn line_offset(comment: &Comment, index: usize, last: usize) -> usize {
        let step = match comment.placement() {
            Placement::Bottom => last - index,
            _ => index,
        };
        step * PICTORIAL_ROW_STEP
    }

    /// Motion path for `comment` placed at `row`
    #[must_use]
    pub fn motion(&self, comment: &Comment, row: usize) -> Motion {
        let row = row as i64;
        let width = i64::from(self.stage_width);
        let offscreen = -(comment.width().ceil() as i64);
        match comment.placement() {
            Placement::Top => Motion::Fixed {
                anchor: Anchor::TopCenter,
                x: width / 2,
                y: row,
            },
            Placement::Bottom => Motion::Fixed {
                anchor: Anchor::BottomCenter,
                x: width / 2,
                y: i64::from(self.usable_height) - row,
            },
            Placement::Scroll => Motion::Move {
                from_x: width,
                to_x: offscreen,
                y: row,
            },
            Placement::ScrollReversed => Motion::Move {
                from_x: offscreen,
                to_x: width,
                y: row,
            },
        }
    }

    /// Style tags for `comment` relative to a reference font size
    ///
    /// Sizes within one unit of the reference are left to the style. Colors
    /// are converted for [`COLOR_REFERENCE_STAGE`].
    #[must_use]
    pub fn overrides(&self, comment: &Comment, reference_size: f64) -> Vec<StyleOverride> {
        let mut tags = Vec::new();
        if (comment.font_size() - reference_size).abs() >= 1.0 {
            tags.push(StyleOverride::FontSize(comment.font_size()));
        }
        if comment.color() != Rgb::WHITE {
            let (width, height) = COLOR_REFERENCE_STAGE;
            tags.push(StyleOverride::Color(convert_color(comment.color(), width, height)));
            if comment.color() == Rgb::BLACK {
                tags.push(StyleOverride::OutlineColor("FFFFFF".to_string()));
            }
        }
        tags
    }
}
