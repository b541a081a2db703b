//! End-to-end conversion
//!
//! [`Converter`] runs the whole pipeline for one batch of comments: header,
//! timeline ordering, filtering, lane scheduling and event rendering. The
//! caller's comment slice is never reordered; ordering happens on a
//! borrowed view.
//!
//! # Example
//!
//! ```rust
//! use danmaku_core::{CommentBuilder, Converter, StageConfig};
//!
//! let comments = vec![
//!     CommentBuilder::new("first").timeline(1.0).build()?,
//!     CommentBuilder::new("second").timeline(1.0).sequence(2).build()?,
//! ];
//!
//! let mut out = String::new();
//! let report = Converter::new(StageConfig::default()).convert(&comments, &mut out)?;
//!
//! assert_eq!(report.placed, 2);
//! assert_eq!(out.matches("Dialogue:").count(), 2);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use core::fmt::{self, Write};

use log::{debug, info};

use crate::{
    comment::Comment,
    filter::CommentFilter,
    render::{write_header, EventRenderer, StyleId},
    scheduler::{AssignmentKind, Decision, LaneScheduler, PROGRESS_INTERVAL},
    timeline::{count_order_ties, sorted_refs},
    Result, StageConfig,
};

/// Counts collected over one conversion run
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionReport {
    /// Comments handed to the converter
    pub total: usize,
    /// Comments that received a row (including forced and pictorial ones)
    pub placed: usize,
    /// Placed comments that overwrote an occupant
    pub forced: usize,
    /// Placed comments rendered as block-character art
    pub pictorial: usize,
    /// Comments dropped because the stage was full
    pub dropped: usize,
    /// Comments removed by the text filter
    pub filtered: usize,
}

impl ConversionReport {
    fn record(&mut self, decision: &Decision<'_>) {
        match decision.assignment().map(|a| a.kind()) {
            Some(AssignmentKind::Free) => self.placed += 1,
            Some(AssignmentKind::Forced) => {
                self.placed += 1;
                self.forced += 1;
            }
            Some(AssignmentKind::Pictorial) => {
                self.placed += 1;
                self.pictorial += 1;
            }
            None => self.dropped += 1,
        }
    }
}

impl fmt::Display for ConversionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} comments: {} placed ({} forced, {} pictorial), {} dropped, {} filtered",
            self.total, self.placed, self.forced, self.pictorial, self.dropped, self.filtered
        )
    }
}

type ProgressHook<'p> = Box<dyn FnMut(usize, usize) + 'p>;

/// Configured conversion pipeline
pub struct Converter<'p> {
    config: StageConfig,
    filter: CommentFilter,
    style: Option<StyleId>,
    progress: Option<ProgressHook<'p>>,
}

impl fmt::Debug for Converter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Converter")
            .field("config", &self.config)
            .field("filter", &self.filter)
            .field("style", &self.style)
            .field("progress", &self.progress.is_some())
            .finish()
    }
}

impl<'p> Converter<'p> {
    /// Create a converter with no filter and a content-derived style name
    #[must_use]
    pub fn new(config: StageConfig) -> Self {
        Self {
            config,
            filter: CommentFilter::default(),
            style: None,
            progress: None,
        }
    }

    /// Skip comments whose text matches `filter`
    #[must_use]
    pub fn with_filter(mut self, filter: CommentFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Use a fixed style name instead of deriving one from the input
    #[must_use]
    pub fn with_style_id(mut self, style: StyleId) -> Self {
        self.style = Some(style);
        self
    }

    /// Receive `(done, total)` every [`PROGRESS_INTERVAL`] comments and
    /// once when scheduling finishes
    #[must_use]
    pub fn with_progress(mut self, hook: impl FnMut(usize, usize) + 'p) -> Self {
        self.progress = Some(Box::new(hook));
        self
    }

    /// The run configuration
    #[must_use]
    pub const fn config(&self) -> &StageConfig {
        &self.config
    }

    /// Convert `comments` and write a complete script to `out`
    ///
    /// Lines are separated by `\n`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CoreError::Config`] for an unusable configuration
    /// (nothing is written in that case) and [`crate::CoreError::Format`]
    /// when the sink fails.
    pub fn convert<W: Write>(&mut self, comments: &[Comment], out: &mut W) -> Result<ConversionReport> {
        self.config.validate()?;

        let style = self
            .style
            .clone()
            .unwrap_or_else(|| StyleId::from_comments(comments));
        write_header(out, &self.config, &style)?;

        let ordered = sorted_refs(comments);
        let ties = count_order_ties(&ordered);
        if ties > 0 {
            debug!("{ties} comment pairs share position, submission time and sequence; keeping input order");
        }
        let total = ordered.len();
        let renderer = EventRenderer::new(&self.config, style);
        let mut scheduler = LaneScheduler::new(&self.config);
        let mut report = ConversionReport {
            total,
            ..ConversionReport::default()
        };

        for (index, &comment) in ordered.iter().enumerate() {
            if index % PROGRESS_INTERVAL == 0 {
                self.report_progress(index, total);
            }
            if self.filter.is_match(comment.text()) {
                debug!("filtered #{}", comment.sequence());
                report.filtered += 1;
                continue;
            }
            let decision = scheduler.place(comment);
            report.record(&decision);
            if let Some(assignment) = decision.assignment() {
                for event in renderer.render(assignment) {
                    writeln!(out, "{event}")?;
                }
            }
        }
        self.report_progress(total, total);

        info!("{report}");
        Ok(report)
    }

    fn report_progress(&mut self, done: usize, total: usize) {
        if let Some(hook) = self.progress.as_mut() {
            hook(done, total);
        }
    }
}
