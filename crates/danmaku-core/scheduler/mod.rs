//! Lane scheduler
//!
//! Assigns every comment a starting row so that comments of the same
//! placement class do not overlap while both are on screen. Placement is
//! greedy and single-pass: each comment sees only the comments placed before
//! it, takes the first row with a tall enough free run, and is never moved
//! afterwards.
//!
//! When no row fits, the run either drops the comment or force-places it
//! over the row whose occupant appeared earliest, depending on
//! [`StageConfig::drop_when_full`].
//!
//! # Example
//!
//! ```rust
//! use danmaku_core::comment::{CommentBuilder, Placement};
//! use danmaku_core::scheduler::{schedule, Decision};
//! use danmaku_core::StageConfig;
//!
//! let comments = vec![
//!     CommentBuilder::new("a").timeline(1.0).placement(Placement::Top).font_size(10.0).build()?,
//!     CommentBuilder::new("b").timeline(1.0).placement(Placement::Top).font_size(10.0).build()?,
//! ];
//! let config = StageConfig::default().with_stage(100, 20);
//!
//! let decisions = schedule(&comments, &config);
//! let rows: Vec<usize> = decisions
//!     .iter()
//!     .filter_map(Decision::assignment)
//!     .map(|a| a.row())
//!     .collect();
//! assert_eq!(rows, vec![0, 10]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod collision;
pub mod grid;

pub use collision::{free_rows_scrolling, free_rows_stationary, scroll_threshold};
pub use grid::{OccupancyGrid, Occupant};

use crate::{
    comment::{Comment, Placement},
    StageConfig,
};
use log::{debug, trace};

/// How often the progress hook fires, in processed comments
pub const PROGRESS_INTERVAL: usize = 1000;

/// How a placed comment obtained its row
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssignmentKind {
    /// Found a collision-free run
    Free,
    /// Overwrote an existing occupant because the stage was full
    Forced,
    /// Block-character art placed at its fixed position without scheduling
    Pictorial,
}

/// A comment bound to a starting row and display window
#[derive(Debug, Clone, Copy)]
pub struct Assignment<'a> {
    comment: &'a Comment,
    row: usize,
    end: f64,
    kind: AssignmentKind,
}

impl<'a> Assignment<'a> {
    /// The placed comment
    #[must_use]
    pub const fn comment(&self) -> &'a Comment {
        self.comment
    }

    /// First grid row covered by the comment
    #[must_use]
    pub const fn row(&self) -> usize {
        self.row
    }

    /// When the comment appears
    #[must_use]
    pub const fn start(&self) -> f64 {
        self.comment.timeline()
    }

    /// When the comment leaves the stage
    #[must_use]
    pub const fn end(&self) -> f64 {
        self.end
    }

    /// How the row was chosen
    #[must_use]
    pub const fn kind(&self) -> AssignmentKind {
        self.kind
    }

    /// Whether the row was taken by overwriting an occupant
    #[must_use]
    pub fn is_forced(&self) -> bool {
        self.kind == AssignmentKind::Forced
    }
}

/// Outcome of scheduling one comment
#[derive(Debug, Clone, Copy)]
pub enum Decision<'a> {
    /// The comment was given a row
    Placed(Assignment<'a>),
    /// The stage was full and dropping is enabled
    Dropped(&'a Comment),
}

impl<'a> Decision<'a> {
    /// The assignment, if the comment was placed
    #[must_use]
    pub const fn assignment(&self) -> Option<&Assignment<'a>> {
        match self {
            Self::Placed(assignment) => Some(assignment),
            Self::Dropped(_) => None,
        }
    }

    /// The comment this decision is about
    #[must_use]
    pub const fn comment(&self) -> &'a Comment {
        match self {
            Self::Placed(assignment) => assignment.comment,
            Self::Dropped(comment) => comment,
        }
    }
}

/// Stateful placement engine for one scheduling run
///
/// Feed comments in timeline order through [`LaneScheduler::place`]. Work
/// happens strictly one comment at a time, so a caller can stop between any
/// two calls.
#[derive(Debug, Clone)]
pub struct LaneScheduler<'a> {
    grid: OccupancyGrid<'a>,
    stage_width: f64,
    marquee_duration: f64,
    still_duration: f64,
    drop_when_full: bool,
}

impl<'a> LaneScheduler<'a> {
    /// Create a scheduler with an empty grid sized for `config`
    #[must_use]
    pub fn new(config: &StageConfig) -> Self {
        Self {
            grid: OccupancyGrid::new(config.usable_height() as usize),
            stage_width: f64::from(config.width),
            marquee_duration: config.marquee_duration,
            still_duration: config.still_duration,
            drop_when_full: config.drop_when_full,
        }
    }

    /// Current occupancy
    #[must_use]
    pub const fn grid(&self) -> &OccupancyGrid<'a> {
        &self.grid
    }

    /// Display duration for a placement class
    #[must_use]
    pub fn duration(&self, placement: Placement) -> f64 {
        if placement.is_stationary() {
            self.still_duration
        } else {
            self.marquee_duration
        }
    }

    /// Place one comment
    pub fn place(&mut self, comment: &'a Comment) -> Decision<'a> {
        let end = comment.timeline() + self.duration(comment.placement());

        if comment.is_pictorial() {
            return Decision::Placed(Assignment {
                comment,
                row: 0,
                end,
                kind: AssignmentKind::Pictorial,
            });
        }

        if let Some(row) = self.find_free_row(comment) {
            self.grid.mark(comment, row);
            trace!(
                "placed #{} ({}) at row {row}",
                comment.sequence(),
                comment.placement()
            );
            return Decision::Placed(Assignment {
                comment,
                row,
                end,
                kind: AssignmentKind::Free,
            });
        }

        if self.drop_when_full {
            debug!(
                "dropped #{} at {:.2}s: no free {} row",
                comment.sequence(),
                comment.timeline(),
                comment.placement()
            );
            return Decision::Dropped(comment);
        }

        let row = self.alternative_row(comment);
        self.grid.mark(comment, row);
        debug!(
            "forced #{} at {:.2}s into {} row {row}",
            comment.sequence(),
            comment.timeline(),
            comment.placement()
        );
        Decision::Placed(Assignment {
            comment,
            row,
            end,
            kind: AssignmentKind::Forced,
        })
    }

    /// Length of the free run starting at `row` for `comment`
    #[must_use]
    pub fn free_rows(&self, comment: &Comment, row: usize) -> usize {
        if comment.placement().is_stationary() {
            free_rows_stationary(&self.grid, comment, row, self.still_duration)
        } else {
            free_rows_scrolling(
                &self.grid,
                comment,
                row,
                self.stage_width,
                self.marquee_duration,
            )
        }
    }

    /// First row with a free run at least as tall as the comment
    fn find_free_row(&self, comment: &Comment) -> Option<usize> {
        let last_start = self.grid.rows() as f64 - comment.height();
        let mut row = 0;
        while row as f64 <= last_start {
            let free = self.free_rows(comment, row);
            if free as f64 >= comment.height() {
                return Some(row);
            }
            row += free.max(1);
        }
        None
    }

    /// Row to overwrite when nothing is free
    ///
    /// The first empty row if any, otherwise the row whose occupant appeared
    /// earliest. Falls back to row 0 when the comment is taller than the
    /// stage.
    fn alternative_row(&self, comment: &Comment) -> usize {
        let placement = comment.placement();
        let candidates = self.grid.rows().saturating_sub(comment.row_span());
        let mut best = 0;
        for row in 0..candidates {
            let Some(occupant) = self.grid.occupant(placement, row) else {
                return row;
            };
            let earlier = self
                .grid
                .occupant(placement, best)
                .is_some_and(|current| occupant.timeline() < current.timeline());
            if earlier {
                best = row;
            }
        }
        best
    }
}

/// Schedule comments that are already in timeline order
///
/// See [`crate::timeline`] for the ordering.
#[must_use]
pub fn schedule<'a, I>(comments: I, config: &StageConfig) -> Vec<Decision<'a>>
where
    I: IntoIterator<Item = &'a Comment>,
{
    let mut scheduler = LaneScheduler::new(config);
    comments
        .into_iter()
        .map(|comment| scheduler.place(comment))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comment::CommentBuilder;

    fn comment(timeline: f64, size: f64, placement: Placement, sequence: u64) -> Comment {
        CommentBuilder::new("x")
            .timeline(timeline)
            .font_size(size)
            .placement(placement)
            .sequence(sequence)
            .build()
            .unwrap()
    }

    fn rows(decisions: &[Decision<'_>]) -> Vec<Option<usize>> {
        decisions
            .iter()
            .map(|d| d.assignment().map(Assignment::row))
            .collect()
    }

    #[test]
    fn first_comment_takes_row_zero() {
        let c = CommentBuilder::new("two\nlines")
            .timeline(5.0)
            .font_size(9.0)
            .build()
            .unwrap();
        let config = StageConfig::default().with_stage(683, 80);
        let decisions = schedule([&c], &config);
        let assignment = decisions[0].assignment().unwrap();
        assert_eq!(assignment.row(), 0);
        assert_eq!(assignment.kind(), AssignmentKind::Free);
        assert_eq!(assignment.start(), 5.0);
        assert_eq!(assignment.end(), 10.0);
    }

    #[test]
    fn simultaneous_top_comments_stack() {
        let comments = [
            comment(1.0, 10.0, Placement::Top, 1),
            comment(1.0, 10.0, Placement::Top, 2),
        ];
        let config = StageConfig::default()
            .with_stage(100, 20)
            .with_durations(5.0, 4.0);
        assert_eq!(
            rows(&schedule(&comments, &config)),
            vec![Some(0), Some(10)]
        );
    }

    #[test]
    fn full_stage_drops_when_enabled() {
        let comments = [
            comment(1.0, 10.0, Placement::Top, 1),
            comment(1.0, 10.0, Placement::Top, 2),
            comment(1.0, 10.0, Placement::Top, 3),
        ];
        let config = StageConfig::default()
            .with_stage(100, 20)
            .with_drop_when_full(true);
        let decisions = schedule(&comments, &config);
        assert!(matches!(decisions[2], Decision::Dropped(c) if c.sequence() == 3));
    }

    #[test]
    fn single_row_stage_forces_overwrite() {
        let comments = [
            comment(1.0, 1.0, Placement::Scroll, 1),
            comment(1.0, 1.0, Placement::Scroll, 2),
        ];
        let config = StageConfig::default().with_stage(100, 1);
        let mut scheduler = LaneScheduler::new(&config);

        let first = scheduler.place(&comments[0]);
        assert_eq!(first.assignment().unwrap().kind(), AssignmentKind::Free);

        let second = scheduler.place(&comments[1]);
        let assignment = second.assignment().unwrap();
        assert!(assignment.is_forced());
        assert_eq!(assignment.row(), 0);
        let occupant = scheduler.grid().occupant(Placement::Scroll, 0).unwrap();
        assert_eq!(occupant.comment().sequence(), 2);
    }

    #[test]
    fn forced_placement_keeps_first_of_equally_old_rows() {
        // stage of 4 rows, two-row comments; rows 0-1 hold an older
        // occupant than rows 2-3
        let old = comment(0.0, 2.0, Placement::Top, 1);
        let newer = comment(0.5, 2.0, Placement::Top, 2);
        let incoming = comment(1.0, 1.0, Placement::Top, 3);
        let config = StageConfig::default().with_stage(100, 4);
        let mut scheduler = LaneScheduler::new(&config);
        scheduler.place(&old);
        scheduler.place(&newer);

        let decision = scheduler.place(&incoming);
        let assignment = decision.assignment().unwrap();
        assert!(assignment.is_forced());
        assert_eq!(assignment.row(), 0);
    }

    #[test]
    fn forced_placement_prefers_never_used_row() {
        let a = comment(0.0, 1.0, Placement::Top, 1);
        let b = comment(0.0, 1.0, Placement::Top, 2);
        let incoming = comment(1.0, 3.0, Placement::Top, 3);
        let config = StageConfig::default().with_stage(100, 5);
        let mut scheduler = LaneScheduler::new(&config);
        scheduler.grid.mark(&a, 0);
        scheduler.grid.mark(&b, 2);

        let decision = scheduler.place(&incoming);
        let assignment = decision.assignment().unwrap();
        assert!(assignment.is_forced());
        assert_eq!(assignment.row(), 1);
    }

    #[test]
    fn forced_placement_takes_earliest_occupant() {
        let config = StageConfig::default().with_stage(100, 4);
        let newer = comment(0.5, 2.0, Placement::Top, 1);
        let old = comment(0.0, 2.0, Placement::Top, 2);
        let incoming = comment(1.0, 1.0, Placement::Top, 3);
        let mut scheduler = LaneScheduler::new(&config);
        // placed out of timeline order on purpose so the older occupant
        // ends up lower on the stage
        scheduler.place(&newer);
        scheduler.place(&old);

        let decision = scheduler.place(&incoming);
        assert_eq!(decision.assignment().unwrap().row(), 2);
    }

    #[test]
    fn stationary_rows_free_up_after_still_duration() {
        let comments = [
            comment(0.0, 20.0, Placement::Bottom, 1),
            comment(5.0, 20.0, Placement::Bottom, 2),
        ];
        let config = StageConfig::default()
            .with_stage(100, 20)
            .with_durations(5.0, 5.0);
        assert_eq!(rows(&schedule(&comments, &config)), vec![Some(0), Some(0)]);
    }

    #[test]
    fn placement_classes_do_not_interact() {
        let comments = [
            comment(0.0, 20.0, Placement::Top, 1),
            comment(0.0, 20.0, Placement::Bottom, 2),
            comment(0.0, 20.0, Placement::Scroll, 3),
            comment(0.0, 20.0, Placement::ScrollReversed, 4),
        ];
        let config = StageConfig::default().with_stage(100, 20);
        let decisions = schedule(&comments, &config);
        for decision in &decisions {
            let assignment = decision.assignment().unwrap();
            assert_eq!(assignment.row(), 0);
            assert_eq!(assignment.kind(), AssignmentKind::Free);
        }
    }

    #[test]
    fn zero_width_scrolling_comment_on_zero_width_stage() {
        let comments = [
            CommentBuilder::new("").timeline(0.0).font_size(10.0).build().unwrap(),
            CommentBuilder::new("").timeline(1.0).font_size(10.0).build().unwrap(),
        ];
        let config = StageConfig::default().with_stage(0, 40);
        let decisions = schedule(&comments, &config);
        assert_eq!(rows(&decisions), vec![Some(0), Some(10)]);
    }

    #[test]
    fn pictorial_comments_bypass_the_grid() {
        let art = CommentBuilder::new("██\n██")
            .pictorial(true)
            .font_size(10.0)
            .build()
            .unwrap();
        let config = StageConfig::default().with_stage(100, 20);
        let mut scheduler = LaneScheduler::new(&config);
        let decision = scheduler.place(&art);
        assert_eq!(
            decision.assignment().unwrap().kind(),
            AssignmentKind::Pictorial
        );
        assert_eq!(scheduler.grid().occupied_rows(Placement::Scroll), 0);
    }

    #[test]
    fn comment_taller_than_stage_is_forced_to_row_zero() {
        let tall = comment(0.0, 50.0, Placement::Scroll, 1);
        let config = StageConfig::default().with_stage(100, 20);
        let decisions = schedule([&tall], &config);
        let assignment = decisions[0].assignment().unwrap();
        assert!(assignment.is_forced());
        assert_eq!(assignment.row(), 0);
    }
}
