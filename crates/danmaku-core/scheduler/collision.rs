//! Free-run tests for the two motion classes
//!
//! Both tests walk down the lane from a start row and count rows whose
//! current occupant cannot collide with the new comment. The walk stops at
//! the first conflicting row, at the bottom of the usable area, or once the
//! run is tall enough for the comment. Consecutive rows held by the same
//! occupant are only evaluated once.

use super::grid::{OccupancyGrid, Occupant};
use crate::comment::Comment;

/// Latest appearance time a scrolling occupant may have without colliding
///
/// Falls back to `timeline - marquee_duration` when the comment and the
/// stage both have zero width.
#[must_use]
pub fn scroll_threshold(comment: &Comment, stage_width: f64, marquee_duration: f64) -> f64 {
    let span = comment.width() + stage_width;
    if span == 0.0 {
        comment.timeline() - marquee_duration
    } else {
        comment.timeline() - marquee_duration * (1.0 - stage_width / span)
    }
}

/// Whether a scrolling occupant blocks `comment` on a shared row
#[must_use]
pub fn scroll_blocks(
    occupant: &Occupant<'_>,
    comment: &Comment,
    threshold: f64,
    stage_width: f64,
    marquee_duration: f64,
) -> bool {
    if occupant.timeline() > threshold {
        return true;
    }
    let span = occupant.width() + stage_width;
    // zero span cannot be evaluated and never blocks
    span != 0.0
        && occupant.timeline() + occupant.width() * marquee_duration / span > comment.timeline()
}

/// Whether a stationary occupant is still on screen when `comment` appears
#[must_use]
pub fn still_blocks(occupant: &Occupant<'_>, comment: &Comment, still_duration: f64) -> bool {
    occupant.timeline() + still_duration > comment.timeline()
}

/// Count free rows from `start` for a stationary comment
#[must_use]
pub fn free_rows_stationary(
    grid: &OccupancyGrid<'_>,
    comment: &Comment,
    start: usize,
    still_duration: f64,
) -> usize {
    free_run(grid, comment, start, |occupant| {
        still_blocks(occupant, comment, still_duration)
    })
}

/// Count free rows from `start` for a scrolling comment
#[must_use]
pub fn free_rows_scrolling(
    grid: &OccupancyGrid<'_>,
    comment: &Comment,
    start: usize,
    stage_width: f64,
    marquee_duration: f64,
) -> usize {
    let threshold = scroll_threshold(comment, stage_width, marquee_duration);
    free_run(grid, comment, start, |occupant| {
        scroll_blocks(occupant, comment, threshold, stage_width, marquee_duration)
    })
}

fn free_run<F>(grid: &OccupancyGrid<'_>, comment: &Comment, start: usize, blocks: F) -> usize
where
    F: Fn(&Occupant<'_>) -> bool,
{
    let placement = comment.placement();
    let mut free = 0;
    let mut row = start;
    let mut previous: Option<Occupant<'_>> = None;

    while row < grid.rows() && (free as f64) < comment.height() {
        let current = grid.occupant(placement, row);
        let changed = match (&previous, &current) {
            (Some(prev), Some(cur)) => !prev.is_same(cur),
            (None, None) => false,
            _ => true,
        };
        if changed {
            previous = current;
            if current.as_ref().is_some_and(&blocks) {
                break;
            }
        }
        row += 1;
        free += 1;
    }

    free
}
