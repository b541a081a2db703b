//! Row occupancy grid
//!
//! One lane array per placement class. Each slot remembers the comment most
//! recently committed to that row. The grid borrows comments for the length
//! of a scheduling run and never modifies them.

use crate::comment::{Comment, Placement};

/// The comment currently recorded in a grid row
#[derive(Debug, Clone, Copy)]
pub struct Occupant<'a> {
    comment: &'a Comment,
}

impl<'a> Occupant<'a> {
    /// Wrap a placed comment
    #[must_use]
    pub const fn new(comment: &'a Comment) -> Self {
        Self { comment }
    }

    /// The occupying comment
    #[must_use]
    pub const fn comment(&self) -> &'a Comment {
        self.comment
    }

    /// When the occupant appeared
    #[must_use]
    pub const fn timeline(&self) -> f64 {
        self.comment.timeline()
    }

    /// Estimated width of the occupant
    #[must_use]
    pub const fn width(&self) -> f64 {
        self.comment.width()
    }

    /// Whether both slots hold the very same comment
    #[must_use]
    pub fn is_same(&self, other: &Occupant<'_>) -> bool {
        core::ptr::eq(self.comment, other.comment)
    }
}

/// Occupancy of every row for each of the four placement classes
#[derive(Debug, Clone)]
pub struct OccupancyGrid<'a> {
    lanes: [Vec<Option<Occupant<'a>>>; 4],
    rows: usize,
}

impl<'a> OccupancyGrid<'a> {
    /// Create an empty grid for `rows` usable rows
    ///
    /// Each lane keeps one slot past the last usable row. Free-run tests
    /// never read it, but a commit ending exactly at the boundary lands there.
    #[must_use]
    pub fn new(rows: usize) -> Self {
        Self {
            lanes: core::array::from_fn(|_| vec![None; rows + 1]),
            rows,
        }
    }

    /// Number of usable rows
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Occupant of `row` in the lane of `placement`
    #[must_use]
    pub fn occupant(&self, placement: Placement, row: usize) -> Option<Occupant<'a>> {
        self.lanes[placement.lane()].get(row).copied().flatten()
    }

    /// Record `comment` in every row it covers starting at `row`
    ///
    /// Rows past the end of the lane are ignored.
    pub fn mark(&mut self, comment: &'a Comment, row: usize) {
        let lane = &mut self.lanes[comment.placement().lane()];
        let end = row.saturating_add(comment.row_span()).min(lane.len());
        if row >= end {
            return;
        }
        for slot in &mut lane[row..end] {
            *slot = Some(Occupant::new(comment));
        }
    }

    /// Number of occupied rows in the lane of `placement`
    #[must_use]
    pub fn occupied_rows(&self, placement: Placement) -> usize {
        self.lanes[placement.lane()]
            .iter()
            .filter(|slot| slot.is_some())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comment::CommentBuilder;

    #[test]
    fn mark_covers_ceil_height() {
        let comment = CommentBuilder::new("x")
            .font_size(2.5)
            .placement(Placement::Top)
            .build()
            .unwrap();
        let mut grid = OccupancyGrid::new(10);
        grid.mark(&comment, 4);
        assert!(grid.occupant(Placement::Top, 3).is_none());
        assert!(grid.occupant(Placement::Top, 4).is_some());
        assert!(grid.occupant(Placement::Top, 6).is_some());
        assert!(grid.occupant(Placement::Top, 7).is_none());
        assert_eq!(grid.occupied_rows(Placement::Top), 3);
    }

    #[test]
    fn lanes_are_independent() {
        let comment = CommentBuilder::new("x").font_size(1.0).build().unwrap();
        let mut grid = OccupancyGrid::new(4);
        grid.mark(&comment, 0);
        assert!(grid.occupant(Placement::Scroll, 0).is_some());
        for other in [Placement::Top, Placement::Bottom, Placement::ScrollReversed] {
            assert!(grid.occupant(other, 0).is_none());
        }
    }

    #[test]
    fn marking_past_the_end_is_clipped() {
        let comment = CommentBuilder::new("x").font_size(10.0).build().unwrap();
        let mut grid = OccupancyGrid::new(4);
        grid.mark(&comment, 2);
        assert_eq!(grid.occupied_rows(Placement::Scroll), 3);
        grid.mark(&comment, 100);
        assert_eq!(grid.occupied_rows(Placement::Scroll), 3);
        assert!(grid.occupant(Placement::Scroll, 100).is_none());
    }

    #[test]
    fn occupant_identity() {
        let a = CommentBuilder::new("same").build().unwrap();
        let b = a.clone();
        assert!(Occupant::new(&a).is_same(&Occupant::new(&a)));
        assert!(!Occupant::new(&a).is_same(&Occupant::new(&b)));
    }
}
