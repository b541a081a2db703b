//! Timeline ordering for comments
//!
//! Scheduling is greedy, so its result depends on the order comments are
//! fed in. Comments are ordered by playback position, then submission time,
//! then decode sequence. Sequence numbers are unique within a run, which
//! makes this a total order: no two distinct comments compare equal.
//!
//! Float positions are compared with [`f64::total_cmp`] so the order stays
//! total even for values the builder would reject.

use crate::comment::Comment;
use core::cmp::Ordering;

/// Compare two comments in scheduling order
#[must_use]
pub fn timeline_order(a: &Comment, b: &Comment) -> Ordering {
    a.timeline()
        .total_cmp(&b.timeline())
        .then_with(|| a.submitted_at().cmp(&b.submitted_at()))
        .then_with(|| a.sequence().cmp(&b.sequence()))
}

/// Sort comments in place into scheduling order
pub fn sort_comments(comments: &mut [Comment]) {
    comments.sort_by(timeline_order);
}

/// Borrow comments in scheduling order without reordering the source
#[must_use]
pub fn sorted_refs(comments: &[Comment]) -> Vec<&Comment> {
    let mut refs: Vec<&Comment> = comments.iter().collect();
    refs.sort_by(|a, b| timeline_order(a, b));
    refs
}

/// Count adjacent pairs of an ordered view that compare equal
///
/// A non-zero count means some comments share playback position,
/// submission time and sequence number. Sorting is stable, so such
/// comments keep their input order.
#[must_use]
pub fn count_order_ties(ordered: &[&Comment]) -> usize {
    ordered
        .windows(2)
        .filter(|pair| timeline_order(pair[0], pair[1]) == Ordering::Equal)
        .count()
}

/// Hands out strictly increasing sequence numbers
///
/// Share one counter across every input of a run so sequence numbers stay
/// unique when several sources are merged.
#[derive(Debug, Default, Clone)]
pub struct SequenceCounter {
    next: u64,
}

impl SequenceCounter {
    /// Start counting at 1
    #[must_use]
    pub const fn new() -> Self {
        Self { next: 1 }
    }

    /// Take the next sequence number
    pub fn next_sequence(&mut self) -> u64 {
        let current = self.next.max(1);
        self.next = current + 1;
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comment::CommentBuilder;

    fn comment(timeline: f64, submitted_at: i64, sequence: u64) -> Comment {
        CommentBuilder::new("x")
            .timeline(timeline)
            .submitted_at(submitted_at)
            .sequence(sequence)
            .build()
            .unwrap()
    }

    #[test]
    fn orders_by_timeline_first() {
        let mut comments = vec![comment(2.0, 0, 1), comment(1.0, 9, 2)];
        sort_comments(&mut comments);
        assert_eq!(comments[0].timeline(), 1.0);
    }

    #[test]
    fn submission_time_breaks_timeline_ties() {
        let mut comments = vec![comment(1.0, 20, 1), comment(1.0, 10, 2)];
        sort_comments(&mut comments);
        assert_eq!(comments[0].submitted_at(), 10);
    }

    #[test]
    fn sequence_breaks_remaining_ties() {
        let mut comments = vec![comment(1.0, 10, 7), comment(1.0, 10, 3)];
        sort_comments(&mut comments);
        assert_eq!(comments[0].sequence(), 3);
        assert_eq!(
            timeline_order(&comments[0], &comments[1]),
            Ordering::Less
        );
    }

    #[test]
    fn sorted_refs_leaves_source_untouched() {
        let comments = vec![comment(3.0, 0, 1), comment(1.0, 0, 2)];
        let refs = sorted_refs(&comments);
        assert_eq!(refs[0].sequence(), 2);
        assert_eq!(comments[0].sequence(), 1);
    }

    #[test]
    fn sequence_counter_is_strictly_increasing() {
        let mut counter = SequenceCounter::new();
        let first = counter.next_sequence();
        let second = counter.next_sequence();
        assert_eq!(first, 1);
        assert!(second > first);

        let mut defaulted = SequenceCounter::default();
        assert_eq!(defaulted.next_sequence(), 1);
        assert_eq!(defaulted.next_sequence(), 2);
    }

    #[test]
    fn duplicate_keys_are_counted_and_keep_input_order() {
        let batch = vec![
            CommentBuilder::new("first").timeline(1.0).build().unwrap(),
            CommentBuilder::new("second").timeline(1.0).build().unwrap(),
            comment(0.5, 0, 7),
        ];
        let ordered = sorted_refs(&batch);
        assert_eq!(count_order_ties(&ordered), 1);
        let texts: Vec<&str> = ordered.iter().map(|c| c.text()).collect();
        assert_eq!(texts, vec!["x", "first", "second"]);

        let unique = vec![comment(1.0, 0, 1), comment(1.0, 0, 2)];
        assert_eq!(count_order_ties(&sorted_refs(&unique)), 0);
    }
}
