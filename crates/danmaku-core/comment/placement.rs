//! Placement classes and their anchoring behavior

use core::fmt;

/// How a comment moves across the stage
///
/// Each class is scheduled on its own lane array; comments of different
/// classes never collide with each other.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Placement {
    /// Enters at the right edge and travels to the left
    #[default]
    Scroll,
    /// Enters at the left edge and travels to the right
    ScrollReversed,
    /// Stationary, horizontally centered, anchored to the top of the stage
    Top,
    /// Stationary, horizontally centered, anchored to the bottom of the stage
    Bottom,
}

impl Placement {
    /// All classes, in lane order
    pub const ALL: [Self; 4] = [Self::Scroll, Self::Top, Self::Bottom, Self::ScrollReversed];

    /// Index of this class's lane array in the occupancy grid
    #[must_use]
    pub const fn lane(self) -> usize {
        match self {
            Self::Scroll => 0,
            Self::Top => 1,
            Self::Bottom => 2,
            Self::ScrollReversed => 3,
        }
    }

    /// Whether comments of this class stay in place
    #[must_use]
    pub const fn is_stationary(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }

    /// Whether comments of this class travel horizontally
    #[must_use]
    pub const fn is_scrolling(self) -> bool {
        !self.is_stationary()
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Scroll => "scroll",
            Self::ScrollReversed => "scroll-reversed",
            Self::Top => "top",
            Self::Bottom => "bottom",
        })
    }
}
