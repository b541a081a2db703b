//! Hash function utilities
//!
//! Output must be byte-identical across runs for identical input, so every
//! hasher built here uses fixed ahash seeds instead of a random state.

use ahash::{AHasher, RandomState};
use core::hash::BuildHasher;

const SEEDS: (u64, u64, u64, u64) = (0x1234_5678_9abc_def0, 0xfedc_ba98_7654_3210, 0, 0);

/// Create a hasher with fixed seeds
///
/// # Example
///
/// ```rust
/// use std::hash::{Hash, Hasher};
/// use danmaku_core::utils::create_deterministic_hasher;
///
/// let mut a = create_deterministic_hasher();
/// let mut b = create_deterministic_hasher();
/// "same input".hash(&mut a);
/// "same input".hash(&mut b);
/// assert_eq!(a.finish(), b.finish());
/// ```
#[must_use]
pub fn create_deterministic_hasher() -> AHasher {
    RandomState::with_seeds(SEEDS.0, SEEDS.1, SEEDS.2, SEEDS.3).build_hasher()
}
