//! Deterministic RNG wrapper for update-order shuffles.
//!
//! # Determinism strategy
//!
//! The world shuffles its update order with a [`SimRng`].  Under
//! [`SeedPolicy::ClockSeeded`](crate::SeedPolicy::ClockSeeded) a fresh RNG is
//! built every pass from the clock's whole seconds, so the order at a given
//! time depends only on that time.  Under `Fixed(seed)` one RNG lives for the
//! whole run.  Either way the same configuration always produces identical
//! results.

use rand::rngs::SmallRng;
use rand::SeedableRng;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Simulation-level RNG.
///
/// Used only from the single-threaded orchestrator.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// RNG for a pass starting at `whole_secs` of simulated time.
    ///
    /// Negative (warm-up) times map to distinct seeds as well.
    pub fn for_clock(whole_secs: i64) -> Self {
        SimRng::new((whole_secs as u64).wrapping_mul(MIXING_CONSTANT))
    }

    /// Shuffle a mutable slice in-place (Fisher-Yates).
    #[inline]
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.0);
    }
}
