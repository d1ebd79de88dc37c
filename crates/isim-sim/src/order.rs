//! Update-pass ordering.

use isim_core::{SeedPolicy, SimRng, SimTime, UpdateOrder};

/// Produces the visiting order for each update pass.
pub struct PassOrder {
    order: UpdateOrder,
    /// Long-lived stream for `SeedPolicy::Fixed`.
    fixed: Option<SimRng>,
}

impl PassOrder {
    pub fn new(order: UpdateOrder) -> Self {
        let fixed = match order {
            UpdateOrder::Randomized(SeedPolicy::Fixed(seed)) => Some(SimRng::new(seed)),
            _ => None,
        };
        Self { order, fixed }
    }

    #[inline]
    pub fn order(&self) -> UpdateOrder {
        self.order
    }

    /// Agent indices `0..count` in the order to visit them at `now`.
    ///
    /// Randomized orders are a single shuffle of every index.
    pub fn next(&mut self, now: SimTime, count: usize) -> Vec<usize> {
        let mut idx: Vec<usize> = (0..count).collect();
        match self.order {
            UpdateOrder::Sequential => {}
            UpdateOrder::Randomized(SeedPolicy::ClockSeeded) => {
                SimRng::for_clock(now.whole_secs()).shuffle(&mut idx);
            }
            UpdateOrder::Randomized(SeedPolicy::Fixed(_)) => {
                if let Some(rng) = self.fixed.as_mut() {
                    rng.shuffle(&mut idx);
                }
            }
        }
        idx
    }
}
