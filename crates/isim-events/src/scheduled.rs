//! Forced "update every agent" requests.

use std::collections::BTreeSet;

use isim_core::SimTime;
use ordered_float::NotNan;

use crate::error::checked_time;
use crate::{EventResult, EventSource};

/// Queue of times at which the world must run an extra update pass.
///
/// Requesting the same time twice yields a single pass.
#[derive(Default, Debug)]
pub struct ScheduledUpdates {
    times: BTreeSet<NotNan<f64>>,
}

impl ScheduledUpdates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, at: SimTime) -> EventResult<()> {
        self.times.insert(checked_time(at.secs())?);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}

impl EventSource<SimTime> for ScheduledUpdates {
    fn next_event_time(&self) -> SimTime {
        self.times.first().map_or(SimTime::NEVER, |t| SimTime(t.into_inner()))
    }

    fn pop_next(&mut self) -> Option<SimTime> {
        self.times.pop_first().map(|t| SimTime(t.into_inner()))
    }
}
