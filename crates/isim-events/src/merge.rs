//! `EventMerge` — one next-due-event view over many sources.

use isim_core::SimTime;

use crate::{EventResult, EventSource, ScheduledUpdates};

/// What the merge handed out.
#[derive(Clone, Debug, PartialEq)]
pub enum Merged<E> {
    /// A forced update pass requested via [`EventMerge::schedule_update`].
    ScheduledUpdate,
    External(E),
}

/// Which queue holds the next event.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Slot {
    Scheduled,
    /// Index in registration order.
    Source(usize),
}

/// Scheduled-update queue plus registered external sources.
///
/// The selection is recomputed on every call, so events pushed into a
/// source between calls are always seen.
pub struct EventMerge<E> {
    scheduled: ScheduledUpdates,
    sources:   Vec<Box<dyn EventSource<E>>>,
}

impl<E> Default for EventMerge<E> {
    fn default() -> Self {
        Self { scheduled: ScheduledUpdates::new(), sources: Vec::new() }
    }
}

impl<E> EventMerge<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a source.  Earlier registrations win ties.
    pub fn register(&mut self, source: Box<dyn EventSource<E>>) {
        self.sources.push(source);
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// Request an extra update pass at `at`.
    pub fn schedule_update(&mut self, at: SimTime) -> EventResult<()> {
        self.scheduled.schedule(at)
    }

    pub fn scheduled(&self) -> &ScheduledUpdates {
        &self.scheduled
    }

    /// The queue that would be popped next and its due time.  `None` when
    /// every queue is exhausted.
    pub fn peek(&self) -> Option<(Slot, SimTime)> {
        let mut best = Slot::Scheduled;
        let mut best_time = self.scheduled.next_event_time();
        for (i, source) in self.sources.iter().enumerate() {
            let t = source.next_event_time();
            if t < best_time {
                best = Slot::Source(i);
                best_time = t;
            }
        }
        (!best_time.is_never()).then_some((best, best_time))
    }

    /// Time of the earliest pending event across all sources.
    pub fn next_event_time(&self) -> SimTime {
        self.peek().map_or(SimTime::NEVER, |(_, t)| t)
    }

    /// Remove and return the earliest pending event.
    pub fn pop_next(&mut self) -> Option<(SimTime, Merged<E>)> {
        let (slot, t) = self.peek()?;
        match slot {
            Slot::Scheduled => self.scheduled.pop_next().map(|_| (t, Merged::ScheduledUpdate)),
            Slot::Source(i) => self.sources[i].pop_next().map(|e| (t, Merged::External(e))),
        }
    }
}
