//! `EventSource` and the generic `TimedQueue` implementation.

use std::collections::{BTreeMap, VecDeque};

use isim_core::SimTime;
use ordered_float::NotNan;

use crate::error::checked_time;
use crate::EventResult;

/// A time-ordered stream of events of type `E`.
pub trait EventSource<E>: Send {
    /// Time of the next pending event, or [`SimTime::NEVER`] when exhausted.
    fn next_event_time(&self) -> SimTime;

    /// Remove and return the next pending event.
    fn pop_next(&mut self) -> Option<E>;
}

/// In-memory event queue.  Events at equal times come out in insertion order.
pub struct TimedQueue<E> {
    inner: BTreeMap<NotNan<f64>, VecDeque<E>>,
    total: usize,
}

impl<E> Default for TimedQueue<E> {
    fn default() -> Self {
        Self { inner: BTreeMap::new(), total: 0 }
    }
}

impl<E> TimedQueue<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue `event` at `at`.
    ///
    /// # Errors
    /// [`EventError::InvalidTime`](crate::EventError::InvalidTime) for NaN or
    /// infinite times.
    pub fn push(&mut self, at: SimTime, event: E) -> EventResult<()> {
        let key = checked_time(at.secs())?;
        self.inner.entry(key).or_default().push_back(event);
        self.total += 1;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

impl<E: Send> EventSource<E> for TimedQueue<E> {
    fn next_event_time(&self) -> SimTime {
        self.inner
            .keys()
            .next()
            .map_or(SimTime::NEVER, |t| SimTime(t.into_inner()))
    }

    fn pop_next(&mut self) -> Option<E> {
        let mut entry = self.inner.first_entry()?;
        let event = entry.get_mut().pop_front();
        if entry.get().is_empty() {
            entry.remove();
        }
        if event.is_some() {
            self.total -= 1;
        }
        event
    }
}
