//! Simulation observer trait for progress reporting and data collection.

use isim_core::SimTime;
use isim_events::{Merged, ScenarioEvent};
use isim_mobility::Agent;
use isim_spatial::Brake;

/// Callbacks invoked by [`World`](crate::World) at key points of a tick.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — brake counter
///
/// ```rust,ignore
/// struct BrakeCounter(usize);
///
/// impl SimObserver for BrakeCounter {
///     fn on_brake(&mut self, _now: SimTime, _brake: &Brake) {
///         self.0 += 1;
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _now: SimTime) {}

    /// Called for every event drained from the merge, before it is applied.
    fn on_event(&mut self, _at: SimTime, _event: &Merged<ScenarioEvent>) {}

    /// Called when collision avoidance pulls an agent back.
    fn on_brake(&mut self, _now: SimTime, _brake: &Brake) {}

    /// Called once per tick after the final update pass, with read-only
    /// access to every agent.
    fn on_tick_end(&mut self, _now: SimTime, _agents: &[Agent]) {}

    /// Called once after the run loop stops.
    fn on_sim_end(&mut self, _now: SimTime) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

/// Fans every callback out to several observers, in insertion order.
#[derive(Default)]
pub struct ObserverList<'a> {
    observers: Vec<&'a mut dyn SimObserver>,
}

impl<'a> ObserverList<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, observer: &'a mut dyn SimObserver) -> Self {
        self.observers.push(observer);
        self
    }
}

impl SimObserver for ObserverList<'_> {
    fn on_tick_start(&mut self, now: SimTime) {
        for o in &mut self.observers {
            o.on_tick_start(now);
        }
    }

    fn on_event(&mut self, at: SimTime, event: &Merged<ScenarioEvent>) {
        for o in &mut self.observers {
            o.on_event(at, event);
        }
    }

    fn on_brake(&mut self, now: SimTime, brake: &Brake) {
        for o in &mut self.observers {
            o.on_brake(now, brake);
        }
    }

    fn on_tick_end(&mut self, now: SimTime, agents: &[Agent]) {
        for o in &mut self.observers {
            o.on_tick_end(now, agents);
        }
    }

    fn on_sim_end(&mut self, now: SimTime) {
        for o in &mut self.observers {
            o.on_sim_end(now);
        }
    }
}
