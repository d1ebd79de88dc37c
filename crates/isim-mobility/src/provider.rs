//! `PathProvider` — the movement-model seam.
//!
//! Every agent owns one boxed provider.  The agent pulls legs from it on
//! demand and never looks at its internals, so scripted routes, random
//! walks or map-matched trips are interchangeable.
//!
//! Providers are `Send` so that agents can be moved in parallel under the
//! `parallel` feature of `isim-sim`.

use std::collections::VecDeque;

use isim_core::SimTime;
use isim_geom::Coord;

use crate::Leg;

pub trait PathProvider: Send {
    /// Where the agent is placed when the world is built.
    fn initial_location(&mut self) -> Coord;

    /// The next trip, or `None` if there is nothing to do right now.
    fn next_leg(&mut self, now: SimTime) -> Option<Leg>;

    /// Earliest time the agent may try to move again after finishing a leg
    /// (or failing to get one) at `now`.
    fn next_eligible_time(&mut self, now: SimTime) -> SimTime;

    /// Whether movement is enabled at all at `now`.  Default: always.
    fn is_active(&self, _now: SimTime) -> bool {
        true
    }
}

// ── WaypointProvider ──────────────────────────────────────────────────────────

/// Hands out a fixed list of legs in order, pausing between them.
#[derive(Clone, Debug)]
pub struct WaypointProvider {
    start:      Coord,
    legs:       VecDeque<Leg>,
    pause_secs: f64,
    active:     Option<(SimTime, SimTime)>,
}

impl WaypointProvider {
    pub fn new(start: Coord) -> Self {
        Self { start, legs: VecDeque::new(), pause_secs: 0.0, active: None }
    }

    /// A single leg starting at its first waypoint.
    pub fn single(waypoints: Vec<Coord>, speed: f64) -> Self {
        let start = waypoints.first().copied().unwrap_or_default();
        Self::new(start).with_leg(Leg::new(waypoints, speed))
    }

    pub fn with_leg(mut self, leg: Leg) -> Self {
        self.legs.push_back(leg);
        self
    }

    /// Wait this long after each leg before the next one may start.
    pub fn with_pause(mut self, secs: f64) -> Self {
        self.pause_secs = secs;
        self
    }

    /// Only move while `from <= now < until`.
    pub fn with_active_window(mut self, from: SimTime, until: SimTime) -> Self {
        self.active = Some((from, until));
        self
    }

    /// Queue another leg behind the remaining ones.
    pub fn push_leg(&mut self, leg: Leg) {
        self.legs.push_back(leg);
    }
}

impl PathProvider for WaypointProvider {
    fn initial_location(&mut self) -> Coord {
        self.start
    }

    fn next_leg(&mut self, _now: SimTime) -> Option<Leg> {
        self.legs.pop_front()
    }

    fn next_eligible_time(&mut self, now: SimTime) -> SimTime {
        now + self.pause_secs
    }

    fn is_active(&self, now: SimTime) -> bool {
        match self.active {
            Some((from, until)) => now >= from && now < until,
            None => true,
        }
    }
}

// ── StationaryProvider ────────────────────────────────────────────────────────

/// Never moves.  Used for the intersection hub and parked agents.
#[derive(Copy, Clone, Debug)]
pub struct StationaryProvider {
    location: Coord,
}

impl StationaryProvider {
    pub fn new(location: Coord) -> Self {
        Self { location }
    }
}

impl PathProvider for StationaryProvider {
    fn initial_location(&mut self) -> Coord {
        self.location
    }

    fn next_leg(&mut self, _now: SimTime) -> Option<Leg> {
        None
    }

    fn next_eligible_time(&mut self, _now: SimTime) -> SimTime {
        SimTime::NEVER
    }

    fn is_active(&self, _now: SimTime) -> bool {
        false
    }
}
