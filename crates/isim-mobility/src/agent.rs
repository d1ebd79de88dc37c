//! `Agent` — one mobile (or stationary) participant and its kinematics.

use std::collections::VecDeque;
use std::fmt;

use isim_core::{AgentId, AgentKind, SimTime};
use isim_geom::{Coord, Segment};
use tracing::trace;

use crate::{MobilityError, MobilityResult, MovementRecord, Path, PathProvider};

/// The waypoint an agent is heading for.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Destination {
    Pending(Coord),
    None,
}

impl Destination {
    pub fn coord(self) -> Option<Coord> {
        match self {
            Destination::Pending(c) => Some(c),
            Destination::None => None,
        }
    }
}

/// What [`Agent::move_for`] did this tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Not allowed to move; the previous record was kept.
    Held,
    /// No waypoint available; the new record has no ending location.
    Waiting,
    /// Started the tick on its final waypoint and stayed there.
    Parked,
    /// Moved (possibly zero distance) and published a complete record.
    Moved,
}

/// A radio interface as seen by the connectivity layer.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NetInterface {
    pub id:    String,
    /// Transmit range, simulation units.
    pub range: f64,
}

impl NetInterface {
    pub fn new(id: impl Into<String>, range: f64) -> Self {
        Self { id: id.into(), range }
    }
}

/// Waypoints left on the leg being travelled.
struct ActiveLeg {
    remaining: VecDeque<Coord>,
    speed:     f64,
}

pub struct Agent {
    pub id:       AgentId,
    pub kind:     AgentKind,
    pub location: Coord,
    /// Radio/participation flag.  Inactive agents neither move nor update.
    pub active:   bool,

    destination:       Destination,
    speed:             f64,
    next_time_to_move: SimTime,
    path:              Path,
    leg:               Option<ActiveLeg>,
    leg_end:           Option<Coord>,
    record:            Option<MovementRecord>,
    interfaces:        Vec<NetInterface>,
    provider:          Box<dyn PathProvider>,
}

impl Agent {
    /// Place a new agent at its provider's initial location.
    pub fn new(id: AgentId, kind: AgentKind, mut provider: Box<dyn PathProvider>) -> Self {
        let location = provider.initial_location();
        Self {
            id,
            kind,
            location,
            active:            true,
            destination:       Destination::None,
            speed:             0.0,
            next_time_to_move: SimTime(f64::NEG_INFINITY),
            path:              Path::new(),
            leg:               None,
            leg_end:           None,
            record:            None,
            interfaces:        Vec::new(),
            provider,
        }
    }

    pub fn with_interface(mut self, iface: NetInterface) -> Self {
        self.interfaces.push(iface);
        self
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn destination(&self) -> Destination {
        self.destination
    }

    #[inline]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    #[inline]
    pub fn next_time_to_move(&self) -> SimTime {
        self.next_time_to_move
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[inline]
    pub fn record(&self) -> Option<&MovementRecord> {
        self.record.as_ref()
    }

    /// Detach the current record.  The orchestrator uses this to mutate one
    /// agent's record while reading everyone else's.
    pub fn take_record(&mut self) -> Option<MovementRecord> {
        self.record.take()
    }

    pub fn set_record(&mut self, record: Option<MovementRecord>) {
        self.record = record;
    }

    pub fn interfaces(&self) -> &[NetInterface] {
        &self.interfaces
    }

    /// Look an interface up by id.
    pub fn interface(&self, id: &str) -> MobilityResult<&NetInterface> {
        self.interfaces
            .iter()
            .find(|i| i.id == id)
            .ok_or_else(|| MobilityError::UnknownInterface { agent: self.id, id: id.to_owned() })
    }

    // ── Kinematics ────────────────────────────────────────────────────────

    /// Move along the current route for `dt` seconds of simulated time.
    ///
    /// # Errors
    /// [`MobilityError::InvalidSpeed`] if the provider hands out a leg with a
    /// negative or non-finite speed.
    pub fn move_for(&mut self, dt: f64, now: SimTime) -> MobilityResult<MoveOutcome> {
        let mut record = MovementRecord::new(self.id, self.location, dt, self.path.clone());

        if !self.provider.is_active(now) || now < self.next_time_to_move || !self.active {
            return Ok(MoveOutcome::Held);
        }

        let mut dest = match self.destination {
            Destination::Pending(d) => d,
            Destination::None => match self.next_waypoint(&mut record, now)? {
                Some(d) => d,
                None => {
                    self.record = Some(record);
                    return Ok(MoveOutcome::Waiting);
                }
            },
        };

        let mut budget = dt * self.speed;
        let mut distance = self.location.distance(dest);
        let mut exhausted = false;

        while budget >= distance {
            self.location = dest;
            budget -= distance;
            match self.next_waypoint(&mut record, now)? {
                Some(next) => {
                    dest = next;
                    distance = self.location.distance(dest);
                }
                None if record.starting == dest => {
                    self.record = Some(record);
                    return Ok(MoveOutcome::Parked);
                }
                None => {
                    exhausted = true;
                    break;
                }
            }
        }

        if !exhausted && dest != self.location {
            let dx = budget / distance * (dest.x - self.location.x);
            let dy = budget / distance * (dest.y - self.location.y);
            if self.location.x == dest.x {
                self.location.translate(dx, dy);
            } else {
                self.location = Segment::new(self.location, dest).project(self.location.x + dx);
            }
        }

        record.ending = Some(self.location);
        record.speed = self.speed;
        record.calculate_active_window();
        trace!(agent = %self.id, record = %record, "moved");
        self.record = Some(record);
        Ok(MoveOutcome::Moved)
    }

    /// Advance to the next waypoint, pulling a new leg from the provider
    /// when the current one is used up.
    fn next_waypoint(
        &mut self,
        record: &mut MovementRecord,
        now:    SimTime,
    ) -> MobilityResult<Option<Coord>> {
        if self.leg.is_none() {
            if let Some(leg) = self.provider.next_leg(now) {
                if !(leg.speed.is_finite() && leg.speed >= 0.0) {
                    return Err(MobilityError::InvalidSpeed(self.id, leg.speed));
                }
                if !leg.waypoints.is_empty() {
                    self.path.start_leg(self.leg_end, &leg.waypoints);
                    record.path = self.path.clone();
                    self.leg_end = self.path.last();
                }
                self.leg = Some(ActiveLeg { remaining: leg.waypoints.into(), speed: leg.speed });
            }
        }

        let next = self
            .leg
            .as_mut()
            .and_then(|leg| leg.remaining.pop_front().map(|wp| (wp, leg.speed)));

        match next {
            Some((wp, speed)) => {
                self.destination = Destination::Pending(wp);
                self.speed = speed;
                Ok(Some(wp))
            }
            None => {
                self.next_time_to_move = self.provider.next_eligible_time(now);
                self.leg = None;
                self.destination = Destination::None;
                Ok(None)
            }
        }
    }
}

impl fmt::Debug for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Agent")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("location", &self.location)
            .field("active", &self.active)
            .field("destination", &self.destination)
            .field("speed", &self.speed)
            .finish_non_exhaustive()
    }
}
