//! Simulation time model.
//!
//! # Design
//!
//! Time is a real-valued number of simulated seconds wrapped in [`SimTime`].
//! There is no process-wide clock: the world owns one [`SimClock`] and passes
//! `SimTime` values explicitly to everything that reads time (agents, event
//! sources, routers).  Two worlds in the same process therefore never share
//! state, and tests can drive a clock directly.
//!
//! The clock may start negative: a warm-up phase runs from `-warmup_secs` up
//! to zero before the measured part of the run begins.

use std::fmt;

use crate::{CoreError, CoreResult};

// ── SimTime ───────────────────────────────────────────────────────────────────

/// An absolute simulation time in seconds.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(pub f64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0.0);

    /// "No event pending" sentinel returned by exhausted event sources.
    pub const NEVER: SimTime = SimTime(f64::INFINITY);

    #[inline]
    pub fn secs(self) -> f64 {
        self.0
    }

    #[inline]
    pub fn is_never(self) -> bool {
        self.0 == f64::INFINITY
    }

    /// Whole seconds, rounded down.  Used to seed per-pass update-order
    /// shuffles so a run is reproducible from its clock alone.
    #[inline]
    pub fn whole_secs(self) -> i64 {
        self.0.floor() as i64
    }

    /// The later of two times.
    #[inline]
    pub fn max(self, other: SimTime) -> SimTime {
        if other.0 > self.0 { other } else { self }
    }
}

impl std::ops::Add<f64> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: f64) -> SimTime {
        SimTime(self.0 + rhs)
    }
}

impl std::ops::Sub for SimTime {
    type Output = f64;
    #[inline]
    fn sub(self, rhs: SimTime) -> f64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_never() {
            f.write_str("t=never")
        } else {
            write!(f, "t={:.3}s", self.0)
        }
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// The single writer of simulation time.
///
/// Time only moves forward: [`advance_to`](Self::advance_to) rejects any
/// request earlier than the current value.
#[derive(Clone, Debug)]
pub struct SimClock {
    now: SimTime,
}

impl SimClock {
    /// Create a clock reading `start`.
    pub fn new(start: SimTime) -> Self {
        Self { now: start }
    }

    #[inline]
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// Move the clock to `t`.
    ///
    /// # Errors
    /// [`CoreError::ClockRewind`] if `t` is earlier than the current time.
    pub fn advance_to(&mut self, t: SimTime) -> CoreResult<()> {
        if t.0 < self.now.0 || t.0.is_nan() {
            return Err(CoreError::ClockRewind { now: self.now, requested: t });
        }
        self.now = t;
        Ok(())
    }

    /// Move the clock forward by `dt` seconds.
    pub fn advance_by(&mut self, dt: f64) -> CoreResult<()> {
        self.advance_to(self.now + dt)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.now.fmt(f)
    }
}

// ── Update order ──────────────────────────────────────────────────────────────

/// How the seed of a randomized update pass is chosen.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SeedPolicy {
    /// Re-seed every pass from the clock's whole seconds.
    #[default]
    ClockSeeded,
    /// Seed once at construction; passes draw from one continuing stream.
    Fixed(u64),
}

/// Order in which agents are visited during an update pass.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum UpdateOrder {
    /// Ascending address order.
    Sequential,
    /// A fresh permutation of all agents per pass.
    Randomized(SeedPolicy),
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration, read once when the world is built.
///
/// Typically loaded from a JSON scenario file by the application crate.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Seconds simulated by one `World::tick`.  Must be positive.
    pub update_interval: f64,

    /// `World::run` stops once the clock reaches this time.
    pub end_time: f64,

    /// Seconds of movement-only warm-up run before time zero.
    pub warmup_secs: f64,

    /// Shuffle the update order every pass.  Default: `true`.
    pub randomize_update_order: bool,

    /// Seed source for shuffled passes.
    pub seed_policy: SeedPolicy,

    /// Whether routers are told to simulate connectivity.
    pub simulate_connections: bool,

    /// Turn connectivity simulation off after the first pass.  Default: `false`.
    pub simulate_connections_once: bool,

    /// Only agents closer than this are checked for collision risk.
    pub proximity_radius: f64,

    /// Optional cosmetic delay after each update pass, in milliseconds.
    /// Never affects simulated time or ordering.
    pub pacing_ms: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            update_interval:           1.0,
            end_time:                  60.0,
            warmup_secs:               0.0,
            randomize_update_order:    true,
            seed_policy:               SeedPolicy::ClockSeeded,
            simulate_connections:      true,
            simulate_connections_once: false,
            proximity_radius:          50.0,
            pacing_ms:                 None,
        }
    }
}

impl SimConfig {
    /// The configured update order.
    pub fn update_order(&self) -> UpdateOrder {
        if self.randomize_update_order {
            UpdateOrder::Randomized(self.seed_policy)
        } else {
            UpdateOrder::Sequential
        }
    }

    #[inline]
    pub fn end(&self) -> SimTime {
        SimTime(self.end_time)
    }

    /// Reject configurations the world cannot run.
    pub fn validate(&self) -> CoreResult<()> {
        if !(self.update_interval.is_finite() && self.update_interval > 0.0) {
            return Err(CoreError::Config(format!(
                "update_interval must be a positive number of seconds, got {}",
                self.update_interval
            )));
        }
        if !(self.warmup_secs.is_finite() && self.warmup_secs >= 0.0) {
            return Err(CoreError::Config(format!(
                "warmup_secs must be >= 0, got {}",
                self.warmup_secs
            )));
        }
        if self.proximity_radius.is_nan() || self.proximity_radius < 0.0 {
            return Err(CoreError::Config(format!(
                "proximity_radius must be >= 0, got {}",
                self.proximity_radius
            )));
        }
        Ok(())
    }
}
