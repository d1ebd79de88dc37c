//! Movement records and overrun prediction.
//!
//! A [`MovementRecord`] is the per-tick snapshot an agent publishes after
//! moving: where it started, where it ended, how fast it went, and which
//! road segments of its route it was on (the *active window*).  Collision
//! checks compare two records without touching either agent.

use std::fmt;

use isim_core::AgentId;
use isim_geom::{Coord, Segment};

use crate::Path;

#[derive(Clone, Debug, PartialEq)]
pub struct MovementRecord {
    pub owner:    AgentId,
    pub starting: Coord,
    /// Filled in once kinematics for the tick are done.
    pub ending:   Option<Coord>,
    pub speed:    f64,
    /// Length of the interval the record covers, seconds.
    pub interval: f64,
    /// Snapshot of the owner's route.
    pub path:     Path,
    window:       Vec<Segment>,
}

impl MovementRecord {
    pub fn new(owner: AgentId, starting: Coord, interval: f64, path: Path) -> Self {
        Self {
            owner,
            starting,
            ending: None,
            speed: 0.0,
            interval,
            path,
            window: Vec::new(),
        }
    }

    /// The road segments this tick's movement touches.  Empty when the
    /// starting location lies on no segment of the route.
    #[inline]
    pub fn window(&self) -> &[Segment] {
        &self.window
    }

    /// Both locations known and at least one active segment.
    pub fn is_valid(&self) -> bool {
        self.ending.is_some() && !self.window.is_empty()
    }

    /// Whether the owner actually changed position.
    pub fn is_moving(&self) -> bool {
        self.ending.is_some_and(|e| e != self.starting)
    }

    /// Straight line from the starting to the ending location.
    pub fn move_line(&self) -> Option<Segment> {
        self.ending.map(|e| Segment::new(self.starting, e))
    }

    /// Rebuild the active window from the route snapshot.
    ///
    /// The window is the first route segment whose line contains the
    /// starting location.  It stops at that segment's far boundary, so a
    /// corner reached during the tick does not widen it.
    pub fn calculate_active_window(&mut self) {
        self.window.clear();
        let first = self.path.segments().position(|s| s.contains(self.starting));
        if let Some(seg) = first.and_then(|i| self.path.segment(i)) {
            self.window.push(seg);
        }
    }

    /// `true` if this record's owner is faster than `other`'s and is about
    /// to run over it on a shared road.
    pub fn overlap_imminent(&self, other: &MovementRecord) -> bool {
        let (Some(ending), Some(&first), Some(&last), Some(&other_first)) =
            (self.ending, self.window.first(), self.window.last(), other.window.first())
        else {
            return false;
        };
        if self.speed <= other.speed {
            return false;
        }

        let target = other.starting;
        let idx = if Segment::new(self.starting, first.end()).contains(target) {
            Some(0)
        } else if Segment::new(last.begin(), ending).contains(target) {
            Some(self.window.len() - 1)
        } else {
            (1..self.window.len().saturating_sub(1)).find(|&i| self.window[i].contains(target))
        };

        idx.is_some_and(|i| {
            let seg = self.window[i];
            seg.begin() == other_first.begin() || seg.end() == other_first.end()
        })
    }
}

impl fmt::Display for MovementRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} -> ", self.owner, self.starting)?;
        match self.ending {
            Some(e) => write!(f, "{e}")?,
            None => f.write_str("?")?,
        }
        write!(f, " @ {:.2} over {} segment(s)", self.speed, self.window.len())
    }
}
