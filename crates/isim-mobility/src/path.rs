//! Routes: provider-supplied legs and the agent-side accumulator.

use isim_geom::{Coord, Segment};

/// One trip handed out by a [`PathProvider`](crate::PathProvider).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Leg {
    pub waypoints: Vec<Coord>,
    /// Travel speed for the whole leg, units per second.
    pub speed: f64,
}

impl Leg {
    pub fn new(waypoints: Vec<Coord>, speed: f64) -> Self {
        Self { waypoints, speed }
    }
}

/// The ordered coordinates of an agent's current route.
///
/// Consecutive coordinates form the road [`Segment`]s used by collision
/// prediction.  The accumulator is rebuilt every time a new leg starts.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    coords: Vec<Coord>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_coords(coords: Vec<Coord>) -> Self {
        Self { coords }
    }

    #[inline]
    pub fn coords(&self) -> &[Coord] {
        &self.coords
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    pub fn last(&self) -> Option<Coord> {
        self.coords.last().copied()
    }

    pub fn push(&mut self, c: Coord) {
        self.coords.push(c);
    }

    /// Number of road segments (`len − 1`, or 0).
    #[inline]
    pub fn segment_count(&self) -> usize {
        self.coords.len().saturating_sub(1)
    }

    /// Segment `i` (`coords[i] → coords[i + 1]`).
    pub fn segment(&self, i: usize) -> Option<Segment> {
        match (self.coords.get(i), self.coords.get(i + 1)) {
            (Some(&a), Some(&b)) => Some(Segment::new(a, b)),
            _ => None,
        }
    }

    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.coords.windows(2).map(|w| Segment::new(w[0], w[1]))
    }

    /// Replace the route with `waypoints`, keeping `previous_end` in front
    /// when the new leg does not already pass through it.
    pub fn start_leg(&mut self, previous_end: Option<Coord>, waypoints: &[Coord]) {
        self.coords.clear();
        if let Some(end) = previous_end {
            if !waypoints.contains(&end) {
                self.coords.push(end);
            }
        }
        self.coords.extend_from_slice(waypoints);
    }
}
