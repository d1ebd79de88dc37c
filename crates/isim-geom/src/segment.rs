//! Straight road segment.
//!
//! A `Segment` caches the slope and intercept of its supporting line; both
//! are recomputed whenever an endpoint changes.  For a vertical segment the
//! slope is infinite (NaN when the segment has zero length) and every
//! operation that would divide by the x-span takes an explicit vertical
//! branch instead.

use std::cmp::Ordering;
use std::fmt;

use crate::Coord;

/// Tolerance for "point is on the line".
pub const EPSILON: f64 = 0.05;

/// A directed straight segment `begin → end`.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "SegmentEnds", into = "SegmentEnds"))]
pub struct Segment {
    begin:     Coord,
    end:       Coord,
    slope:     f64,
    intercept: f64,
}

impl Segment {
    pub fn new(begin: Coord, end: Coord) -> Self {
        let mut seg = Self { begin, end, slope: 0.0, intercept: 0.0 };
        seg.recompute();
        seg
    }

    fn recompute(&mut self) {
        self.slope = (self.end.y - self.begin.y) / (self.end.x - self.begin.x);
        self.intercept = self.begin.y - self.slope * self.begin.x;
    }

    #[inline]
    pub fn begin(&self) -> Coord {
        self.begin
    }

    #[inline]
    pub fn end(&self) -> Coord {
        self.end
    }

    pub fn set_begin(&mut self, begin: Coord) {
        self.begin = begin;
        self.recompute();
    }

    pub fn set_end(&mut self, end: Coord) {
        self.end = end;
        self.recompute();
    }

    /// Rise over run.  Not finite for vertical segments.
    #[inline]
    pub fn slope(&self) -> f64 {
        self.slope
    }

    /// y-intercept of the supporting line.  Not finite for vertical segments.
    #[inline]
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Zero x-span.
    #[inline]
    pub fn is_vertical(&self) -> bool {
        self.begin.x == self.end.x
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.begin.distance(self.end)
    }

    /// `true` if `p` lies within [`EPSILON`] of the **infinite** line through
    /// this segment.  The segment's bounds are not checked.
    pub fn contains(&self, p: Coord) -> bool {
        if self.begin == self.end {
            return self.begin.distance(p) < EPSILON;
        }
        if self.is_vertical() {
            return (p.x - self.begin.x).abs() < EPSILON;
        }
        (self.slope * p.x + self.intercept - p.y).abs() < EPSILON
    }

    /// The point of this segment at abscissa `x`.
    ///
    /// An `x` left of the segment returns the left endpoint, an `x` right of
    /// it the right endpoint.  A vertical segment has no unique point for a
    /// given `x` and always returns `begin`.
    pub fn project(&self, x: f64) -> Coord {
        if self.is_vertical() {
            return self.begin;
        }
        let (left, right) =
            if self.begin.x < self.end.x { (self.begin, self.end) } else { (self.end, self.begin) };
        if x <= left.x {
            left
        } else if x >= right.x {
            right
        } else {
            Coord::new(x, self.slope * x + self.intercept)
        }
    }

    /// Bounded segment intersection.  Touching endpoints and collinear
    /// overlap both count.
    pub fn intersects(&self, other: &Segment) -> bool {
        let (p1, p2, q1, q2) = (self.begin, self.end, other.begin, other.end);
        let d1 = orientation(q1, q2, p1);
        let d2 = orientation(q1, q2, p2);
        let d3 = orientation(p1, p2, q1);
        let d4 = orientation(p1, p2, q2);

        if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
            && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
        {
            return true;
        }

        (d1 == 0.0 && within_box(q1, q2, p1))
            || (d2 == 0.0 && within_box(q1, q2, p2))
            || (d3 == 0.0 && within_box(p1, p2, q1))
            || (d4 == 0.0 && within_box(p1, p2, q2))
    }

    /// `true` if `p` lies inside the axis-aligned box spanned by the
    /// endpoints (inclusive).
    pub fn in_bounding_box(&self, p: Coord) -> bool {
        within_box(self.begin, self.end, p)
    }
}

/// Cross product of `(b − a) × (c − a)`; sign gives turn direction.
#[inline]
fn orientation(a: Coord, b: Coord, c: Coord) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

#[inline]
fn within_box(a: Coord, b: Coord, p: Coord) -> bool {
    p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}

/// Two segments are equal when their endpoints are; the derived fields are
/// NaN for a zero-length segment and must not take part.
impl PartialEq for Segment {
    fn eq(&self, other: &Self) -> bool {
        self.begin == other.begin && self.end == other.end
    }
}

/// Ordered by `begin`, then `end`.
impl PartialOrd for Segment {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.begin.partial_cmp(&other.begin)? {
            Ordering::Equal => self.end.partial_cmp(&other.end),
            ord => Some(ord),
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.begin, self.end)
    }
}

// ── serde shim ────────────────────────────────────────────────────────────────

/// Wire form of a segment: endpoints only, derived fields rebuilt on load.
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct SegmentEnds {
    begin: Coord,
    end:   Coord,
}

#[cfg(feature = "serde")]
impl From<SegmentEnds> for Segment {
    fn from(w: SegmentEnds) -> Self {
        Segment::new(w.begin, w.end)
    }
}

#[cfg(feature = "serde")]
impl From<Segment> for SegmentEnds {
    fn from(s: Segment) -> Self {
        SegmentEnds { begin: s.begin, end: s.end }
    }
}
