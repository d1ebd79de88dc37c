//! Pairwise collision avoidance.
//!
//! After an agent has moved, its record is compared with the records of
//! every other agent close enough to matter.  Two situations force a brake:
//!
//! - **Overrun**: the agent is faster than another one ahead of it on the
//!   same road ([`MovementRecord::overlap_imminent`]).
//! - **Crossing**: the two start→end lines intersect and the other agent is
//!   actually moving.
//!
//! Braking pulls the agent back to the point of its first window segment
//! halfway (by x) between its own start and the other agent's start, and
//! rewrites the record's ending location to match.
//!
//! Each candidate pair costs one index query plus a constant amount of
//! geometry, so a full pass is O(N²) with [`LinearScan`](crate::LinearScan)
//! and close to O(N log N) with [`RTreeIndex`](crate::RTreeIndex).

use isim_core::AgentId;
use isim_geom::Coord;
use isim_mobility::{Agent, MovementRecord};
use tracing::debug;

use crate::ProximityIndex;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BrakeCause {
    Overrun,
    Crossing,
}

/// A brake applied to `agent` because of `other`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Brake {
    pub agent: AgentId,
    pub other: AgentId,
    pub cause: BrakeCause,
    /// Where `agent` was pulled back to.
    pub at:    Coord,
}

/// Check `me` against every nearby agent and brake if needed.
///
/// `location` and `record` are `me`'s, detached from `agents` by the caller
/// so that they can be mutated while the other agents are read.  Candidates
/// are visited in address order; when several force a brake the last one
/// determines the final position, and every check sees the record as left
/// by the previous one.
///
/// Returns the last brake applied, if any.
pub fn avoid_collisions(
    me:       AgentId,
    location: &mut Coord,
    record:   &mut MovementRecord,
    agents:   &[Agent],
    index:    &dyn ProximityIndex,
    radius:   f64,
) -> Option<Brake> {
    let mut last = None;

    for other_id in index.within(*location, radius) {
        if other_id == me {
            continue;
        }
        let Some(other) = agents.get(other_id.index()) else {
            continue;
        };
        if location.distance(other.location) >= radius {
            continue;
        }
        let Some(theirs) = other.record() else {
            continue;
        };
        if !record.is_valid() || !theirs.is_valid() {
            continue;
        }

        let cause = if record.overlap_imminent(theirs) {
            BrakeCause::Overrun
        } else if crossing(record, theirs) {
            BrakeCause::Crossing
        } else {
            continue;
        };

        let first = record.window()[0];
        let at = first.project(record.starting.x + 0.5 * (theirs.starting.x - record.starting.x));
        *location = at;
        record.ending = Some(at);

        debug!(agent = %me, other = %other_id, ?cause, %at, "brake");
        last = Some(Brake { agent: me, other: other_id, cause, at });
    }

    last
}

fn crossing(mine: &MovementRecord, theirs: &MovementRecord) -> bool {
    match (mine.move_line(), theirs.move_line()) {
        (Some(a), Some(b)) => a.intersects(&b) && theirs.is_moving(),
        _ => false,
    }
}
