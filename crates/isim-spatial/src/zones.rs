//! Neighbour zones around the intersection.
//!
//! Only agents inside the zone of the currently active traffic direction
//! take part in an update pass.  The hub toggles the direction.

use isim_core::AgentId;
use isim_geom::{Coord, Rect};
use isim_mobility::Agent;

/// Set of agent addresses selected for an update pass.
#[cfg(feature = "fx-hash")]
pub type NeighborSet = rustc_hash::FxHashSet<AgentId>;
#[cfg(not(feature = "fx-hash"))]
pub type NeighborSet = std::collections::HashSet<AgentId>;

/// Traffic direction currently given right of way.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Direction {
    #[default]
    NorthSouth,
    EastWest,
}

impl Direction {
    pub fn toggled(self) -> Direction {
        match self {
            Direction::NorthSouth => Direction::EastWest,
            Direction::EastWest => Direction::NorthSouth,
        }
    }
}

/// The two approach rectangles of a four-way intersection.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Zones {
    pub north_south: Rect,
    pub east_west:   Rect,
}

impl Zones {
    pub fn new(north_south: Rect, east_west: Rect) -> Self {
        Self { north_south, east_west }
    }

    /// Approach lanes of the reference intersection map.
    pub fn reference_intersection() -> Self {
        Self {
            north_south: Rect::new(Coord::new(164.0, 0.0), Coord::new(169.0, 119.0)),
            east_west:   Rect::new(Coord::new(95.0, 65.0), Coord::new(297.0, 72.0)),
        }
    }

    #[inline]
    pub fn active(&self, direction: Direction) -> Rect {
        match direction {
            Direction::NorthSouth => self.north_south,
            Direction::EastWest => self.east_west,
        }
    }
}

/// Agents taking part in the next update pass.
///
/// With zones, those inside the active rectangle; without, every agent.
/// The hub is never included.
pub fn select_neighbors(
    agents:    &[Agent],
    zones:     Option<&Zones>,
    direction: Direction,
    hub:       Option<AgentId>,
) -> NeighborSet {
    let area = zones.map(|z| z.active(direction));
    agents
        .iter()
        .filter(|a| Some(a.id) != hub)
        .filter(|a| area.is_none_or(|r| r.contains(a.location)))
        .map(|a| a.id)
        .collect()
}
