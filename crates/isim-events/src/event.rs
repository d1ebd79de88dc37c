//! Scenario events applied by the world.

use std::fmt;

use isim_core::{AgentId, SimTime};
use isim_geom::Coord;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum ScenarioEvent {
    /// Give right of way to the other traffic direction.
    SwitchDirection,
    /// Turn an agent's participation on or off.
    SetActive { agent: AgentId, active: bool },
    /// Teleport an agent.
    SetLocation { agent: AgentId, at: Coord },
    /// Request an extra update pass at `at`.
    ScheduleUpdate { at: SimTime },
}

impl fmt::Display for ScenarioEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScenarioEvent::SwitchDirection => f.write_str("switch_direction"),
            ScenarioEvent::SetActive { agent, active } => write!(f, "set_active({agent}, {active})"),
            ScenarioEvent::SetLocation { agent, at } => write!(f, "set_location({agent}, {at})"),
            ScenarioEvent::ScheduleUpdate { at } => write!(f, "schedule_update({at})"),
        }
    }
}
