//! Plain data rows written by output backends.

use isim_core::SimTime;
use isim_mobility::Agent;

/// One agent's position at the end of a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentPositionRow {
    pub agent_id:    u32,
    pub time:        f64,
    pub kind:        &'static str,
    pub x:           f64,
    pub y:           f64,
    pub active:      bool,
    /// The last movement record changed the agent's position.
    pub moving:      bool,
    /// Pending waypoint, if any.
    pub destination: Option<(f64, f64)>,
}

impl AgentPositionRow {
    pub fn from_agent(now: SimTime, agent: &Agent) -> Self {
        Self {
            agent_id:    agent.id.0,
            time:        now.secs(),
            kind:        agent.kind.as_str(),
            x:           agent.location.x,
            y:           agent.location.y,
            active:      agent.active,
            moving:      agent.record().is_some_and(|r| r.is_moving()),
            destination: agent.destination().coord().map(|c| (c.x, c.y)),
        }
    }
}

/// Per-tick counters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSummaryRow {
    pub time:          f64,
    pub active_agents: u64,
    pub moving_agents: u64,
    /// Merged events drained during the tick, scheduled updates included.
    pub events:        u64,
    pub brakes:        u64,
}
