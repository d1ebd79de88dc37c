//! The `Router` trait — the per-agent message-routing seam.
//!
//! The world calls [`Router::update`] once for every agent selected in an
//! update pass.  A router reads the world through [`RouterContext`] and
//! answers with [`RouterIntent`]s, which the world applies sequentially
//! right after the call.  Message buffers, TTLs and delivery live entirely
//! behind this trait.

use isim_core::{AgentId, SimTime};
use isim_mobility::Agent;
use isim_spatial::{Direction, NeighborSet};
use tracing::debug;

/// Read-only view of the world passed to every router call.
pub struct RouterContext<'a> {
    pub now:       SimTime,
    pub direction: Direction,
    pub agents:    &'a [Agent],
    pub neighbors: &'a NeighborSet,
    pub hub:       Option<AgentId>,
}

/// Something a router asks the world to do.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RouterIntent {
    /// Give right of way to the other direction.
    SwitchDirection,
    /// Run an extra update pass at the given time.  Times not after the
    /// current clock are ignored.
    ScheduleUpdate(SimTime),
}

pub trait Router: Send {
    fn update(
        &mut self,
        agent:                AgentId,
        ctx:                  &RouterContext<'_>,
        simulate_connections: bool,
    ) -> Vec<RouterIntent>;
}

/// Never asks for anything.
pub struct NoopRouter;

impl Router for NoopRouter {
    fn update(&mut self, _: AgentId, _: &RouterContext<'_>, _: bool) -> Vec<RouterIntent> {
        vec![]
    }
}

/// Traffic-light controller run by the hub.
///
/// Every `phase_secs` the hub switches the direction with right of way and
/// asks for an update pass at the next switch so the change is picked up
/// exactly on time.
#[derive(Clone, Debug)]
pub struct SignalRouter {
    phase_secs:  f64,
    next_switch: Option<SimTime>,
    switches:    u64,
}

impl SignalRouter {
    pub fn new(phase_secs: f64) -> Self {
        Self { phase_secs, next_switch: None, switches: 0 }
    }

    /// Number of direction changes requested so far.
    pub fn switches(&self) -> u64 {
        self.switches
    }
}

impl Router for SignalRouter {
    fn update(
        &mut self,
        agent: AgentId,
        ctx:   &RouterContext<'_>,
        _simulate_connections: bool,
    ) -> Vec<RouterIntent> {
        if Some(agent) != ctx.hub {
            return vec![];
        }
        match self.next_switch {
            None => {
                let next = ctx.now + self.phase_secs;
                self.next_switch = Some(next);
                vec![RouterIntent::ScheduleUpdate(next)]
            }
            Some(due) if ctx.now >= due => {
                let next = ctx.now + self.phase_secs;
                self.next_switch = Some(next);
                self.switches += 1;
                debug!(now = %ctx.now, from = ?ctx.direction, "signal switch");
                vec![RouterIntent::SwitchDirection, RouterIntent::ScheduleUpdate(next)]
            }
            Some(_) => vec![],
        }
    }
}
