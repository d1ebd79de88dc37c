//! The `World` struct and its tick loop.

use std::time::Duration;

use isim_core::{AgentId, SimClock, SimConfig, SimTime};
use isim_events::{EventMerge, Merged, ScenarioEvent};
use isim_mobility::{Agent, NetInterface};
use isim_spatial::{
    avoid_collisions, select_neighbors, Direction, NeighborSet, ProximityBackend, ProximityIndex,
    Zones,
};
use tracing::{debug, info, trace, warn};

use crate::order::PassOrder;
use crate::{CancelHandle, Router, RouterContext, RouterIntent, SimError, SimObserver, SimResult};

/// The simulation world: agents, clock, event merge and update machinery.
///
/// Create via [`WorldBuilder`](crate::WorldBuilder).
pub struct World {
    pub(crate) config:               SimConfig,
    pub(crate) clock:                SimClock,
    /// Index = address.  Never resized after construction.
    pub(crate) agents:               Vec<Agent>,
    pub(crate) events:               EventMerge<ScenarioEvent>,
    pub(crate) router:               Box<dyn Router>,
    pub(crate) zones:                Option<Zones>,
    pub(crate) direction:            Direction,
    pub(crate) hub:                  Option<AgentId>,
    pub(crate) neighbors:            NeighborSet,
    pub(crate) simulate_connections: bool,
    pub(crate) pass_order:           PassOrder,
    pub(crate) proximity:            ProximityBackend,
    pub(crate) cancel:               CancelHandle,
}

impl World {
    // ── Public API ────────────────────────────────────────────────────────

    /// Warm up, then tick until `config.end_time` or cancellation.
    pub fn run<O: SimObserver + ?Sized>(&mut self, observer: &mut O) -> SimResult<()> {
        info!(agents = self.agents.len(), end = %self.config.end(), "run start");
        self.warmup()?;
        while self.clock.now() < self.config.end() && !self.cancel.is_cancelled() {
            self.tick(observer)?;
        }
        observer.on_sim_end(self.clock.now());
        info!(now = %self.clock.now(), cancelled = self.cancel.is_cancelled(), "run end");
        Ok(())
    }

    /// Run exactly `n` ticks (ignores `end_time`).  Stops early on
    /// cancellation.
    pub fn run_ticks<O: SimObserver + ?Sized>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            if self.cancel.is_cancelled() {
                break;
            }
            self.tick(observer)?;
        }
        Ok(())
    }

    /// Movement-only phase from a negative start time up to zero.
    ///
    /// Agents move in `update_interval` steps, then one final shorter step
    /// lands the clock exactly on zero.  No update passes run.
    pub fn warmup(&mut self) -> SimResult<()> {
        if self.clock.now() >= SimTime::ZERO {
            return Ok(());
        }
        let step = self.config.update_interval;
        debug!(from = %self.clock.now(), "warm-up");
        while self.clock.now().secs() < -step {
            self.move_agents(step)?;
            self.clock.advance_by(step)?;
        }
        let last = -self.clock.now().secs();
        self.move_agents(last)?;
        self.clock.advance_to(SimTime::ZERO)?;
        Ok(())
    }

    /// Advance the world by one update interval.
    pub fn tick<O: SimObserver + ?Sized>(&mut self, observer: &mut O) -> SimResult<()> {
        let start = self.clock.now();
        let run_until = start + self.config.update_interval;
        observer.on_tick_start(start);

        // ── Drain due events ──────────────────────────────────────────────
        loop {
            let due = self.events.next_event_time();
            if due > run_until {
                break;
            }
            let now = self.clock.now();
            if due < now {
                warn!(due = %due, now = %now, "event due in the past; applying now");
            }
            self.clock.advance_to(due.max(now))?;

            let Some((_, event)) = self.events.pop_next() else {
                break;
            };
            observer.on_event(self.clock.now(), &event);
            self.apply_merged(event)?;
            self.refresh_neighbors();
            self.update_pass(observer)?;
        }

        // ── Bulk movement for the rest of the interval ────────────────────
        self.refresh_neighbors();
        let residual = run_until - self.clock.now();
        self.move_agents(residual)?;
        self.clock.advance_to(run_until)?;
        self.update_pass(observer)?;

        observer.on_tick_end(self.clock.now(), &self.agents);
        Ok(())
    }

    /// Request an extra update pass at `at`.
    pub fn schedule_update(&mut self, at: SimTime) -> SimResult<()> {
        self.events.schedule_update(at)?;
        Ok(())
    }

    /// Stop the run after the current tick.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// A handle that can cancel this world from another thread.
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Apply one scenario event.
    ///
    /// # Errors
    /// [`SimError::AddressOutOfRange`] if the event names an unknown agent.
    pub fn apply_event(&mut self, event: ScenarioEvent) -> SimResult<()> {
        debug!(now = %self.clock.now(), %event, "apply event");
        match event {
            ScenarioEvent::SwitchDirection => {
                self.direction = self.direction.toggled();
            }
            ScenarioEvent::SetActive { agent, active } => {
                self.agent_mut(agent.index())?.active = active;
            }
            ScenarioEvent::SetLocation { agent, at } => {
                self.agent_mut(agent.index())?.location = at;
            }
            ScenarioEvent::ScheduleUpdate { at } => {
                self.events.schedule_update(at)?;
            }
        }
        Ok(())
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn now(&self) -> SimTime {
        self.clock.now()
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    #[inline]
    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// The agent at `address`.
    ///
    /// # Errors
    /// [`SimError::AddressOutOfRange`] for addresses outside `0..agent_count`.
    pub fn agent_at(&self, address: usize) -> SimResult<&Agent> {
        self.agents
            .get(address)
            .ok_or(SimError::AddressOutOfRange { address, count: self.agents.len() })
    }

    fn agent_mut(&mut self, address: usize) -> SimResult<&mut Agent> {
        let count = self.agents.len();
        self.agents
            .get_mut(address)
            .ok_or(SimError::AddressOutOfRange { address, count })
    }

    /// Interface `id` of the agent at `address`.
    pub fn interface(&self, address: usize, id: &str) -> SimResult<&NetInterface> {
        Ok(self.agent_at(address)?.interface(id)?)
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn hub(&self) -> Option<AgentId> {
        self.hub
    }

    /// Agents selected for the most recent update pass.
    pub fn neighbors(&self) -> &NeighborSet {
        &self.neighbors
    }

    pub fn simulate_connections(&self) -> bool {
        self.simulate_connections
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn apply_merged(&mut self, event: Merged<ScenarioEvent>) -> SimResult<()> {
        match event {
            Merged::ScheduledUpdate => Ok(()),
            Merged::External(e) => self.apply_event(e),
        }
    }

    pub(crate) fn refresh_neighbors(&mut self) {
        self.neighbors = select_neighbors(&self.agents, self.zones.as_ref(), self.direction, self.hub);
    }

    fn move_agents(&mut self, dt: f64) -> SimResult<()> {
        let now = self.clock.now();

        #[cfg(not(feature = "parallel"))]
        {
            for agent in &mut self.agents {
                agent.move_for(dt, now)?;
            }
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            self.agents
                .par_iter_mut()
                .try_for_each(|agent| agent.move_for(dt, now).map(|_| ()))?;
        }

        trace!(%now, dt, "moved agents");
        Ok(())
    }

    /// One sweep over the agents: router tick then collision avoidance for
    /// the hub and every neighbour.
    fn update_pass<O: SimObserver + ?Sized>(&mut self, observer: &mut O) -> SimResult<()> {
        let now = self.clock.now();
        let order = self.pass_order.next(now, self.agents.len());
        let mut index = self.proximity.build(self.agents.iter().map(|a| (a.id, a.location)));

        for idx in order {
            if self.cancel.is_cancelled() {
                debug!(%now, "update pass cancelled");
                break;
            }
            let id = self.agents[idx].id;
            if Some(id) != self.hub && !self.neighbors.contains(&id) {
                continue;
            }
            let before = self.agents[idx].location;
            self.update_agent(idx, index.as_ref(), observer)?;
            let after = self.agents[idx].location;
            if after != before {
                index.relocate(id, before, after);
            }
        }

        if self.config.simulate_connections_once {
            self.simulate_connections = false;
        }
        if let Some(ms) = self.config.pacing_ms {
            std::thread::sleep(Duration::from_millis(ms));
        }
        Ok(())
    }

    fn update_agent<O: SimObserver + ?Sized>(
        &mut self,
        idx:      usize,
        index:    &dyn ProximityIndex,
        observer: &mut O,
    ) -> SimResult<()> {
        let now = self.clock.now();
        let id = self.agents[idx].id;
        if !self.agents[idx].active {
            return Ok(());
        }

        // ── Router tick ───────────────────────────────────────────────────
        let ctx = RouterContext {
            now,
            direction: self.direction,
            agents:    &self.agents,
            neighbors: &self.neighbors,
            hub:       self.hub,
        };
        let intents = self.router.update(id, &ctx, self.simulate_connections);
        for intent in intents {
            self.apply_router_intent(id, intent)?;
        }

        // ── Collision avoidance ───────────────────────────────────────────
        //
        // Detach this agent's record and location so they can be rewritten
        // while every other agent is read.
        let Some(mut record) = self.agents[idx].take_record() else {
            return Ok(());
        };
        let mut location = self.agents[idx].location;
        let brake = avoid_collisions(
            id,
            &mut location,
            &mut record,
            &self.agents,
            index,
            self.config.proximity_radius,
        );
        let agent = &mut self.agents[idx];
        agent.location = location;
        agent.set_record(Some(record));

        if let Some(brake) = brake {
            observer.on_brake(now, &brake);
        }
        Ok(())
    }

    fn apply_router_intent(&mut self, agent: AgentId, intent: RouterIntent) -> SimResult<()> {
        match intent {
            RouterIntent::SwitchDirection => {
                self.direction = self.direction.toggled();
                debug!(%agent, direction = ?self.direction, "direction switched");
            }
            RouterIntent::ScheduleUpdate(at) => {
                // Requests at or before now are dropped.
                if at > self.clock.now() {
                    self.events.schedule_update(at)?;
                }
            }
        }
        Ok(())
    }
}
