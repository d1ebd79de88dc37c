//! Fluent builder for constructing a [`World`].

use isim_core::{AgentId, AgentKind, SimClock, SimConfig, SimTime};
use isim_events::{EventMerge, EventSource, ScenarioEvent};
use isim_mobility::{Agent, NetInterface, PathProvider};
use isim_spatial::{Direction, NeighborSet, ProximityBackend, Zones};
use tracing::debug;

use crate::order::PassOrder;
use crate::{CancelHandle, NoopRouter, Router, SimError, SimResult, World};

/// Fluent builder for [`World`].
///
/// # Required inputs
///
/// - [`SimConfig`] — update interval, end time, warm-up, update order, …
/// - at least one agent via [`agent`](Self::agent)
///
/// # Optional inputs (have defaults)
///
/// | Method                | Default                              |
/// |-----------------------|--------------------------------------|
/// | `.router(r)`          | `NoopRouter`                         |
/// | `.event_source(s)`    | none (only scheduled updates)        |
/// | `.zones(z)`           | none: every non-hub agent is a neighbour |
/// | `.direction(d)`       | `Direction::NorthSouth`              |
/// | `.interfaces(v)`      | no interfaces                        |
/// | `.proximity(b)`       | `ProximityBackend::LinearScan`       |
/// | `.cancel_handle(h)`   | a fresh handle                       |
///
/// # Example
///
/// ```rust,ignore
/// let mut world = WorldBuilder::new(config)
///     .agent(AgentKind::Intersection, Box::new(StationaryProvider::new(hub_at)))
///     .agent(AgentKind::ManualCar, Box::new(WaypointProvider::single(route, 5.0)))
///     .router(Box::new(SignalRouter::new(30.0)))
///     .zones(Zones::reference_intersection())
///     .build()?;
/// world.run(&mut NoopObserver)?;
/// ```
pub struct WorldBuilder {
    config:     SimConfig,
    agents:     Vec<(AgentKind, Box<dyn PathProvider>)>,
    interfaces: Option<Vec<Vec<NetInterface>>>,
    router:     Option<Box<dyn Router>>,
    sources:    Vec<Box<dyn EventSource<ScenarioEvent>>>,
    zones:      Option<Zones>,
    direction:  Direction,
    proximity:  ProximityBackend,
    cancel:     Option<CancelHandle>,
}

impl WorldBuilder {
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            agents:     Vec::new(),
            interfaces: None,
            router:     None,
            sources:    Vec::new(),
            zones:      None,
            direction:  Direction::default(),
            proximity:  ProximityBackend::default(),
            cancel:     None,
        }
    }

    /// Add an agent.  Addresses are assigned in call order starting at 0.
    pub fn agent(mut self, kind: AgentKind, provider: Box<dyn PathProvider>) -> Self {
        self.agents.push((kind, provider));
        self
    }

    /// Per-agent network interfaces (must be one entry per agent).
    pub fn interfaces(mut self, interfaces: Vec<Vec<NetInterface>>) -> Self {
        self.interfaces = Some(interfaces);
        self
    }

    pub fn router(mut self, router: Box<dyn Router>) -> Self {
        self.router = Some(router);
        self
    }

    /// Register an external event source.  Sources registered earlier win
    /// ties on equal event times.
    pub fn event_source(mut self, source: Box<dyn EventSource<ScenarioEvent>>) -> Self {
        self.sources.push(source);
        self
    }

    pub fn zones(mut self, zones: Zones) -> Self {
        self.zones = Some(zones);
        self
    }

    /// Initial direction with right of way.
    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn proximity(mut self, backend: ProximityBackend) -> Self {
        self.proximity = backend;
        self
    }

    /// Share an existing cancellation flag with the world.
    pub fn cancel_handle(mut self, handle: CancelHandle) -> Self {
        self.cancel = Some(handle);
        self
    }

    /// Validate inputs, place agents, resolve the hub and return a
    /// ready-to-run [`World`].
    pub fn build(self) -> SimResult<World> {
        self.config.validate()?;
        let agent_count = self.agents.len();
        if u32::try_from(agent_count).is_err() {
            return Err(SimError::Config(format!("too many agents: {agent_count}")));
        }

        // ── Validate and resolve optional inputs ──────────────────────────
        let interfaces = match self.interfaces {
            Some(v) => {
                if v.len() != agent_count {
                    return Err(SimError::AgentCountMismatch {
                        expected: agent_count,
                        got:      v.len(),
                        what:     "interfaces",
                    });
                }
                v
            }
            None => vec![Vec::new(); agent_count],
        };

        // ── Place agents ──────────────────────────────────────────────────
        let agents: Vec<Agent> = self
            .agents
            .into_iter()
            .zip(interfaces)
            .enumerate()
            .map(|(i, ((kind, provider), ifaces))| {
                ifaces
                    .into_iter()
                    .fold(Agent::new(AgentId(i as u32), kind, provider), Agent::with_interface)
            })
            .collect();

        // ── Resolve the hub ───────────────────────────────────────────────
        let hubs: Vec<AgentId> = agents.iter().filter(|a| a.kind.is_hub()).map(|a| a.id).collect();
        if hubs.len() > 1 {
            return Err(SimError::Config(format!("more than one intersection hub: {hubs:?}")));
        }
        let hub = hubs.first().copied();

        let mut events = EventMerge::new();
        for source in self.sources {
            events.register(source);
        }

        debug!(agents = agent_count, sources = events.source_count(), ?hub, "world built");

        let mut world = World {
            clock:                SimClock::new(SimTime(0.0 - self.config.warmup_secs)),
            simulate_connections: self.config.simulate_connections,
            pass_order:           PassOrder::new(self.config.update_order()),
            config:               self.config,
            agents,
            events,
            router:               self.router.unwrap_or_else(|| Box::new(NoopRouter)),
            zones:                self.zones,
            direction:            self.direction,
            hub,
            neighbors:            NeighborSet::default(),
            proximity:            self.proximity,
            cancel:               self.cancel.unwrap_or_default(),
        };
        world.refresh_neighbors();
        Ok(world)
    }
}
