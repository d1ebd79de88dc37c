//! JSON scenario format for the intersection demo.

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use isim_core::{AgentKind, SimConfig, SimTime};
use isim_geom::Coord;
use isim_mobility::{Leg, NetInterface, PathProvider, StationaryProvider, WaypointProvider};
use isim_spatial::{ProximityBackend, Zones};

/// Top-level scenario file.
#[derive(Debug, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub config:            SimConfig,
    /// Seconds between right-of-way switches at the hub.
    #[serde(default = "default_phase")]
    pub signal_phase_secs: f64,
    /// Use the built-in approach rectangles when `zones` is absent.
    #[serde(default)]
    pub reference_zones:   bool,
    #[serde(default)]
    pub zones:             Option<Zones>,
    #[serde(default)]
    pub proximity:         ProximityBackend,
    /// Write positions every this many ticks.
    #[serde(default = "default_snapshot_every")]
    pub snapshot_every:    u64,
    pub agents:            Vec<AgentSpec>,
}

#[derive(Debug, Deserialize)]
pub struct AgentSpec {
    pub kind:        AgentKind,
    pub start:       Coord,
    #[serde(default)]
    pub legs:        Vec<Leg>,
    #[serde(default)]
    pub pause_secs:  f64,
    /// `[from, until)` in simulated seconds; moves at any time when absent.
    #[serde(default)]
    pub active_secs: Option<[f64; 2]>,
    #[serde(default)]
    pub interfaces:  Vec<NetInterface>,
}

fn default_phase() -> f64 {
    15.0
}

fn default_snapshot_every() -> u64 {
    1
}

impl Scenario {
    pub fn from_json(text: &str) -> Result<Self> {
        let scenario: Scenario = serde_json::from_str(text).context("parsing scenario JSON")?;
        if scenario.agents.is_empty() {
            bail!("scenario has no agents");
        }
        if !(scenario.signal_phase_secs.is_finite() && scenario.signal_phase_secs > 0.0) {
            bail!("signal_phase_secs must be positive, got {}", scenario.signal_phase_secs);
        }
        Ok(scenario)
    }

    pub fn zones(&self) -> Option<Zones> {
        match self.zones {
            Some(z) => Some(z),
            None if self.reference_zones => Some(Zones::reference_intersection()),
            None => None,
        }
    }
}

impl AgentSpec {
    /// The hub and agents without legs stay where they start.
    pub fn provider(&self) -> Box<dyn PathProvider> {
        if self.kind.is_hub() || self.legs.is_empty() {
            return Box::new(StationaryProvider::new(self.start));
        }
        let mut provider = WaypointProvider::new(self.start).with_pause(self.pause_secs);
        if let Some([from, until]) = self.active_secs {
            provider = provider.with_active_window(SimTime(from), SimTime(until));
        }
        for leg in &self.legs {
            provider.push_leg(leg.clone());
        }
        Box::new(provider)
    }
}
