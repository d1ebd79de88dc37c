//! intersection — a four-way crossing under a timed signal.
//!
//! North-south traffic runs along x ≈ 166, east-west traffic along y ≈ 68,
//! and the hub at the centre flips right of way every `signal_phase_secs`.
//! Only agents inside the approach rectangle of the direction that has
//! right of way are updated, so queued traffic on the other road is left
//! alone until the light changes.
//!
//! ```text
//! intersection [scenario.json] [events.csv]
//! ```
//!
//! Without arguments the embedded scenario and event list are used.
//! Set `RUST_LOG=debug` to see every brake and event.

mod scenario;

use std::collections::BTreeMap;
use std::io::Cursor;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use isim_core::SimTime;
use isim_events::{load_events_csv, load_events_reader};
use isim_output::{CsvWriter, SimOutputObserver};
use isim_sim::{ObserverList, SignalRouter, SimObserver, WorldBuilder};
use isim_spatial::{Brake, BrakeCause};

use scenario::Scenario;

const OUTPUT_DIR: &str = "output/intersection";

// ── Embedded scenario ─────────────────────────────────────────────────────────

const SCENARIO_JSON: &str = r#"{
  "config": {
    "update_interval": 1.0,
    "end_time": 90.0,
    "warmup_secs": 3.0,
    "randomize_update_order": true,
    "seed_policy": "clock_seeded",
    "proximity_radius": 50.0
  },
  "signal_phase_secs": 20.0,
  "reference_zones": true,
  "proximity": "r_tree",
  "snapshot_every": 5,
  "agents": [
    { "kind": "intersection", "start": { "x": 157.3598, "y": 67.9789 },
      "interfaces": [ { "id": "dsrc", "range": 300.0 } ] },
    { "kind": "self_driving_car", "start": { "x": 166.0, "y": 0.0 },
      "legs": [ { "waypoints": [ { "x": 166.0, "y": 0.0 }, { "x": 166.0, "y": 119.0 } ], "speed": 6.0 } ],
      "interfaces": [ { "id": "dsrc", "range": 300.0 } ] },
    { "kind": "manual_car", "start": { "x": 166.0, "y": 4.0 },
      "legs": [ { "waypoints": [ { "x": 166.0, "y": 4.0 }, { "x": 166.0, "y": 119.0 } ], "speed": 9.0 } ] },
    { "kind": "manual_car", "start": { "x": 95.0, "y": 68.0 },
      "legs": [
        { "waypoints": [ { "x": 95.0, "y": 68.0 }, { "x": 297.0, "y": 68.0 } ], "speed": 10.0 },
        { "waypoints": [ { "x": 297.0, "y": 68.0 }, { "x": 95.0, "y": 68.0 } ], "speed": 10.0 }
      ],
      "pause_secs": 5.0 },
    { "kind": "bike", "start": { "x": 297.0, "y": 70.0 },
      "legs": [ { "waypoints": [ { "x": 297.0, "y": 70.0 }, { "x": 95.0, "y": 70.0 } ], "speed": 4.0 } ] },
    { "kind": "bus", "start": { "x": 100.0, "y": 66.0 },
      "legs": [ { "waypoints": [ { "x": 100.0, "y": 66.0 }, { "x": 160.0, "y": 66.0 }, { "x": 290.0, "y": 66.0 } ], "speed": 7.0 } ] },
    { "kind": "pedestrian", "start": { "x": 164.5, "y": 60.0 },
      "legs": [ { "waypoints": [ { "x": 164.5, "y": 60.0 }, { "x": 164.5, "y": 76.0 } ], "speed": 1.4 } ] },
    { "kind": "manual_car", "start": { "x": 200.0, "y": 20.0 } }
  ]
}"#;

// Agent 6 (the pedestrian) drops off the network for a while; agent 2 is
// teleported back to the start of its approach.
const EVENTS_CSV: &str = "\
time,kind,agent,x,y\n\
12.0,deactivate,6,,\n\
30.0,activate,6,,\n\
45.0,set_location,2,166.0,4.0\n\
60.0,schedule_update,,61.5,\n\
";

// ── Brake tally ───────────────────────────────────────────────────────────────

#[derive(Default)]
struct BrakeTally {
    by_cause: BTreeMap<&'static str, usize>,
    last:     Option<(SimTime, Brake)>,
}

impl SimObserver for BrakeTally {
    fn on_brake(&mut self, now: SimTime, brake: &Brake) {
        let key = match brake.cause {
            BrakeCause::Overrun  => "overrun",
            BrakeCause::Crossing => "crossing",
        };
        *self.by_cause.entry(key).or_default() += 1;
        self.last = Some((now, *brake));
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let scenario = match args.next() {
        Some(path) => {
            let text = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
            Scenario::from_json(&text)?
        }
        None => Scenario::from_json(SCENARIO_JSON)?,
    };
    let events = match args.next() {
        Some(path) => load_events_csv(Path::new(&path)).with_context(|| format!("loading {path}"))?,
        None => load_events_reader(Cursor::new(EVENTS_CSV))?,
    };
    info!(agents = scenario.agents.len(), events = events.len(), "scenario loaded");

    let mut builder = WorldBuilder::new(scenario.config.clone())
        .router(Box::new(SignalRouter::new(scenario.signal_phase_secs)))
        .proximity(scenario.proximity)
        .event_source(Box::new(events))
        .interfaces(scenario.agents.iter().map(|a| a.interfaces.clone()).collect());
    if let Some(zones) = scenario.zones() {
        builder = builder.zones(zones);
    }
    for agent in &scenario.agents {
        builder = builder.agent(agent.kind, agent.provider());
    }
    let mut world = builder.build()?;

    let writer = CsvWriter::new(Path::new(OUTPUT_DIR))?;
    let mut output = SimOutputObserver::new(writer).snapshot_every(scenario.snapshot_every);
    let mut tally = BrakeTally::default();

    let t0 = Instant::now();
    {
        let mut observers = ObserverList::new().with(&mut output).with(&mut tally);
        world.run(&mut observers)?;
    }
    let elapsed = t0.elapsed();

    if let Some(e) = output.take_error() {
        eprintln!("output error: {e}");
    }

    println!("Simulated {} in {:.3} s, output in {OUTPUT_DIR}/", world.now(), elapsed.as_secs_f64());
    println!("Right of way at end: {:?}", world.direction());
    for (cause, n) in &tally.by_cause {
        println!("  {cause:<9} brakes: {n}");
    }
    if let Some((at, brake)) = tally.last {
        println!("  last brake: {} behind {} at {} ({at})", brake.agent, brake.other, brake.at);
    }
    println!();

    println!("{:<6} {:<18} {:<20} {:<7}", "Agent", "Kind", "Location", "Active");
    println!("{}", "-".repeat(54));
    for agent in world.agents() {
        println!(
            "{:<6} {:<18} {:<20} {:<7}",
            agent.id.0,
            agent.kind.as_str(),
            agent.location.to_string(),
            if agent.active { "yes" } else { "no" },
        );
    }

    Ok(())
}
