//! CSV scenario-event loader.
//!
//! # CSV format
//!
//! One row per event.  Columns a kind does not use are left empty.
//!
//! ```csv
//! time,kind,agent,x,y
//! 5.0,switch_direction,,,
//! 7.5,deactivate,3,,
//! 9.0,activate,3,,
//! 12.0,set_location,1,166.0,40.0
//! 0.0,schedule_update,,30.0,
//! ```
//!
//! | `kind`             | Uses        | Event                                 |
//! |--------------------|-------------|---------------------------------------|
//! | `switch_direction` | —           | `SwitchDirection`                     |
//! | `activate`         | `agent`     | `SetActive { active: true }`          |
//! | `deactivate`       | `agent`     | `SetActive { active: false }`         |
//! | `set_location`     | `agent,x,y` | `SetLocation`                         |
//! | `schedule_update`  | `x`         | `ScheduleUpdate { at: x }`            |
//!
//! Rows need not be sorted; the returned queue orders them by `time`, and
//! rows with equal times keep their file order.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use isim_core::{AgentId, SimTime};
use isim_geom::Coord;

use crate::{EventError, EventResult, ScenarioEvent, TimedQueue};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct EventRecord {
    time:  f64,
    kind:  String,
    agent: Option<u32>,
    x:     Option<f64>,
    y:     Option<f64>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load scenario events from a CSV file.
pub fn load_events_csv(path: &Path) -> EventResult<TimedQueue<ScenarioEvent>> {
    let file = std::fs::File::open(path)?;
    load_events_reader(file)
}

/// Like [`load_events_csv`] but accepts any `Read` source.
pub fn load_events_reader<R: Read>(reader: R) -> EventResult<TimedQueue<ScenarioEvent>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut queue = TimedQueue::new();

    for (line, result) in csv_reader.deserialize::<EventRecord>().enumerate() {
        let row = result.map_err(|e| EventError::Parse(e.to_string()))?;
        let event = parse_event(&row).map_err(|e| match e {
            EventError::Parse(msg) => EventError::Parse(format!("row {}: {msg}", line + 1)),
            other => other,
        })?;
        queue.push(SimTime(row.time), event)?;
    }

    Ok(queue)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_event(row: &EventRecord) -> EventResult<ScenarioEvent> {
    let agent = || {
        row.agent
            .map(AgentId)
            .ok_or_else(|| EventError::Parse(format!("{:?} requires an agent", row.kind)))
    };
    let field = |v: Option<f64>, name: &str| match v {
        Some(v) if v.is_finite() => Ok(v),
        Some(v) => Err(EventError::Parse(format!("{:?} has non-finite {name} {v}", row.kind))),
        None => Err(EventError::Parse(format!("{:?} requires {name}", row.kind))),
    };

    match row.kind.trim() {
        "switch_direction" => Ok(ScenarioEvent::SwitchDirection),
        "activate" => Ok(ScenarioEvent::SetActive { agent: agent()?, active: true }),
        "deactivate" => Ok(ScenarioEvent::SetActive { agent: agent()?, active: false }),
        "set_location" => Ok(ScenarioEvent::SetLocation {
            agent: agent()?,
            at:    Coord::new(field(row.x, "x")?, field(row.y, "y")?),
        }),
        "schedule_update" => Ok(ScenarioEvent::ScheduleUpdate { at: SimTime(field(row.x, "x")?) }),
        other => Err(EventError::Parse(format!(
            "unknown event kind {other:?}: expected switch_direction, activate, deactivate, \
             set_location or schedule_update"
        ))),
    }
}
