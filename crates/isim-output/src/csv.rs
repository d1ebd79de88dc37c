//! CSV output backend.
//!
//! Creates two files in the output directory:
//! - `agent_positions.csv`
//! - `tick_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{AgentPositionRow, OutputResult, TickSummaryRow};

pub const POSITION_HEADERS: [&str; 9] =
    ["agent_id", "time", "kind", "x", "y", "active", "moving", "dest_x", "dest_y"];

pub const SUMMARY_HEADERS: [&str; 5] =
    ["time", "active_agents", "moving_agents", "events", "brakes"];

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    positions: Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open both files and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut positions = Writer::from_path(dir.join("agent_positions.csv"))?;
        positions.write_record(POSITION_HEADERS)?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(SUMMARY_HEADERS)?;

        Ok(Self { positions, summaries, finished: false })
    }
}

fn opt(v: Option<f64>) -> String {
    v.map(|v| v.to_string()).unwrap_or_default()
}

impl OutputWriter for CsvWriter {
    fn write_positions(&mut self, rows: &[AgentPositionRow]) -> OutputResult<()> {
        for row in rows {
            self.positions.write_record(&[
                row.agent_id.to_string(),
                row.time.to_string(),
                row.kind.to_owned(),
                row.x.to_string(),
                row.y.to_string(),
                (row.active as u8).to_string(),
                (row.moving as u8).to_string(),
                opt(row.destination.map(|d| d.0)),
                opt(row.destination.map(|d| d.1)),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.time.to_string(),
            row.active_agents.to_string(),
            row.moving_agents.to_string(),
            row.events.to_string(),
            row.brakes.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.positions.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
