//! `SimOutputObserver<W>` bridges `SimObserver` to an `OutputWriter`.

use isim_core::SimTime;
use isim_events::{Merged, ScenarioEvent};
use isim_mobility::Agent;
use isim_sim::SimObserver;
use isim_spatial::Brake;
use tracing::{debug, warn};

use crate::row::{AgentPositionRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes agent positions and tick summaries to any
/// [`OutputWriter`].
///
/// Writer errors are stored because observer callbacks return nothing.
/// Check [`take_error`](Self::take_error) once the run returns.
pub struct SimOutputObserver<W: OutputWriter> {
    writer:         W,
    snapshot_every: u64,
    ticks:          u64,
    events:         u64,
    brakes:         u64,
    last_error:     Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    /// Positions are written every tick until changed with
    /// [`snapshot_every`](Self::snapshot_every).
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            snapshot_every: 1,
            ticks:          0,
            events:         0,
            brakes:         0,
            last_error:     None,
        }
    }

    /// Write positions on the first tick and every `n`th tick after it.
    /// `0` is treated as `1`.
    pub fn snapshot_every(mut self, n: u64) -> Self {
        self.snapshot_every = n.max(1);
        self
    }

    /// The first write error, if any.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            warn!(error = %e, "output write failed");
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_event(&mut self, _at: SimTime, _event: &Merged<ScenarioEvent>) {
        self.events += 1;
    }

    fn on_brake(&mut self, _now: SimTime, _brake: &Brake) {
        self.brakes += 1;
    }

    fn on_tick_end(&mut self, now: SimTime, agents: &[Agent]) {
        let rows: Vec<AgentPositionRow> =
            agents.iter().map(|a| AgentPositionRow::from_agent(now, a)).collect();

        let summary = TickSummaryRow {
            time:          now.secs(),
            active_agents: rows.iter().filter(|r| r.active).count() as u64,
            moving_agents: rows.iter().filter(|r| r.moving).count() as u64,
            events:        self.events,
            brakes:        self.brakes,
        };
        let result = self.writer.write_tick_summary(&summary);
        self.store_err(result);

        if self.ticks % self.snapshot_every == 0 && !rows.is_empty() {
            let result = self.writer.write_positions(&rows);
            self.store_err(result);
        }

        self.ticks += 1;
        self.events = 0;
        self.brakes = 0;
    }

    fn on_sim_end(&mut self, now: SimTime) {
        debug!(%now, ticks = self.ticks, "closing output");
        let result = self.writer.finish();
        self.store_err(result);
    }
}
