use crate::{AgentPositionRow, OutputResult, TickSummaryRow};

/// Sink for simulation output rows.
///
/// Errors surface through [`SimOutputObserver::take_error`](crate::SimOutputObserver::take_error)
/// because observer callbacks cannot fail.
pub trait OutputWriter {
    fn write_positions(&mut self, rows: &[AgentPositionRow]) -> OutputResult<()>;

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.  Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
