//! The `OutputWriter` trait implemented by trace backends.

use crate::{AgentTraceRow, OutputResult, TickSummaryRow};

/// A sink for trace rows.
///
/// Errors are returned to the caller; [`TraceObserver`][crate::TraceObserver]
/// keeps the first one for [`take_error`][crate::TraceObserver::take_error]
/// because observer hooks cannot fail.
pub trait OutputWriter {
    /// Write the committed state of a batch of agents.
    fn write_agents(&mut self, rows: &[AgentTraceRow]) -> OutputResult<()>;

    /// Write one tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent; safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
