//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `agent_trace.csv`
//! - `tick_summaries.csv`
//!
//! Optional columns (target, caption, animation) are left empty when absent.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{AgentTraceRow, OutputResult, TickSummaryRow};

pub const AGENT_TRACE_FILE: &str = "agent_trace.csv";
pub const TICK_SUMMARY_FILE: &str = "tick_summaries.csv";

/// Writes a scene trace to two CSV files.
pub struct CsvWriter {
    agents:    Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open (or truncate) both files and write their
    /// header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut agents = Writer::from_path(dir.join(AGENT_TRACE_FILE))?;
        agents.write_record([
            "tick", "secs", "agent_id", "name", "role", "x", "y", "z", "yaw", "behavior",
            "target_x", "target_z", "caption", "animation", "stuck_ticks",
        ])?;

        let mut summaries = Writer::from_path(dir.join(TICK_SUMMARY_FILE))?;
        summaries.write_record(["tick", "secs", "live_agents", "walking", "decisions"])?;

        Ok(Self {
            agents,
            summaries,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_agents(&mut self, rows: &[AgentTraceRow]) -> OutputResult<()> {
        for row in rows {
            let (target_x, target_z) = match row.target {
                Some((x, z)) => (x.to_string(), z.to_string()),
                None => (String::new(), String::new()),
            };
            self.agents.write_record(&[
                row.tick.to_string(),
                format!("{:.4}", row.secs),
                row.agent_id.to_string(),
                row.name.clone(),
                row.role.to_owned(),
                row.x.to_string(),
                row.y.to_string(),
                row.z.to_string(),
                row.yaw.to_string(),
                row.behavior.to_owned(),
                target_x,
                target_z,
                row.caption.clone().unwrap_or_default(),
                row.animation.clone().unwrap_or_default(),
                row.stuck_ticks.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            format!("{:.4}", row.secs),
            row.live_agents.to_string(),
            row.walking.to_string(),
            row.decisions.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.agents.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
