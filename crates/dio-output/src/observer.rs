//! `TraceObserver<W>` — bridges `SceneObserver` to an `OutputWriter`.

use dio_core::{SceneConfig, SimClock, Tick};
use dio_sim::{AgentSnapshot, SceneObserver};

use crate::row::{AgentTraceRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SceneObserver`] that writes agent rows every `trace_interval_ticks`
/// and a summary row every tick.
///
/// Errors from the writer are stored internally because observer hooks have
/// no return value.  After `scene.run()` returns, check with
/// [`take_error`][Self::take_error].
pub struct TraceObserver<W: OutputWriter> {
    writer:       W,
    clock:        SimClock,
    interval:     u64,
    /// Counts from the latest commit, written with the tick summary.
    live:         u64,
    walking:      u64,
    last_error:   Option<OutputError>,
}

impl<W: OutputWriter> TraceObserver<W> {
    /// Create an observer backed by `writer`.  `config` supplies the tick
    /// rate (for the `secs` column) and the trace interval; an interval of 0
    /// writes summaries only.
    pub fn new(writer: W, config: &SceneConfig) -> Self {
        Self {
            writer,
            clock:      config.make_clock(),
            interval:   config.trace_interval_ticks,
            live:       0,
            walking:    0,
            last_error: None,
        }
    }

    /// Take the stored write error (if any) after `scene.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer.
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }

    fn row(&self, tick: Tick, a: &AgentSnapshot<'_>) -> AgentTraceRow {
        AgentTraceRow {
            tick:        tick.0,
            secs:        self.clock.secs_at(tick),
            agent_id:    a.id.0,
            name:        a.name.to_owned(),
            role:        a.role.as_str(),
            x:           a.position.x,
            y:           a.position.y,
            z:           a.position.z,
            yaw:         a.yaw,
            behavior:    a.behavior.map_or("", |b| b.as_str()),
            target:      a.target.map(|t| (t.x, t.z)),
            caption:     a.caption.map(str::to_owned),
            animation:   a.animation.map(str::to_owned),
            stuck_ticks: a.stuck_ticks,
        }
    }
}

impl<W: OutputWriter> SceneObserver for TraceObserver<W> {
    fn on_commit(&mut self, tick: Tick, agents: &[AgentSnapshot<'_>]) {
        self.live = agents.len() as u64;
        self.walking = agents
            .iter()
            .filter(|a| a.behavior.is_some_and(|b| b.is_walk()))
            .count() as u64;

        if self.interval == 0 || tick.0 % self.interval != 0 || agents.is_empty() {
            return;
        }
        let rows: Vec<AgentTraceRow> = agents.iter().map(|a| self.row(tick, a)).collect();
        let result = self.writer.write_agents(&rows);
        self.store_err(result);
    }

    fn on_tick_end(&mut self, tick: Tick, decisions: usize) {
        let row = TickSummaryRow {
            tick:        tick.0,
            secs:        self.clock.secs_at(tick),
            live_agents: self.live,
            walking:     self.walking,
            decisions:   decisions as u64,
        };
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_scene_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
