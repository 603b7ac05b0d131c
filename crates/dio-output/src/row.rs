//! Plain data row types written by output backends.

/// One agent's committed state at one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentTraceRow {
    pub tick:        u64,
    pub secs:        f64,
    pub agent_id:    u32,
    pub name:        String,
    /// `"wanderer"` or `"performer"`.
    pub role:        &'static str,
    pub x:           f64,
    pub y:           f64,
    pub z:           f64,
    pub yaw:         f64,
    /// Empty for performers.
    pub behavior:    &'static str,
    /// Horizontal target of the current walk.
    pub target:      Option<(f64, f64)>,
    pub caption:     Option<String>,
    pub animation:   Option<String>,
    pub stuck_ticks: u32,
}

/// Per-tick totals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSummaryRow {
    pub tick:        u64,
    pub secs:        f64,
    pub live_agents: u64,
    pub walking:     u64,
    pub decisions:   u64,
}
