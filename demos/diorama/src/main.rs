//! diorama — headless run of the five-character tree scene.
//!
//! Four performers loop scripted clips around a tree while Hedoban wanders
//! between them, steering clear of the trunk and the other characters and
//! stepping up onto a stump when a walk crosses it.  Nothing is rendered; the
//! committed state of every tick is written as CSV.
//!
//! ```text
//! diorama [config.json] [output-dir]
//! ```
//!
//! The optional JSON file may override any field of `scene` (`SceneConfig`)
//! and `tuning` (`NavTuning`); omitted fields keep their defaults.

use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use tracing::info;

use dio_behavior::{BehaviorDecision, WanderModel};
use dio_core::{AgentId, NavTuning, SceneConfig, Tick, Vec3};
use dio_output::{CsvWriter, OutputWriter, TraceObserver};
use dio_schedule::{Routine, load_routines_reader};
use dio_sim::{AgentSnapshot, ClipSet, SceneBuilder, SceneObserver};
use dio_spatial::{Disc, Platform};

// ── Constants ─────────────────────────────────────────────────────────────────

const TITLE:          &str = "We are doing nothing.";
const DEFAULT_OUTPUT: &str = "output/diorama";

// Non-walkable trunk around the tree anchor.
const TRUNK_RADIUS: f64 = 0.45;
const TRUNK_TOP:    f64 = 3.0;

// ── Routines CSV ──────────────────────────────────────────────────────────────

// Empty holds mean "forever"; a single value is a fixed hold; two values a
// uniform range.  Mint dozes for 5–10 s, then sleeps for the length of its
// sleeping clip and starts over.
const ROUTINES_CSV: &str = "\
performer,action,hold_min_secs,hold_max_secs,fade_secs\n\
Mint,sleepidle,5,10,0.5\n\
Mint,sleeping,17.7,,0.5\n\
Kariage,sitting,,,0.5\n\
Red,laying,,,0.5\n\
Yellow,idle01,,,0.5\n\
";

// ── Config ────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DemoConfig {
    scene:  SceneConfig,
    tuning: NavTuning,
}

fn load_config(path: &Path) -> Result<DemoConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    let mut deserializer = serde_json::Deserializer::from_str(&raw);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|error| {
        let path = error.path().to_string();
        let source = error.into_inner();
        if path.is_empty() || path == "." {
            anyhow!("parse config json: {source}")
        } else {
            anyhow!("parse config json at {path}: {source}")
        }
    })
}

// ── Observer wrapper ──────────────────────────────────────────────────────────

/// Forwards to the trace writer and keeps a few totals for the summary.
struct CountingObserver<W: OutputWriter> {
    inner:      TraceObserver<W>,
    decisions:  usize,
    trace_rows: usize,
    interval:   u64,
}

impl<W: OutputWriter> CountingObserver<W> {
    fn new(inner: TraceObserver<W>, config: &SceneConfig) -> Self {
        Self { inner, decisions: 0, trace_rows: 0, interval: config.trace_interval_ticks }
    }
}

impl<W: OutputWriter> SceneObserver for CountingObserver<W> {
    fn on_tick_start(&mut self, tick: Tick) {
        self.inner.on_tick_start(tick);
    }

    fn on_decision(&mut self, tick: Tick, agent: AgentId, decision: &BehaviorDecision) {
        self.decisions += 1;
        if let Some(caption) = &decision.caption {
            tracing::debug!(%tick, %agent, behavior = %decision.behavior, caption = %caption);
        }
        self.inner.on_decision(tick, agent, decision);
    }

    fn on_commit(&mut self, tick: Tick, agents: &[AgentSnapshot<'_>]) {
        if self.interval > 0 && tick.0 % self.interval == 0 {
            self.trace_rows += agents.len();
        }
        self.inner.on_commit(tick, agents);
    }

    fn on_tick_end(&mut self, tick: Tick, decisions: usize) {
        self.inner.on_tick_end(tick, decisions);
    }

    fn on_scene_end(&mut self, final_tick: Tick) {
        self.inner.on_scene_end(final_tick);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => load_config(Path::new(&path))?,
        None => DemoConfig::default(),
    };
    let output_dir = args.next().map_or_else(|| PathBuf::from(DEFAULT_OUTPUT), PathBuf::from);
    let DemoConfig { scene: scene_config, tuning } = config;

    println!("=== {TITLE} ===");
    println!(
        "Ticks: {} at {} Hz  |  Seed: {}",
        scene_config.total_ticks, scene_config.tick_rate_hz, scene_config.seed
    );
    println!();

    // 1. Routines.
    let mut routines = load_routines_reader(Cursor::new(ROUTINES_CSV))?;
    info!(count = routines.len(), "loaded routines");
    let mut routine = |name: &str| -> Result<Routine> {
        let idx = routines
            .iter()
            .position(|(n, _)| n == name)
            .ok_or_else(|| anyhow!("no routine for {name}"))?;
        Ok(routines.swap_remove(idx).1)
    };
    let mint    = routine("Mint")?;
    let kariage = routine("Kariage")?;
    let red     = routine("Red")?;
    let yellow  = routine("Yellow")?;

    // 2. Scene: tree at the origin, four performers around it, a stump to
    //    climb and Hedoban out by the edge of the clearing.
    let model = WanderModel::from_tuning(&tuning);
    let mut scene = SceneBuilder::new(scene_config.clone(), model)
        .tuning(tuning)
        .obstacle(Vec3::ZERO)
        .surface("trunk", false, Disc::new(0.0, 0.0, TRUNK_RADIUS, TRUNK_TOP)?)
        .surface("stump", true, Platform::new(-3.8, -2.6, -3.0, -1.8, 0.35)?)
        .performer(
            "Mint",
            Vec3::new(-2.5, 0.0, 1.5),
            0.0,
            mint,
            ClipSet::new(["sleepidle", "sleeping"]),
        )
        .performer("Kariage", Vec3::new(2.5, 0.0, -1.5), 0.0, kariage, ClipSet::new(["sitting"]))
        .performer("Red", Vec3::new(0.0, 0.0, 2.5), 0.0, red, ClipSet::new(["laying"]))
        .performer("Yellow", Vec3::new(1.5, 0.0, 0.5), 0.0, yellow, ClipSet::new(["idle01"]))
        .wanderer(
            "Hedoban",
            Vec3::new(-1.5, 0.0, -3.5),
            ClipSet::new(["idle01", "walk01", "walk02", "walk03"]),
        )
        .build()?;
    println!("Agents: {}", scene.live_count());

    // 3. Output.
    let writer = CsvWriter::new(&output_dir)?;
    let inner = TraceObserver::new(writer, &scene_config);
    let mut obs = CountingObserver::new(inner, &scene_config);

    // 4. Run.
    let t0 = Instant::now();
    scene.run(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }

    // 5. Summary.
    println!(
        "Scene complete: {:.1} s of scene time in {:.3} s",
        scene.clock.elapsed_secs(),
        elapsed.as_secs_f64()
    );
    println!("  decisions          : {}", obs.decisions);
    println!("  agent_trace.csv    : {} rows", obs.trace_rows);
    println!("  tick_summaries.csv : {} rows", scene_config.total_ticks);
    println!("  written to         : {}", output_dir.display());
    println!();

    println!("{:<10} {:<10} {:>8} {:>8} {:>8}  {:<10}", "Agent", "Role", "x", "y", "z", "Clip");
    println!("{}", "-".repeat(60));
    for s in scene.snapshots() {
        println!(
            "{:<10} {:<10} {:>8.3} {:>8.3} {:>8.3}  {:<10}",
            s.name,
            s.role.as_str(),
            s.position.x,
            s.position.y,
            s.position.z,
            s.animation.unwrap_or("-"),
        );
    }

    Ok(())
}
