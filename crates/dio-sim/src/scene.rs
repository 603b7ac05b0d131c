//! The `Scene` struct and its tick loop.

use std::sync::Arc;

use tracing::{debug, info, warn};

use dio_behavior::{Behavior, BehaviorModel, DecisionContext};
use dio_core::{AgentId, AgentRng, NavTuning, SceneConfig, SimClock, Tick, Vec3};
use dio_mobility::{AgentState, MobilityEngine, SteeringField};
use dio_schedule::{Routine, TimerQueue};
use dio_spatial::{ObstacleRegistry, SurfaceRegistry};

use crate::agent::{Role, SceneAgent, TimerEvent};
use crate::{AgentSnapshot, AnimationPlayer, SceneObserver, SimError, SimResult};

// ── Scene ─────────────────────────────────────────────────────────────────────

/// A running diorama.
///
/// `Scene<B, S>` owns every character and drives the fixed-tick loop:
///
/// 1. **Timers**: drain events due this tick: idle dwells that ran out
///    (→ decision) and routine holds that ended (→ next routine step).
/// 2. **Motion** (optionally parallel with the `parallel` feature): each
///    wanderer integrates one step, is checked for stalls, and follows the
///    ground.
/// 3. **Decisions** (sequential, ascending `AgentId`): wanderers that
///    arrived or gave up decide again in the same tick.
/// 4. **Commit**: observers see the final state of every agent.
///
/// Nothing blocks.  Every wait is a [`TimerEvent`] in the scene's
/// `TimerQueue`, tagged with the owning agent so [`despawn`](Self::despawn)
/// can cancel it.  Dropping the scene despawns everyone.
///
/// Create via [`SceneBuilder`][crate::SceneBuilder].
pub struct Scene<B: BehaviorModel, S: SteeringField> {
    pub config: SceneConfig,
    pub tuning: NavTuning,
    pub clock:  SimClock,

    /// Static obstacles, shared with the steering field.
    pub obstacles: Arc<ObstacleRegistry>,
    pub surfaces:  SurfaceRegistry,

    /// Integrator, stuck detector and ground sampler around steering `S`.
    pub mobility: MobilityEngine<S>,

    /// Decides for every wanderer.
    pub behavior: B,

    /// Indexed by `AgentId`; `None` once despawned.  Ids are never reused.
    pub(crate) agents: Vec<Option<SceneAgent>>,

    pub(crate) timers: TimerQueue<TimerEvent>,
}

impl<B: BehaviorModel, S: SteeringField> Scene<B, S> {
    pub(crate) fn assemble(
        config:    SceneConfig,
        tuning:    NavTuning,
        obstacles: Arc<ObstacleRegistry>,
        surfaces:  SurfaceRegistry,
        mobility:  MobilityEngine<S>,
        behavior:  B,
    ) -> Self {
        Self {
            clock: config.make_clock(),
            config,
            tuning,
            obstacles,
            surfaces,
            mobility,
            behavior,
            agents: Vec::new(),
            timers: TimerQueue::new(),
        }
    }

    // ── Running ───────────────────────────────────────────────────────────

    /// Run from the current tick to `config.end_tick()`.
    pub fn run<O: SceneObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        while self.clock.current_tick < self.config.end_tick() {
            self.step(observer);
        }
        observer.on_scene_end(self.clock.current_tick);
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    pub fn run_ticks<O: SceneObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step(observer);
        }
        Ok(())
    }

    fn step<O: SceneObserver>(&mut self, observer: &mut O) {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);
        let decisions = self.process_tick(now, observer);
        {
            let snapshots = self.snapshots();
            observer.on_commit(now, &snapshots);
        }
        observer.on_tick_end(now, decisions);
        self.clock.advance();
    }

    fn process_tick<O: SceneObserver>(&mut self, now: Tick, observer: &mut O) -> usize {
        let mut decisions = 0;

        // ── Phase 1: timers ───────────────────────────────────────────────
        for (timer, event) in self.timers.drain_due(now) {
            let id = event.agent();
            let Some(agent) = self.slot_mut(id) else {
                continue;
            };
            agent.timers.retain(|&t| t != timer);
            debug!(%now, ?event, "timer fired");
            match event {
                TimerEvent::Decide(_) => {
                    self.decide(id, now, observer);
                    decisions += 1;
                }
                TimerEvent::EnterStep { step, .. } => self.enter_step(id, step, now),
            }
        }

        // ── Phase 2: motion + stuck check + ground ────────────────────────
        let halted = self.motion_phase();

        // ── Phase 3: decisions for halted wanderers ───────────────────────
        for id in halted {
            self.decide(id, now, observer);
            decisions += 1;
        }

        decisions
    }

    /// Step every wanderer.  Returns the ids that halted this tick, ascending.
    fn motion_phase(&mut self) -> Vec<AgentId> {
        let engine   = &self.mobility;
        let surfaces = &self.surfaces;

        #[cfg(not(feature = "parallel"))]
        {
            self.agents
                .iter_mut()
                .filter_map(|slot| {
                    let agent = slot.as_mut().filter(|a| a.is_wanderer())?;
                    engine.step(&mut agent.state, surfaces).needs_decision().then_some(agent.id)
                })
                .collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            // `collect` keeps the original order, so ids stay ascending.
            self.agents
                .par_iter_mut()
                .filter_map(|slot| {
                    let agent = slot.as_mut().filter(|a| a.is_wanderer())?;
                    engine.step(&mut agent.state, surfaces).needs_decision().then_some(agent.id)
                })
                .collect()
        }
    }

    // ── Decisions and routines ────────────────────────────────────────────

    fn decide<O: SceneObserver>(&mut self, id: AgentId, now: Tick, observer: &mut O) {
        let Some(agent) = self.agents.get_mut(id.index()).and_then(Option::as_mut) else {
            return;
        };
        let Role::Wanderer { last_decision } = agent.role else {
            return;
        };

        for timer in agent.timers.drain(..) {
            self.timers.cancel(timer);
        }

        let ctx = DecisionContext::new(now, agent.state.position, last_decision, &self.obstacles);
        let mut decision = self.behavior.decide(id, &ctx, &mut agent.rng);
        if !decision.is_consistent() {
            warn!(agent = %id, ?decision, "decision target does not match its behavior, idling instead");
            decision.behavior = Behavior::Idle;
            decision.destination = None;
        }

        agent.state.apply_decision(&decision);
        agent.role = Role::Wanderer { last_decision: Some(decision.behavior) };
        agent.caption = decision.caption.clone();
        if let Some(name) = &decision.animation {
            agent.play(name, self.tuning.fade_secs);
        }
        if decision.behavior.is_walk() {
            debug!(agent = %id, %now, behavior = %decision.behavior, "walking");
        } else if let Some(secs) = decision.dwell_secs {
            let due = now + self.clock.ticks_for_secs(secs).max(1);
            agent.timers.push(self.timers.schedule(due, TimerEvent::Decide(id)));
        }

        observer.on_decision(now, id, &decision);
    }

    fn enter_step(&mut self, id: AgentId, step: usize, now: Tick) {
        let Some(agent) = self.agents.get_mut(id.index()).and_then(Option::as_mut) else {
            return;
        };
        let Role::Performer { routine, step: current } = &mut agent.role else {
            return;
        };
        let Some(entry) = routine.step(step) else {
            return;
        };
        *current = step;
        let action = entry.action.clone();
        let fade = entry.fade_secs;
        let hold = routine.hold_ticks(step, &self.clock, &mut agent.rng);
        let next = routine.next_index(step);

        agent.play(&action, fade);
        if let Some(ticks) = hold {
            let event = TimerEvent::EnterStep { agent: id, step: next };
            agent.timers.push(self.timers.schedule(now + ticks, event));
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Add a wandering character at `position`.  It makes its first decision
    /// at the start of the next tick.
    ///
    /// Wanderers are not obstacles; other agents walk through them.
    pub fn spawn_wanderer(
        &mut self,
        name:     impl Into<String>,
        position: Vec3,
        player:   impl AnimationPlayer + 'static,
    ) -> AgentId {
        self.spawn_boxed_wanderer(name.into(), position, Box::new(player))
    }

    /// Add a character that plays `routine` in place.  The first step starts
    /// at the beginning of the next tick.
    ///
    /// Only performers given to the [`SceneBuilder`][crate::SceneBuilder]
    /// are registered as obstacles.
    pub fn spawn_performer(
        &mut self,
        name:     impl Into<String>,
        position: Vec3,
        yaw:      f64,
        routine:  Routine,
        player:   impl AnimationPlayer + 'static,
    ) -> AgentId {
        self.spawn_boxed_performer(name.into(), position, yaw, routine, Box::new(player))
    }

    pub(crate) fn spawn_boxed_wanderer(
        &mut self,
        name:     String,
        position: Vec3,
        player:   Box<dyn AnimationPlayer>,
    ) -> AgentId {
        let role = Role::Wanderer { last_decision: None };
        let id = self.push_agent(name, role, position, 0.0, player);
        self.schedule_for(id, self.clock.current_tick, TimerEvent::Decide(id));
        id
    }

    pub(crate) fn spawn_boxed_performer(
        &mut self,
        name:     String,
        position: Vec3,
        yaw:      f64,
        routine:  Routine,
        player:   Box<dyn AnimationPlayer>,
    ) -> AgentId {
        let role = Role::Performer { routine, step: 0 };
        let id = self.push_agent(name, role, position, yaw, player);
        self.schedule_for(id, self.clock.current_tick, TimerEvent::EnterStep { agent: id, step: 0 });
        id
    }

    /// Remove an agent: cancel every timer it owns and fade out the
    /// animation it started.
    pub fn despawn(&mut self, id: AgentId) -> SimResult<()> {
        let mut agent = self
            .agents
            .get_mut(id.index())
            .and_then(Option::take)
            .ok_or(SimError::AgentNotFound(id))?;
        for timer in agent.timers.drain(..) {
            if self.timers.cancel(timer) {
                debug!(agent = %id, ?timer, "timer cancelled");
            }
        }
        agent.stop_animation(self.tuning.fade_secs);
        info!(agent = %id, name = %agent.name, "despawned");
        Ok(())
    }

    fn push_agent(
        &mut self,
        name:     String,
        role:     Role,
        position: Vec3,
        yaw:      f64,
        player:   Box<dyn AnimationPlayer>,
    ) -> AgentId {
        let id = AgentId(self.agents.len() as u32);
        let mut state = AgentState::idle_at(position);
        state.yaw = yaw;
        info!(agent = %id, %name, "spawned");
        self.agents.push(Some(SceneAgent {
            id,
            name,
            role,
            state,
            rng:       AgentRng::new(self.config.seed, id),
            player,
            caption:   None,
            animation: None,
            timers:    Vec::new(),
        }));
        id
    }

    fn schedule_for(&mut self, id: AgentId, tick: Tick, event: TimerEvent) {
        let timer = self.timers.schedule(tick, event);
        if let Some(agent) = self.slot_mut(id) {
            agent.timers.push(timer);
        }
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Committed view of one live agent.
    pub fn snapshot(&self, id: AgentId) -> SimResult<AgentSnapshot<'_>> {
        self.slot(id).map(SceneAgent::snapshot).ok_or(SimError::AgentNotFound(id))
    }

    /// Every live agent, ascending `AgentId`.
    pub fn snapshots(&self) -> Vec<AgentSnapshot<'_>> {
        self.live().map(SceneAgent::snapshot).collect()
    }

    /// Motion state of a live agent.
    pub fn agent_state(&self, id: AgentId) -> SimResult<&AgentState> {
        self.slot(id).map(|a| &a.state).ok_or(SimError::AgentNotFound(id))
    }

    /// Replace the floating label of a live agent.
    pub fn set_caption(&mut self, id: AgentId, caption: Option<String>) -> SimResult<()> {
        let agent = self.slot_mut(id).ok_or(SimError::AgentNotFound(id))?;
        agent.caption = caption;
        Ok(())
    }

    /// Look up a live agent by name.
    pub fn find(&self, name: &str) -> Option<AgentId> {
        self.live().find(|a| a.name == name).map(|a| a.id)
    }

    pub fn is_alive(&self, id: AgentId) -> bool {
        self.slot(id).is_some()
    }

    pub fn live_count(&self) -> usize {
        self.live().count()
    }

    /// Timers waiting to fire, across all agents.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    fn live(&self) -> impl Iterator<Item = &SceneAgent> {
        self.agents.iter().flatten()
    }

    fn slot(&self, id: AgentId) -> Option<&SceneAgent> {
        self.agents.get(id.index()).and_then(Option::as_ref)
    }

    fn slot_mut(&mut self, id: AgentId) -> Option<&mut SceneAgent> {
        self.agents.get_mut(id.index()).and_then(Option::as_mut)
    }
}

impl<B: BehaviorModel, S: SteeringField> Drop for Scene<B, S> {
    fn drop(&mut self) {
        let live: Vec<AgentId> = self.live().map(|a| a.id).collect();
        for id in live {
            if let Err(e) = self.despawn(id) {
                warn!(agent = %id, error = %e, "teardown failed");
            }
        }
    }
}
