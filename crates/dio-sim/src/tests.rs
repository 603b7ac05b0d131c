//! Unit tests for dio-sim.

use dio_behavior::{
    Behavior, BehaviorDecision, BehaviorModel, DecisionContext, NoopBehavior, WanderModel,
};
use dio_core::{AgentId, AgentRng, NavTuning, SceneConfig, Tick, Vec3};
use dio_mobility::SteeringField;
use dio_schedule::{Hold, Routine, RoutineStep};
use dio_spatial::{Disc, Platform};

use crate::{
    AgentRole, AgentSnapshot, ClipSet, NoopObserver, PlayerCall, SceneBuilder, SceneObserver,
    SimError,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn config(total_ticks: u64) -> SceneConfig {
    SceneConfig {
        tick_rate_hz:         60,
        total_ticks,
        seed:                 7,
        trace_interval_ticks: 1,
    }
}

fn wanderer_clips() -> ClipSet {
    ClipSet::new(["idle01", "walk01", "walk02", "walk03"])
}

fn fade(name: &str) -> PlayerCall {
    PlayerCall::CrossFade { name: name.into(), fade_secs: 0.5 }
}

/// Walk to a fixed point on the first decision, then idle for good.
struct WalkThenRest {
    to: Vec3,
}

impl BehaviorModel for WalkThenRest {
    fn decide(&self, _agent: AgentId, ctx: &DecisionContext<'_>, _rng: &mut AgentRng) -> BehaviorDecision {
        match ctx.previous {
            None => BehaviorDecision::walk(Behavior::Walk1, self.to).with_animation("walk01"),
            Some(_) => BehaviorDecision::idle(None).with_animation("idle01"),
        }
    }
}

/// Idle with a fixed dwell, forever.
struct AlwaysIdle(f64);

impl BehaviorModel for AlwaysIdle {
    fn decide(&self, _agent: AgentId, _ctx: &DecisionContext<'_>, _rng: &mut AgentRng) -> BehaviorDecision {
        BehaviorDecision::idle(Some(self.0))
    }
}

/// Steering that cancels every goal step.
struct CancelGoal;

impl SteeringField for CancelGoal {
    fn steer(&self, _position: Vec3, goal_step: Vec3) -> Vec3 {
        -goal_step
    }
}

/// Records decisions and checks the target/behavior pairing at every commit.
#[derive(Default)]
struct Recorder {
    decisions:    Vec<(Tick, AgentId, Behavior)>,
    commits:      u64,
    violations:   usize,
    tick_starts:  u64,
    tick_ends:    u64,
    ended_at:     Option<Tick>,
}

impl SceneObserver for Recorder {
    fn on_tick_start(&mut self, _tick: Tick) {
        self.tick_starts += 1;
    }

    fn on_decision(&mut self, tick: Tick, agent: AgentId, decision: &BehaviorDecision) {
        self.decisions.push((tick, agent, decision.behavior));
    }

    fn on_commit(&mut self, _tick: Tick, agents: &[AgentSnapshot<'_>]) {
        self.commits += 1;
        for a in agents {
            if let Some(b) = a.behavior {
                if a.target.is_some() != b.is_walk() {
                    self.violations += 1;
                }
            }
        }
    }

    fn on_tick_end(&mut self, _tick: Tick, _decisions: usize) {
        self.tick_ends += 1;
    }

    fn on_scene_end(&mut self, final_tick: Tick) {
        self.ended_at = Some(final_tick);
    }
}

impl Recorder {
    fn decision_ticks(&self) -> Vec<u64> {
        self.decisions.iter().map(|(t, _, _)| t.0).collect()
    }
}

fn mint_routine() -> Routine {
    Routine::new(vec![
        RoutineStep::new("sleepidle", Hold::Fixed(2.0), 0.5),
        RoutineStep::new("sleeping", Hold::Fixed(1.0), 0.5),
    ])
    .unwrap()
}

// ── Tick loop ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loop_tests {
    use super::*;

    #[test]
    fn invariant_holds_at_every_commit() {
        let tuning = NavTuning::default();
        let mut scene = SceneBuilder::new(config(3_600), WanderModel::from_tuning(&tuning))
            .tuning(tuning)
            .obstacle(Vec3::ZERO)
            .performer("Kariage", Vec3::new(2.5, 0.0, -1.5), 0.0, Routine::hold_forever("sitting", 0.5).unwrap(), ClipSet::new(["sitting"]))
            .wanderer("Hedoban", Vec3::new(-1.0, 0.0, 3.0), wanderer_clips())
            .build()
            .unwrap();

        let mut rec = Recorder::default();
        scene.run(&mut rec).unwrap();

        assert_eq!(rec.violations, 0);
        assert_eq!(rec.commits, 3_600);
        assert!(rec.decisions.len() > 2, "only {} decisions", rec.decisions.len());
        for pair in rec.decisions.windows(2) {
            assert_ne!(pair[0].2, pair[1].2, "repeated behavior at {}", pair[1].0);
        }
    }

    #[test]
    fn observer_hooks_bracket_each_tick() {
        let mut scene = SceneBuilder::new(config(10), NoopBehavior)
            .wanderer("w", Vec3::ZERO, wanderer_clips())
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        scene.run(&mut rec).unwrap();
        assert_eq!(rec.tick_starts, 10);
        assert_eq!(rec.tick_ends, 10);
        assert_eq!(rec.ended_at, Some(Tick(10)));
        assert_eq!(scene.clock.current_tick, Tick(10));
    }

    #[test]
    fn first_decision_on_first_tick() {
        let tuning = NavTuning::default();
        let mut scene = SceneBuilder::new(config(100), WanderModel::from_tuning(&tuning))
            .wanderer("w", Vec3::new(3.0, 0.0, 0.0), wanderer_clips())
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        scene.run_ticks(1, &mut rec).unwrap();
        assert_eq!(rec.decision_ticks(), vec![0]);
    }

    #[test]
    fn idle_dwell_schedules_next_decision() {
        let mut scene = SceneBuilder::new(config(1_000), AlwaysIdle(4.0))
            .wanderer("w", Vec3::ZERO, wanderer_clips())
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        scene.run_ticks(481, &mut rec).unwrap();
        assert_eq!(rec.decision_ticks(), vec![0, 240, 480]);
        assert_eq!(scene.pending_timers(), 1);
    }

    #[test]
    fn huge_idle_dwell_waits_instead_of_wrapping() {
        let tuning = NavTuning { idle_dwell_secs: 1e18, ..NavTuning::default() };
        tuning.validate().unwrap();
        let mut scene = SceneBuilder::new(config(3_600), WanderModel::from_tuning(&tuning))
            .tuning(tuning)
            .wanderer("w", Vec3::ZERO, wanderer_clips())
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        scene.run(&mut rec).unwrap();

        // Once the wanderer idles it never decides again within the run.
        let first_idle = rec.decisions.iter().position(|(_, _, b)| *b == Behavior::Idle);
        if let Some(i) = first_idle {
            assert_eq!(i, rec.decisions.len() - 1);
            assert_eq!(scene.pending_timers(), 1);
        }
        assert!(!rec.decisions.is_empty());
    }

    #[test]
    fn huge_idle_dwell_from_model() {
        let mut scene = SceneBuilder::new(config(100), AlwaysIdle(1e18))
            .wanderer("w", Vec3::ZERO, wanderer_clips())
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        scene.run_ticks(100, &mut rec).unwrap();
        assert_eq!(rec.decision_ticks(), vec![0]);
        assert_eq!(scene.pending_timers(), 1);
    }

    #[test]
    fn arrival_decides_in_the_same_tick() {
        let model = WalkThenRest { to: Vec3::new(0.2, 0.0, 0.0) };
        let mut scene = SceneBuilder::new(config(100), model)
            .wanderer("w", Vec3::ZERO, wanderer_clips())
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        scene.run_ticks(20, &mut rec).unwrap();

        assert_eq!(rec.decision_ticks(), vec![0, 9]);
        assert_eq!(rec.violations, 0);
        let id = scene.find("w").unwrap();
        let snap = scene.snapshot(id).unwrap();
        assert_eq!(snap.position, Vec3::new(0.2, 0.0, 0.0));
        assert_eq!(snap.behavior, Some(Behavior::Idle));
        assert_eq!(snap.target, None);
        assert_eq!(snap.animation, Some("idle01"));
    }

    #[test]
    fn stuck_walk_is_abandoned() {
        let model = WalkThenRest { to: Vec3::new(3.0, 0.0, 0.0) };
        let mut scene = SceneBuilder::new(config(200), model)
            .wanderer("w", Vec3::ZERO, wanderer_clips())
            .build_with(|_, _| CancelGoal)
            .unwrap();
        let mut rec = Recorder::default();
        scene.run_ticks(120, &mut rec).unwrap();

        assert_eq!(rec.decision_ticks(), vec![0, 60]);
        let state = scene.agent_state(AgentId(0)).unwrap();
        assert_eq!(state.behavior(), Behavior::Idle);
        assert_eq!(state.position, Vec3::ZERO);
    }

    #[test]
    fn seeded_runs_are_identical() {
        fn run() -> Vec<Vec3> {
            let tuning = NavTuning::default();
            let mut scene = SceneBuilder::new(config(900), WanderModel::from_tuning(&tuning))
                .obstacle(Vec3::ZERO)
                .wanderer("a", Vec3::new(3.0, 0.0, 0.0), wanderer_clips())
                .wanderer("b", Vec3::new(-3.0, 0.0, 0.0), wanderer_clips())
                .build()
                .unwrap();
            scene.run(&mut NoopObserver).unwrap();
            scene.snapshots().iter().map(|s| s.position).collect()
        }
        assert_eq!(run(), run());
    }
}

// ── Routines ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod routine_tests {
    use super::*;

    #[test]
    fn routine_steps_follow_their_holds() {
        let clips = ClipSet::new(["sleepidle", "sleeping"]);
        let journal = clips.journal();
        let mut scene = SceneBuilder::new(config(1_000), NoopBehavior)
            .performer("Mint", Vec3::new(-2.5, 0.0, 1.5), 0.0, mint_routine(), clips)
            .build()
            .unwrap();

        scene.run_ticks(120, &mut NoopObserver).unwrap();
        assert_eq!(journal.calls(), vec![fade("sleepidle")]);

        scene.run_ticks(1, &mut NoopObserver).unwrap();
        assert_eq!(journal.calls(), vec![fade("sleepidle"), fade("sleeping")]);
        let id = scene.find("Mint").unwrap();
        assert_eq!(scene.snapshot(id).unwrap().animation, Some("sleeping"));

        scene.run_ticks(60, &mut NoopObserver).unwrap();
        assert_eq!(
            journal.calls(),
            vec![fade("sleepidle"), fade("sleeping"), fade("sleepidle")]
        );
    }

    #[test]
    fn huge_hold_keeps_the_first_step() {
        let routine = Routine::new(vec![
            RoutineStep::new("sleepidle", Hold::Fixed(1e18), 0.5),
            RoutineStep::new("sleeping", Hold::Fixed(1.0), 0.5),
        ])
        .unwrap();
        let clips = ClipSet::new(["sleepidle", "sleeping"]);
        let journal = clips.journal();
        let mut scene = SceneBuilder::new(config(1_000), NoopBehavior).build().unwrap();
        scene.run_ticks(1, &mut NoopObserver).unwrap();
        scene.spawn_performer("Mint", Vec3::new(-2.5, 0.0, 1.5), 0.0, routine, clips);

        scene.run_ticks(600, &mut NoopObserver).unwrap();
        assert_eq!(journal.calls(), vec![fade("sleepidle")]);
        assert_eq!(scene.pending_timers(), 1);
    }

    #[test]
    fn forever_hold_leaves_no_timer() {
        let clips = ClipSet::new(["sitting"]);
        let journal = clips.journal();
        let mut scene = SceneBuilder::new(config(100), NoopBehavior)
            .performer("Kariage", Vec3::new(2.5, 0.0, -1.5), 0.0, Routine::hold_forever("sitting", 0.5).unwrap(), clips)
            .build()
            .unwrap();
        scene.run_ticks(100, &mut NoopObserver).unwrap();
        assert_eq!(journal.calls(), vec![fade("sitting")]);
        assert_eq!(scene.pending_timers(), 0);
    }

    #[test]
    fn unknown_clip_is_skipped() {
        let clips = ClipSet::new(["idle01"]);
        let journal = clips.journal();
        let mut scene = SceneBuilder::new(config(10), NoopBehavior)
            .performer("Red", Vec3::new(0.0, 0.0, 2.5), 0.0, Routine::hold_forever("dance", 0.5).unwrap(), clips)
            .build()
            .unwrap();
        scene.run_ticks(5, &mut NoopObserver).unwrap();
        assert!(journal.calls().is_empty());
        let snap = scene.snapshot(AgentId(0)).unwrap();
        assert_eq!(snap.animation, None);
        assert_eq!(snap.role, AgentRole::Performer);
        assert_eq!(snap.behavior, None);
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod player_tests {
    use super::*;
    use crate::AnimationPlayer;

    #[test]
    fn journal_survives_a_poisoned_lock() {
        let mut clips = ClipSet::new(["sitting", "idle01"]);
        let journal = clips.journal();
        clips.cross_fade("sitting", 0.5);

        let shared = journal.clone();
        let poisoned = std::thread::spawn(move || {
            let _held = shared.0.lock().unwrap();
            panic!("panic while holding the journal");
        })
        .join();
        assert!(poisoned.is_err());
        assert!(journal.0.is_poisoned());

        clips.cross_fade("idle01", 0.5);
        assert_eq!(journal.calls(), vec![fade("sitting"), fade("idle01")]);
        assert_eq!(clips.playing(), Some("idle01"));
    }
}

// ── Lifecycle ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod lifecycle_tests {
    use super::*;

    #[test]
    fn despawn_cancels_timers_and_fades_out() {
        let clips = ClipSet::new(["sleepidle", "sleeping"]);
        let journal = clips.journal();
        let mut scene = SceneBuilder::new(config(1_000), NoopBehavior)
            .performer("Mint", Vec3::new(-2.5, 0.0, 1.5), 0.0, mint_routine(), clips)
            .build()
            .unwrap();
        scene.run_ticks(1, &mut NoopObserver).unwrap();
        assert_eq!(scene.pending_timers(), 1);

        let id = scene.find("Mint").unwrap();
        scene.despawn(id).unwrap();
        assert_eq!(scene.pending_timers(), 0);
        assert!(!scene.is_alive(id));
        assert_eq!(
            journal.calls().last(),
            Some(&PlayerCall::FadeOut { name: "sleepidle".into(), fade_secs: 0.5 })
        );

        scene.run_ticks(300, &mut NoopObserver).unwrap();
        assert_eq!(journal.calls().len(), 2, "nothing plays after despawn");
        assert!(matches!(scene.despawn(id), Err(SimError::AgentNotFound(_))));
    }

    #[test]
    fn idle_wanderer_timer_cancelled_on_despawn() {
        let mut scene = SceneBuilder::new(config(1_000), AlwaysIdle(4.0))
            .wanderer("w", Vec3::ZERO, wanderer_clips())
            .build()
            .unwrap();
        scene.run_ticks(1, &mut NoopObserver).unwrap();
        assert_eq!(scene.pending_timers(), 1);
        scene.despawn(AgentId(0)).unwrap();
        assert_eq!(scene.pending_timers(), 0);
        assert_eq!(scene.live_count(), 0);
    }

    #[test]
    fn dropping_the_scene_tears_everything_down() {
        let mint = ClipSet::new(["sleepidle", "sleeping"]);
        let walker = wanderer_clips();
        let (mint_log, walker_log) = (mint.journal(), walker.journal());
        let mut scene = SceneBuilder::new(config(100), WalkThenRest { to: Vec3::new(1.0, 0.0, 0.0) })
            .performer("Mint", Vec3::new(-2.5, 0.0, 1.5), 0.0, mint_routine(), mint)
            .wanderer("w", Vec3::ZERO, walker)
            .build()
            .unwrap();
        scene.run_ticks(5, &mut NoopObserver).unwrap();
        drop(scene);

        assert!(matches!(mint_log.calls().last(), Some(PlayerCall::FadeOut { name, .. }) if name == "sleepidle"));
        assert!(matches!(walker_log.calls().last(), Some(PlayerCall::FadeOut { name, .. }) if name == "walk01"));
    }

    #[test]
    fn spawned_later_starts_next_tick() {
        let mut scene = SceneBuilder::new(config(100), AlwaysIdle(1.0)).build().unwrap();
        scene.run_ticks(10, &mut NoopObserver).unwrap();
        let id = scene.spawn_wanderer("late", Vec3::ZERO, wanderer_clips());
        let mut rec = Recorder::default();
        scene.run_ticks(1, &mut rec).unwrap();
        assert_eq!(rec.decisions, vec![(Tick(10), id, Behavior::Idle)]);
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn performers_become_obstacles() {
        let scene = SceneBuilder::new(config(10), NoopBehavior)
            .obstacle(Vec3::ZERO)
            .performer("Yellow", Vec3::new(1.5, 0.0, 0.5), 0.0, Routine::hold_forever("idle01", 0.5).unwrap(), ClipSet::new(["idle01"]))
            .wanderer("w", Vec3::new(-3.0, 0.0, 0.0), wanderer_clips())
            .build()
            .unwrap();
        assert_eq!(scene.obstacles.len(), 2);
        assert!(!scene.obstacles.is_clear(Vec3::new(1.5, 0.0, 1.0), 1.2));
    }

    #[test]
    fn duplicate_names_rejected() {
        let result = SceneBuilder::new(config(10), NoopBehavior)
            .wanderer("twin", Vec3::ZERO, wanderer_clips())
            .wanderer("twin", Vec3::ONE, wanderer_clips())
            .build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn bad_tuning_rejected() {
        let tuning = NavTuning { height_smoothing: 0.0, ..NavTuning::default() };
        let result = SceneBuilder::new(config(10), NoopBehavior).tuning(tuning).build();
        assert!(matches!(result, Err(SimError::Mobility(_))));
    }

    #[test]
    fn non_finite_obstacle_rejected() {
        let result = SceneBuilder::new(config(10), NoopBehavior)
            .obstacle(Vec3::new(f64::NAN, 0.0, 0.0))
            .build();
        assert!(matches!(result, Err(SimError::Spatial(_))));
    }
}

// ── Ground ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod ground_tests {
    use super::*;

    #[test]
    fn idle_wanderer_settles_onto_walkable_surface() {
        let mut scene = SceneBuilder::new(config(100), NoopBehavior)
            .surface("stump", true, Platform::new(-5.0, -5.0, 5.0, 5.0, 0.5).unwrap())
            .surface("trunk", false, Disc::new(0.0, 0.0, 0.3, 1.0).unwrap())
            .wanderer("w", Vec3::ZERO, wanderer_clips())
            .build()
            .unwrap();

        let mut last = 0.0;
        for _ in 0..30 {
            scene.run_ticks(1, &mut NoopObserver).unwrap();
            let y = scene.agent_state(AgentId(0)).unwrap().position.y;
            assert!(y >= last && y <= 0.5);
            last = y;
        }
        assert!(last > 0.49, "settled at {last}");
    }
}
