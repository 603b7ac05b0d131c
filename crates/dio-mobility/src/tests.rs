//! Unit tests for dio-mobility.

use std::sync::Arc;

use dio_behavior::{Behavior, BehaviorDecision};
use dio_core::{NavTuning, Vec3, math::horizontal_distance};
use dio_spatial::{ObstacleRegistry, Platform, SurfaceRegistry};

use crate::{
    AgentState, MobilityEngine, MotionIntegrator, MotionOutcome, NoSteering, ObstacleRepulsion,
    SteeringField, StuckDetector,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Steering that exactly cancels the goal step: the agent never moves.
struct CancelGoal;

impl SteeringField for CancelGoal {
    fn steer(&self, _position: Vec3, goal_step: Vec3) -> Vec3 {
        -goal_step
    }
}

fn walking_to(position: Vec3, target: Vec3) -> AgentState {
    let mut state = AgentState::idle_at(position);
    state.apply_decision(&BehaviorDecision::walk(Behavior::Walk1, target));
    state
}

fn engine<S: SteeringField>(steering: S) -> MobilityEngine<S> {
    MobilityEngine::from_tuning(&NavTuning::default(), steering).unwrap()
}

// ── AgentState ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod state_tests {
    use super::*;

    #[test]
    fn idle_at_is_consistent() {
        let s = AgentState::idle_at(Vec3::new(1.0, 0.0, 2.0));
        assert_eq!(s.behavior(), Behavior::Idle);
        assert_eq!(s.target(), None);
        assert!(s.is_consistent());
    }

    #[test]
    fn walk_decision_sets_target_and_faces_it() {
        let s = walking_to(Vec3::ZERO, Vec3::new(3.0, 0.0, 0.0));
        assert_eq!(s.behavior(), Behavior::Walk1);
        assert_eq!(s.target(), Some(Vec3::new(3.0, 0.0, 0.0)));
        assert!((s.yaw - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert!(s.is_consistent());
    }

    #[test]
    fn decision_resets_stuck_counter() {
        let mut s = walking_to(Vec3::ZERO, Vec3::X);
        s.stuck_ticks = 42;
        s.apply_decision(&BehaviorDecision::idle(Some(4.0)));
        assert_eq!(s.stuck_ticks, 0);
        assert!(s.is_consistent());
    }

    #[test]
    fn walk_without_destination_applies_as_idle() {
        let mut s = AgentState::idle_at(Vec3::ZERO);
        let mut bogus = BehaviorDecision::walk(Behavior::Walk3, Vec3::X);
        bogus.destination = None;
        s.apply_decision(&bogus);
        assert_eq!(s.behavior(), Behavior::Idle);
        assert!(s.is_consistent());
    }

    #[test]
    fn idle_with_destination_applies_as_idle() {
        let mut s = AgentState::idle_at(Vec3::ZERO);
        let mut bogus = BehaviorDecision::idle(None);
        bogus.destination = Some(Vec3::X);
        s.apply_decision(&bogus);
        assert_eq!(s.target(), None);
        assert!(s.is_consistent());
    }
}

// ── MotionIntegrator ──────────────────────────────────────────────────────────

#[cfg(test)]
mod integrator_tests {
    use super::*;

    #[test]
    fn ten_units_take_exactly_five_hundred_ticks() {
        let integrator = MotionIntegrator::new(0.02);
        let mut s = walking_to(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0));

        let mut ticks = 0;
        loop {
            ticks += 1;
            let outcome = integrator.advance(&mut s, &NoSteering);
            assert!(s.position.x <= 10.0, "overshot on tick {ticks}: {}", s.position.x);
            if outcome == MotionOutcome::Arrived {
                break;
            }
            assert!(ticks < 1_000, "never arrived");
        }
        assert_eq!(ticks, 500);
        assert_eq!(s.position, Vec3::new(10.0, 0.0, 0.0));
        assert_eq!(s.behavior(), Behavior::Idle);

        // Tick 501 does nothing.
        assert_eq!(integrator.advance(&mut s, &NoSteering), MotionOutcome::Idle);
        assert_eq!(s.position, Vec3::new(10.0, 0.0, 0.0));
    }

    #[test]
    fn within_one_step_never_moves_away() {
        let integrator = MotionIntegrator::new(0.02);
        let target = Vec3::new(1.0, 0.0, 1.0);
        for i in 0..20 {
            let angle = i as f64 * 0.3;
            let r = 0.001 * i as f64;
            let start = target + Vec3::new(r * angle.cos(), 0.0, r * angle.sin());
            let mut s = walking_to(start, target);
            let before = horizontal_distance(s.position, target);
            integrator.advance(&mut s, &NoSteering);
            assert!(horizontal_distance(s.position, target) <= before);
            assert_eq!(horizontal_distance(s.position, target), 0.0);
        }
    }

    #[test]
    fn arrival_ignores_steering() {
        let obstacles = Arc::new(ObstacleRegistry::new([Vec3::new(0.05, 0.0, 0.0)]).unwrap());
        let field = ObstacleRepulsion::new(obstacles, 1.2, 10.0);
        let integrator = MotionIntegrator::new(0.02);
        let mut s = walking_to(Vec3::new(0.01, 0.0, 0.0), Vec3::ZERO);
        assert_eq!(integrator.advance(&mut s, &field), MotionOutcome::Arrived);
        assert_eq!(s.position, Vec3::ZERO);
    }

    #[test]
    fn arrival_keeps_height() {
        let integrator = MotionIntegrator::new(0.02);
        let mut s = walking_to(Vec3::new(0.0, 0.3, 0.0), Vec3::new(0.01, 0.0, 0.0));
        integrator.advance(&mut s, &NoSteering);
        assert_eq!(s.position, Vec3::new(0.01, 0.3, 0.0));
    }

    #[test]
    fn step_is_horizontal() {
        let integrator = MotionIntegrator::new(0.02);
        let mut s = walking_to(Vec3::new(0.0, 0.5, 0.0), Vec3::new(0.0, 3.0, 5.0));
        let outcome = integrator.advance(&mut s, &NoSteering);
        assert_eq!(outcome, MotionOutcome::Moved { step: Vec3::new(0.0, 0.0, 0.02) });
        assert_eq!(s.position.y, 0.5);
    }

    #[test]
    fn faces_the_step_not_the_target() {
        // The obstacle sits left of the path and pushes the agent towards +x
        // while it heads for +z.
        let obstacles = Arc::new(ObstacleRegistry::new([Vec3::new(-0.5, 0.0, 0.0)]).unwrap());
        let field = ObstacleRepulsion::new(obstacles, 1.2, 0.05);
        let integrator = MotionIntegrator::new(0.02);
        let mut s = walking_to(Vec3::ZERO, Vec3::new(0.0, 0.0, 5.0));
        assert_eq!(s.yaw, 0.0);

        let MotionOutcome::Moved { step } = integrator.advance(&mut s, &field) else {
            panic!("expected a step");
        };
        assert!(step.x > 0.0);
        assert!(s.yaw > 0.0);
        assert!((s.yaw - step.x.atan2(step.z)).abs() < 1e-12);
    }

    #[test]
    fn idle_agent_stays() {
        let integrator = MotionIntegrator::default();
        let mut s = AgentState::idle_at(Vec3::ONE);
        assert_eq!(integrator.advance(&mut s, &NoSteering), MotionOutcome::Idle);
        assert_eq!(s.position, Vec3::ONE);
    }
}

// ── Steering ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod steering_tests {
    use super::*;

    fn origin_field(gain: f64) -> ObstacleRepulsion {
        let obstacles = Arc::new(ObstacleRegistry::new([Vec3::ZERO]).unwrap());
        ObstacleRepulsion::new(obstacles, 1.2, gain)
    }

    #[test]
    fn pushes_away_proportionally_to_intrusion() {
        let field = origin_field(0.05);
        let push = field.repulsion(Vec3::new(0.2, 0.0, 0.0));
        assert!((push.x - 0.05).abs() < 1e-12);
        assert_eq!(push.y, 0.0);
        assert_eq!(push.z, 0.0);

        let deeper = field.repulsion(Vec3::new(0.0, 0.0, -0.1));
        assert!((deeper.z + 0.055).abs() < 1e-12);
    }

    #[test]
    fn nothing_outside_clearance() {
        let field = origin_field(0.05);
        assert_eq!(field.repulsion(Vec3::new(1.5, 0.0, 0.0)), Vec3::ZERO);
        assert_eq!(field.repulsion(Vec3::new(1.2, 0.0, 0.0)), Vec3::ZERO);
    }

    #[test]
    fn height_does_not_matter() {
        let field = origin_field(0.05);
        let low = field.repulsion(Vec3::new(0.2, 0.0, 0.0));
        let high = field.repulsion(Vec3::new(0.2, 2.0, 0.0));
        assert_eq!(low, high);
    }

    #[test]
    fn symmetric_obstacles_cancel() {
        let obstacles = Arc::new(
            ObstacleRegistry::new([Vec3::new(-0.5, 0.0, 0.0), Vec3::new(0.5, 0.0, 0.0)]).unwrap(),
        );
        let field = ObstacleRepulsion::new(obstacles, 1.2, 0.05);
        assert!(field.repulsion(Vec3::ZERO).length() < 1e-12);
    }

    #[test]
    fn cap_limits_magnitude() {
        let field = origin_field(1.0).with_cap(0.01);
        let push = field.repulsion(Vec3::new(0.1, 0.0, 0.0));
        assert!((push.length() - 0.01).abs() < 1e-12);
        assert!(push.x > 0.0);
    }

    #[test]
    fn standing_on_obstacle_gets_no_push() {
        let field = origin_field(0.05);
        assert_eq!(field.repulsion(Vec3::ZERO), Vec3::ZERO);
    }
}

// ── StuckDetector ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod stuck_tests {
    use super::*;

    #[test]
    fn unreachable_target_forces_decision_within_61_ticks() {
        let engine = engine(CancelGoal);
        let surfaces = SurfaceRegistry::new();
        let mut s = walking_to(Vec3::ZERO, Vec3::new(4.0, 0.0, 0.0));

        let mut fired_at = None;
        for tick in 1..=61 {
            let report = engine.step(&mut s, &surfaces);
            if report.stuck {
                assert!(report.needs_decision());
                fired_at = Some(tick);
                break;
            }
        }
        assert_eq!(fired_at, Some(61));
        assert_eq!(s.target(), None);
        assert_eq!(s.behavior(), Behavior::Idle);
        assert_eq!(s.stuck_ticks, 0);
    }

    #[test]
    fn movement_resets_counter() {
        let detector = StuckDetector::new(0.001, 60);
        let mut s = walking_to(Vec3::ZERO, Vec3::new(4.0, 0.0, 0.0));
        for _ in 0..10 {
            assert!(!detector.observe(&mut s));
        }
        assert_eq!(s.stuck_ticks, 10);
        s.position.x += 0.02;
        assert!(!detector.observe(&mut s));
        assert_eq!(s.stuck_ticks, 0);
    }

    #[test]
    fn moving_exactly_epsilon_is_not_progress() {
        let detector = StuckDetector::new(0.25, 60);
        let mut s = walking_to(Vec3::ZERO, Vec3::new(4.0, 0.0, 0.0));
        s.position.x = 0.25;
        assert!(!detector.observe(&mut s));
        assert_eq!(s.stuck_ticks, 1);
        s.position.x = 0.5 + 1e-6;
        assert!(!detector.observe(&mut s));
        assert_eq!(s.stuck_ticks, 0);
    }

    #[test]
    fn vertical_motion_is_not_progress() {
        let detector = StuckDetector::new(0.001, 60);
        let mut s = walking_to(Vec3::ZERO, Vec3::new(4.0, 0.0, 0.0));
        s.position.y += 0.5;
        assert!(!detector.observe(&mut s));
        assert_eq!(s.stuck_ticks, 1);
    }

    #[test]
    fn normal_walk_never_stalls() {
        let engine = engine(NoSteering);
        let surfaces = SurfaceRegistry::new();
        let mut s = walking_to(Vec3::ZERO, Vec3::new(4.0, 0.0, 0.0));
        for _ in 0..199 {
            let report = engine.step(&mut s, &surfaces);
            assert!(!report.stuck);
            assert_eq!(s.stuck_ticks, 0);
        }
        assert!(engine.step(&mut s, &surfaces).needs_decision());
    }
}

// ── MobilityEngine ────────────────────────────────────────────────────────────

#[cfg(test)]
mod engine_tests {
    use super::*;

    #[test]
    fn climbs_onto_walkable_platform() {
        let engine = engine(NoSteering);
        let mut surfaces = SurfaceRegistry::new();
        surfaces.add("stump", true, Platform::new(-1.0, -1.0, 1.0, 1.0, 0.5).unwrap());
        let mut s = walking_to(Vec3::ZERO, Vec3::new(0.0, 0.0, 0.9));

        engine.step(&mut s, &surfaces);
        assert!((s.position.y - 0.1).abs() < 1e-12);
        for _ in 0..30 {
            let before = s.position.y;
            engine.step(&mut s, &surfaces);
            assert!(s.position.y >= before);
            assert!(s.position.y <= 0.5);
        }
    }

    #[test]
    fn idle_agent_still_follows_ground() {
        let engine = engine(NoSteering);
        let surfaces = SurfaceRegistry::new();
        let mut s = AgentState::idle_at(Vec3::new(0.0, 1.0, 0.0));
        let report = engine.step(&mut s, &surfaces);
        assert_eq!(report.motion, MotionOutcome::Idle);
        assert!(!report.needs_decision());
        assert!((s.position.y - 0.8).abs() < 1e-12);
    }

    #[test]
    fn invalid_tuning_rejected() {
        let tuning = NavTuning { step_size: 0.0, ..NavTuning::default() };
        assert!(MobilityEngine::from_tuning(&tuning, NoSteering).is_err());
    }
}
