//! Steering contributions added to the goal-seeking step.
//!
//! The integrator computes the straight step towards the target and asks a
//! [`SteeringField`] what to add to it.  Swap the field to change how agents
//! avoid things; a test double can cancel the goal step outright.

use std::sync::Arc;

use dio_core::{NavTuning, Vec3, math::horizontal};
use dio_spatial::ObstacleRegistry;

/// Extra displacement applied on top of the goal step each tick.
pub trait SteeringField: Send + Sync {
    /// `goal_step` is the horizontal, `step_size`-long step towards the
    /// target.  Only the horizontal part of the result is used.
    fn steer(&self, position: Vec3, goal_step: Vec3) -> Vec3;
}

impl<S: SteeringField + ?Sized> SteeringField for Arc<S> {
    fn steer(&self, position: Vec3, goal_step: Vec3) -> Vec3 {
        (**self).steer(position, goal_step)
    }
}

// ── NoSteering ────────────────────────────────────────────────────────────────

/// Straight-line motion.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoSteering;

impl SteeringField for NoSteering {
    fn steer(&self, _position: Vec3, _goal_step: Vec3) -> Vec3 {
        Vec3::ZERO
    }
}

// ── ObstacleRepulsion ─────────────────────────────────────────────────────────

/// Push away from every obstacle closer than `clearance`.
///
/// Each such obstacle contributes the horizontal unit vector pointing away
/// from it, scaled by `gain · (clearance − distance)`.  The contributions
/// are summed and, if `cap` is set, the sum is shortened to at most `cap`.
/// An agent standing exactly on an obstacle gets no push from it.
#[derive(Clone, Debug)]
pub struct ObstacleRepulsion {
    pub obstacles: Arc<ObstacleRegistry>,
    pub clearance: f64,
    pub gain:      f64,
    pub cap:       Option<f64>,
}

impl ObstacleRepulsion {
    pub fn new(obstacles: Arc<ObstacleRegistry>, clearance: f64, gain: f64) -> Self {
        Self { obstacles, clearance, gain, cap: None }
    }

    pub fn from_tuning(obstacles: Arc<ObstacleRegistry>, tuning: &NavTuning) -> Self {
        Self {
            obstacles,
            clearance: tuning.clearance,
            gain:      tuning.repulsion_gain,
            cap:       tuning.repulsion_cap,
        }
    }

    pub fn with_cap(mut self, cap: f64) -> Self {
        self.cap = Some(cap);
        self
    }

    /// The summed push at `position`.
    pub fn repulsion(&self, position: Vec3) -> Vec3 {
        let mut total = Vec3::ZERO;
        for (obstacle, distance) in self.obstacles.within(position, self.clearance) {
            if distance <= 0.0 || distance >= self.clearance {
                continue;
            }
            let away = horizontal(position - obstacle) / distance;
            total += away * (self.gain * (self.clearance - distance));
        }
        match self.cap {
            Some(cap) => total.clamp_length_max(cap),
            None => total,
        }
    }
}

impl SteeringField for ObstacleRepulsion {
    fn steer(&self, position: Vec3, _goal_step: Vec3) -> Vec3 {
        self.repulsion(position)
    }
}
