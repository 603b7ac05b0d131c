//! Destination sampling.
//!
//! Destinations are anchored to the world origin, not to the agent: the
//! "action area" is a fixed disk on the ground, so a wanderer drifts around
//! the middle of the scene instead of random-walking off its edge.

use dio_core::{AgentRng, NavTuning, Vec3};
use dio_spatial::ObstacleRegistry;

/// Samples walk destinations that keep clear of every obstacle.
#[derive(Clone, Debug, PartialEq)]
pub struct TargetSelector {
    /// Radius of the disk around the origin that destinations come from.
    pub radius:       f64,
    /// Required horizontal gap to every obstacle (strict).
    pub clearance:    f64,
    pub max_attempts: u32,
}

impl TargetSelector {
    pub fn new(radius: f64, clearance: f64, max_attempts: u32) -> Self {
        Self { radius, clearance, max_attempts }
    }

    pub fn from_tuning(tuning: &NavTuning) -> Self {
        Self::new(tuning.action_radius, tuning.clearance, tuning.max_target_attempts)
    }

    /// First clear sample within the attempt budget, or `None`.
    ///
    /// A zero radius or an empty registry accepts the first sample as is.
    pub fn try_select(&self, obstacles: &ObstacleRegistry, rng: &mut AgentRng) -> Option<Vec3> {
        let accept_any = self.radius <= 0.0 || obstacles.is_empty();
        for _ in 0..self.max_attempts.max(1) {
            let (x, z) = rng.sample_in_disk(self.radius);
            let candidate = Vec3::new(x, 0.0, z);
            if accept_any || obstacles.is_clear(candidate, self.clearance) {
                return Some(candidate);
            }
        }
        None
    }

    /// Like [`try_select`](Self::try_select), but falls back to `current`
    /// (a "stay put" target) when every attempt is rejected.
    pub fn select(&self, current: Vec3, obstacles: &ObstacleRegistry, rng: &mut AgentRng) -> Vec3 {
        self.try_select(obstacles, rng).unwrap_or(current)
    }
}

/// One-shot form of [`TargetSelector::select`].
pub fn select_target(
    current:      Vec3,
    obstacles:    &ObstacleRegistry,
    radius:       f64,
    clearance:    f64,
    max_attempts: u32,
    rng:          &mut AgentRng,
) -> Vec3 {
    TargetSelector::new(radius, clearance, max_attempts).select(current, obstacles, rng)
}
