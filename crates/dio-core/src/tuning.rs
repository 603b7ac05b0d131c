//! Navigation tuning constants.
//!
//! Every magic number the wanderer depends on lives in [`NavTuning`] so a
//! scene can be retuned from a config file without touching code.  Distances
//! are world units, durations are seconds, counters are ticks.

use crate::{DioError, DioResult};

/// Tuning for target selection, motion, ground following and stuck recovery.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NavTuning {
    /// Distance covered per tick while walking.
    pub step_size: f64,
    /// Minimum horizontal distance kept from every obstacle.
    pub clearance: f64,
    /// Radius of the world-anchored disk destinations are drawn from.
    pub action_radius: f64,
    /// Candidate destinations tried before the agent stays put.
    pub max_target_attempts: u32,
    /// Repulsion per unit of clearance intrusion.
    pub repulsion_gain: f64,
    /// Upper bound on the summed repulsion length.  `None` leaves it uncapped.
    pub repulsion_cap: Option<f64>,
    /// Height above the agent at which the ground ray starts.
    pub ray_start_offset: f64,
    /// Added to the height of a walkable hit.
    pub climb_offset: f64,
    /// Fraction of the remaining height gap closed each tick, in `(0, 1]`.
    pub height_smoothing: f64,
    /// Per-tick movement below this counts as "not moving".
    pub stuck_epsilon: f64,
    /// Consecutive non-moving ticks tolerated before a forced re-decision.
    pub stuck_threshold: u32,
    /// How long an idle decision lasts.
    pub idle_dwell_secs: f64,
    /// Redraws allowed when the behavior draw repeats the previous one.
    pub max_redraws: u32,
    /// Cross-fade duration for animation requests.
    pub fade_secs: f64,
    /// Slack added to `step_size` in the arrival test to absorb float error.
    pub arrival_tolerance: f64,
}

impl Default for NavTuning {
    fn default() -> Self {
        Self {
            step_size:           0.02,
            clearance:           1.2,
            action_radius:       5.0,
            max_target_attempts: 30,
            repulsion_gain:      0.05,
            repulsion_cap:       None,
            ray_start_offset:    5.0,
            climb_offset:        0.0,
            height_smoothing:    0.2,
            stuck_epsilon:       0.001,
            stuck_threshold:     60,
            idle_dwell_secs:     4.0,
            max_redraws:         5,
            fade_secs:           0.5,
            arrival_tolerance:   1e-9,
        }
    }
}

impl NavTuning {
    /// Reject values that would make the agent misbehave rather than degrade.
    pub fn validate(&self) -> DioResult<()> {
        fn non_negative(name: &str, v: f64) -> DioResult<()> {
            if v.is_finite() && v >= 0.0 {
                Ok(())
            } else {
                Err(DioError::Config(format!("{name} must be finite and >= 0, got {v}")))
            }
        }

        if !(self.step_size.is_finite() && self.step_size > 0.0) {
            return Err(DioError::Config(format!(
                "step_size must be finite and > 0, got {}",
                self.step_size
            )));
        }
        non_negative("clearance", self.clearance)?;
        non_negative("action_radius", self.action_radius)?;
        non_negative("repulsion_gain", self.repulsion_gain)?;
        if let Some(cap) = self.repulsion_cap {
            non_negative("repulsion_cap", cap)?;
        }
        non_negative("ray_start_offset", self.ray_start_offset)?;
        if !self.climb_offset.is_finite() {
            return Err(DioError::Config("climb_offset must be finite".into()));
        }
        if !(self.height_smoothing > 0.0 && self.height_smoothing <= 1.0) {
            return Err(DioError::Config(format!(
                "height_smoothing must be in (0, 1], got {}",
                self.height_smoothing
            )));
        }
        non_negative("stuck_epsilon", self.stuck_epsilon)?;
        non_negative("idle_dwell_secs", self.idle_dwell_secs)?;
        non_negative("fade_secs", self.fade_secs)?;
        non_negative("arrival_tolerance", self.arrival_tolerance)?;
        if self.max_target_attempts == 0 {
            return Err(DioError::Config("max_target_attempts must be at least 1".into()));
        }
        if self.stuck_threshold == 0 {
            return Err(DioError::Config("stuck_threshold must be at least 1".into()));
        }
        Ok(())
    }
}
