//! Fixed-step motion towards the current target.

use dio_core::{NavTuning, Vec3, math::{horizontal, yaw_of}};

use crate::{AgentState, SteeringField};

/// What one [`MotionIntegrator::advance`] call did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MotionOutcome {
    /// No target; nothing moved.
    Idle,
    /// Landed on the target this tick.  The agent is now halted.
    Arrived,
    /// Took a regular step of `step` (horizontal).
    Moved { step: Vec3 },
}

/// Moves an agent a fixed distance per tick.
///
/// The arrival test runs first and uses `<=`: once the remaining horizontal
/// distance is within one step (plus `arrival_tolerance` to absorb float
/// accumulation) the agent snaps onto the target.  It therefore never
/// overshoots, and a walk of `n · step_size` takes exactly `n` ticks.
#[derive(Clone, Debug, PartialEq)]
pub struct MotionIntegrator {
    pub step_size:         f64,
    pub arrival_tolerance: f64,
}

impl MotionIntegrator {
    pub fn new(step_size: f64) -> Self {
        Self { step_size, arrival_tolerance: 1e-9 }
    }

    pub fn from_tuning(tuning: &NavTuning) -> Self {
        Self {
            step_size:         tuning.step_size,
            arrival_tolerance: tuning.arrival_tolerance,
        }
    }

    /// Advance `state` by one tick.
    ///
    /// Only x and z change; the height belongs to the ground sampler, so
    /// arrival snaps the horizontal position and keeps `y`.  The agent turns
    /// to face the step it actually took, which follows any curving the
    /// steering field causes.
    pub fn advance<S: SteeringField + ?Sized>(&self, state: &mut AgentState, steering: &S) -> MotionOutcome {
        let Some(target) = state.target else {
            return MotionOutcome::Idle;
        };

        let delta = horizontal(target - state.position);
        let remaining = delta.length();
        if remaining <= self.step_size + self.arrival_tolerance {
            state.position.x = target.x;
            state.position.z = target.z;
            state.halt();
            return MotionOutcome::Arrived;
        }

        let goal_step = delta / remaining * self.step_size;
        let step = horizontal(goal_step + steering.steer(state.position, goal_step));
        state.position += step;
        if let Some(yaw) = yaw_of(step) {
            state.yaw = yaw;
        }
        MotionOutcome::Moved { step }
    }
}

impl Default for MotionIntegrator {
    fn default() -> Self {
        Self::from_tuning(&NavTuning::default())
    }
}
