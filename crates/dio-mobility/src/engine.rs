//! One tick of locomotion for one agent: integrate, check for stalls,
//! follow the ground.

use dio_core::NavTuning;
use dio_spatial::{GroundSampler, SurfaceRegistry};

use crate::{AgentState, MobilityResult, MotionIntegrator, MotionOutcome, StuckDetector, SteeringField};

/// Result of [`MobilityEngine::step`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepReport {
    pub motion: MotionOutcome,
    /// The stuck detector fired and the agent was halted.
    pub stuck:  bool,
}

impl StepReport {
    /// `true` if the agent halted this tick and needs a new decision.
    #[inline]
    pub fn needs_decision(&self) -> bool {
        self.stuck || self.motion == MotionOutcome::Arrived
    }
}

/// Bundles the per-tick motion pipeline around a steering field `S`.
///
/// `step` borrows the engine immutably, so one engine can drive many agents
/// (in parallel under dio-sim's `parallel` feature).
#[derive(Clone, Debug)]
pub struct MobilityEngine<S: SteeringField> {
    pub integrator: MotionIntegrator,
    pub stuck:      StuckDetector,
    pub ground:     GroundSampler,
    pub steering:   S,
}

impl<S: SteeringField> MobilityEngine<S> {
    /// Validate `tuning` and build every stage from it.
    pub fn from_tuning(tuning: &NavTuning, steering: S) -> MobilityResult<Self> {
        tuning.validate()?;
        Ok(Self {
            integrator: MotionIntegrator::from_tuning(tuning),
            stuck:      StuckDetector::from_tuning(tuning),
            ground:     GroundSampler::from_tuning(tuning),
            steering,
        })
    }

    /// Advance `state` by one tick against `surfaces`.
    pub fn step(&self, state: &mut AgentState, surfaces: &SurfaceRegistry) -> StepReport {
        let motion = self.integrator.advance(state, &self.steering);
        let stuck = match motion {
            MotionOutcome::Moved { .. } => {
                let fired = self.stuck.observe(state);
                if fired {
                    state.halt();
                }
                fired
            }
            MotionOutcome::Arrived | MotionOutcome::Idle => {
                state.stuck_ticks = 0;
                state.last_tick_position = state.position;
                false
            }
        };
        state.position.y = self.ground.follow(state.position, surfaces);
        StepReport { motion, stuck }
    }
}
