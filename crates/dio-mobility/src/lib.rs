//! `dio-mobility` — moving an agent towards its target, one tick at a time.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                      |
//! |----------------|---------------------------------------------------------------|
//! | [`state`]      | `AgentState` — position, target, behavior, stuck counter      |
//! | [`steering`]   | `SteeringField` trait, `ObstacleRepulsion`, `NoSteering`      |
//! | [`integrator`] | `MotionIntegrator` — fixed-size steps, exact arrival          |
//! | [`stuck`]      | `StuckDetector` — gives up on a target that isn't reachable   |
//! | [`engine`]     | `MobilityEngine<S>` — integrate → stuck check → ground        |
//! | [`error`]      | `MobilityError`, `MobilityResult<T>`                          |
//!
//! # Per-tick order
//!
//! 1. **Integrate**: step towards the target, bent by the steering field.
//!    Landing within one step snaps onto the target and halts the agent.
//! 2. **Stuck check**: while walking, count ticks without real movement;
//!    past the threshold the agent halts.
//! 3. **Ground**: ease the height towards the supporting surface.
//!
//! A halted agent is `Idle` with no target; the caller asks its behavior
//! model for the next decision in the same tick.

pub mod engine;
pub mod error;
pub mod integrator;
pub mod state;
pub mod steering;
pub mod stuck;

#[cfg(test)]
mod tests;

pub use engine::{MobilityEngine, StepReport};
pub use error::{MobilityError, MobilityResult};
pub use integrator::{MotionIntegrator, MotionOutcome};
pub use state::AgentState;
pub use steering::{NoSteering, ObstacleRepulsion, SteeringField};
pub use stuck::StuckDetector;
