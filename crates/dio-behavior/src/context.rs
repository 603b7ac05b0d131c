//! Read-only state passed to every decision.

use dio_core::{Tick, Vec3};
use dio_spatial::ObstacleRegistry;

use crate::Behavior;

/// What a [`BehaviorModel`][crate::BehaviorModel] may look at when deciding.
///
/// Built by dio-sim for one agent at one decision point.  `previous` is the
/// behavior the agent was in before the event that triggered the decision
/// (arrival and stuck escapes halt the agent first, so its current state is
/// no help there).
pub struct DecisionContext<'a> {
    pub tick:      Tick,
    pub position:  Vec3,
    /// `None` before the agent's first decision.
    pub previous:  Option<Behavior>,
    pub obstacles: &'a ObstacleRegistry,
}

impl<'a> DecisionContext<'a> {
    #[inline]
    pub fn new(
        tick:      Tick,
        position:  Vec3,
        previous:  Option<Behavior>,
        obstacles: &'a ObstacleRegistry,
    ) -> Self {
        Self { tick, position, previous, obstacles }
    }
}
