//! A behavior model that never moves.

use dio_core::{AgentId, AgentRng};

use crate::{BehaviorDecision, BehaviorModel, DecisionContext};

/// A [`BehaviorModel`] that always idles with no dwell, so it is asked only
/// once.  Useful as a placeholder in tests.
pub struct NoopBehavior;

impl BehaviorModel for NoopBehavior {
    fn decide(
        &self,
        _agent: AgentId,
        _ctx:   &DecisionContext<'_>,
        _rng:   &mut AgentRng,
    ) -> BehaviorDecision {
        BehaviorDecision::idle(None)
    }
}
