//! The `BehaviorModel` trait — the extension point for agent decisions.

use dio_core::{AgentId, AgentRng};

use crate::{BehaviorDecision, DecisionContext};

/// Pluggable decision logic.
///
/// Called once per decision point with a read-only [`DecisionContext`] and
/// the agent's own [`AgentRng`], so a seeded scene replays identically.
/// State that varies per agent lives in the scene, not in the model; models
/// are shared between agents and must be `Send + Sync`.
///
/// Implementations must return a decision whose destination is present
/// exactly for walk states (see [`BehaviorDecision::is_consistent`]).  The
/// scene downgrades an inconsistent decision to idle.
pub trait BehaviorModel: Send + Sync + 'static {
    fn decide(
        &self,
        agent: AgentId,
        ctx:   &DecisionContext<'_>,
        rng:   &mut AgentRng,
    ) -> BehaviorDecision;
}
