//! The wanderer's idle / walk state machine.

use tracing::debug;

use dio_core::{AgentId, AgentRng, NavTuning};

use crate::{
    Behavior, BehaviorDecision, BehaviorModel, BehaviorSelector, BehaviorTable, DecisionContext,
    TargetSelector,
};

/// Random idle / walk decisions.
///
/// * **Idle** — stand still for `idle_dwell_secs`, then decide again.
/// * **Walk1..3** — pick a clear destination in the action area and walk
///   there; the next decision comes on arrival (or when stuck).
///
/// Every decision carries the state's caption and animation from the
/// [`BehaviorTable`].
#[derive(Clone, Debug)]
pub struct WanderModel {
    pub selector:        BehaviorSelector,
    pub targets:         TargetSelector,
    pub table:           BehaviorTable,
    pub idle_dwell_secs: f64,
}

impl WanderModel {
    pub fn from_tuning(tuning: &NavTuning) -> Self {
        Self {
            selector:        BehaviorSelector::new(tuning.max_redraws),
            targets:         TargetSelector::from_tuning(tuning),
            table:           BehaviorTable::default(),
            idle_dwell_secs: tuning.idle_dwell_secs,
        }
    }

    pub fn with_table(mut self, table: BehaviorTable) -> Self {
        self.table = table;
        self
    }
}

impl Default for WanderModel {
    fn default() -> Self {
        Self::from_tuning(&NavTuning::default())
    }
}

impl BehaviorModel for WanderModel {
    fn decide(
        &self,
        agent: AgentId,
        ctx:   &DecisionContext<'_>,
        rng:   &mut AgentRng,
    ) -> BehaviorDecision {
        let behavior = self.selector.next(ctx.previous, rng);
        let decision = match behavior {
            Behavior::Idle => BehaviorDecision::idle(Some(self.idle_dwell_secs)),
            walk => {
                let destination = match self.targets.try_select(ctx.obstacles, rng) {
                    Some(found) => found,
                    None => {
                        debug!(%agent, tick = %ctx.tick, "no clear destination, staying put");
                        ctx.position
                    }
                };
                BehaviorDecision::walk(walk, destination)
            }
        };
        debug!(%agent, tick = %ctx.tick, %behavior, destination = ?decision.destination, "decided");
        decision
            .with_caption(self.table.caption(behavior))
            .with_animation(self.table.animation(behavior))
    }
}
