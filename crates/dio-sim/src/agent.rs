//! Per-agent scene bookkeeping.

use tracing::debug;

use dio_behavior::Behavior;
use dio_core::{AgentId, AgentRng, TimerId};
use dio_mobility::AgentState;
use dio_schedule::Routine;

use crate::{AgentRole, AgentSnapshot, AnimationPlayer};

/// Deferred work queued in the scene's `TimerQueue`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerEvent {
    /// A wanderer's idle dwell ran out; ask the behavior model again.
    Decide(AgentId),
    /// A performer moves to routine step `step`.
    EnterStep { agent: AgentId, step: usize },
}

impl TimerEvent {
    pub fn agent(&self) -> AgentId {
        match *self {
            TimerEvent::Decide(agent) | TimerEvent::EnterStep { agent, .. } => agent,
        }
    }
}

pub(crate) enum Role {
    Wanderer {
        /// Behavior of the most recent decision; the selector avoids it.
        last_decision: Option<Behavior>,
    },
    Performer {
        routine: Routine,
        step:    usize,
    },
}

/// One live character.
pub(crate) struct SceneAgent {
    pub(crate) id:        AgentId,
    pub(crate) name:      String,
    pub(crate) role:      Role,
    pub(crate) state:     AgentState,
    pub(crate) rng:       AgentRng,
    pub(crate) player:    Box<dyn AnimationPlayer>,
    pub(crate) caption:   Option<String>,
    pub(crate) animation: Option<String>,
    /// Timers this agent owns that have not fired yet.
    pub(crate) timers:    Vec<TimerId>,
}

impl SceneAgent {
    #[inline]
    pub(crate) fn is_wanderer(&self) -> bool {
        matches!(self.role, Role::Wanderer { .. })
    }

    /// Cross-fade to `name` unless the player doesn't have it, in which case
    /// the current clip keeps playing.
    pub(crate) fn play(&mut self, name: &str, fade_secs: f64) {
        if !self.player.has_action(name) {
            debug!(agent = %self.id, name = %self.name, clip = name, "unknown animation, skipped");
            return;
        }
        self.player.cross_fade(name, fade_secs);
        self.animation = Some(name.to_owned());
    }

    /// Fade out whatever this agent started.
    pub(crate) fn stop_animation(&mut self, fade_secs: f64) {
        if let Some(name) = self.animation.take() {
            self.player.fade_out(&name, fade_secs);
        }
    }

    pub(crate) fn snapshot(&self) -> AgentSnapshot<'_> {
        let (role, behavior) = match self.role {
            Role::Wanderer { .. } => (AgentRole::Wanderer, Some(self.state.behavior())),
            Role::Performer { .. } => (AgentRole::Performer, None),
        };
        AgentSnapshot {
            id:          self.id,
            name:        &self.name,
            role,
            position:    self.state.position,
            yaw:         self.state.yaw,
            behavior,
            target:      self.state.target(),
            caption:     self.caption.as_deref(),
            animation:   self.animation.as_deref(),
            stuck_ticks: self.state.stuck_ticks,
        }
    }
}
