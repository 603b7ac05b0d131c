//! The value a behavior model hands back at each decision point.

use dio_core::Vec3;

use crate::Behavior;

/// One decision: the new state plus everything the collaborators need.
///
/// Produced by a [`BehaviorModel`][crate::BehaviorModel], consumed by the
/// mobility state (behavior + destination), the animation player
/// (`animation`) and the UI overlay (`caption`).
#[derive(Clone, Debug, PartialEq)]
pub struct BehaviorDecision {
    pub behavior:    Behavior,
    /// Walk destination.  `None` exactly when `behavior` is `Idle`.
    pub destination: Option<Vec3>,
    /// Label shown above the agent; `None` hides it.
    pub caption:     Option<String>,
    /// Looping clip to cross-fade to; `None` keeps the current one.
    pub animation:   Option<String>,
    /// For idle decisions: seconds until the next decision.  `None` means
    /// the agent idles until something else wakes it.
    pub dwell_secs:  Option<f64>,
}

impl BehaviorDecision {
    /// An idle decision, optionally re-deciding after `dwell_secs`.
    pub fn idle(dwell_secs: Option<f64>) -> Self {
        Self {
            behavior:    Behavior::Idle,
            destination: None,
            caption:     None,
            animation:   None,
            dwell_secs,
        }
    }

    /// A walk towards `destination`.
    ///
    /// `behavior` must be one of the walk states; passing `Idle` turns the
    /// decision into a plain idle so the target/behavior pairing holds.
    pub fn walk(behavior: Behavior, destination: Vec3) -> Self {
        if !behavior.is_walk() {
            return Self::idle(None);
        }
        Self {
            behavior,
            destination: Some(destination),
            caption:     None,
            animation:   None,
            dwell_secs:  None,
        }
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn with_animation(mut self, animation: impl Into<String>) -> Self {
        self.animation = Some(animation.into());
        self
    }

    /// `true` if the destination is present exactly for walk states.
    #[inline]
    pub fn is_consistent(&self) -> bool {
        self.destination.is_some() == self.behavior.is_walk()
    }
}
