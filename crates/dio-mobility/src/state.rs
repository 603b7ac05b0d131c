//! Per-agent motion state.

use dio_behavior::{Behavior, BehaviorDecision};
use dio_core::{Vec3, math::yaw_towards};

/// Everything that changes about a wandering agent from tick to tick.
///
/// `target` is `Some` exactly while `behavior` is a walk state.  The only
/// ways to change either are [`apply_decision`](Self::apply_decision) and
/// [`halt`](Self::halt), which both keep that pairing.
#[derive(Clone, Debug, PartialEq)]
pub struct AgentState {
    pub position:           Vec3,
    pub(crate) target:      Option<Vec3>,
    pub(crate) behavior:    Behavior,
    /// Position at the end of the previous tick, for the stuck detector.
    pub last_tick_position: Vec3,
    /// Consecutive walking ticks without meaningful movement.
    pub stuck_ticks:        u32,
    /// Heading about +y in radians; 0 faces +z.
    pub yaw:                f64,
}

impl AgentState {
    /// An idle agent standing at `position`, facing +z.
    pub fn idle_at(position: Vec3) -> Self {
        Self {
            position,
            target:             None,
            behavior:           Behavior::Idle,
            last_tick_position: position,
            stuck_ticks:        0,
            yaw:                0.0,
        }
    }

    #[inline]
    pub fn target(&self) -> Option<Vec3> {
        self.target
    }

    #[inline]
    pub fn behavior(&self) -> Behavior {
        self.behavior
    }

    /// Switch to `decision`.
    ///
    /// A walk decision without a destination is applied as idle.  The stuck
    /// counter restarts, and a walking agent turns to face its destination.
    pub fn apply_decision(&mut self, decision: &BehaviorDecision) {
        match decision.destination {
            Some(destination) if decision.behavior.is_walk() => {
                self.behavior = decision.behavior;
                self.target = Some(destination);
                if let Some(yaw) = yaw_towards(self.position, destination) {
                    self.yaw = yaw;
                }
            }
            _ => self.halt(),
        }
        self.stuck_ticks = 0;
        self.last_tick_position = self.position;
    }

    /// Drop the target and fall back to idle.
    #[inline]
    pub fn halt(&mut self) {
        self.target = None;
        self.behavior = Behavior::Idle;
    }

    /// `true` if the target/behavior pairing holds.
    #[inline]
    pub fn is_consistent(&self) -> bool {
        self.target.is_some() == self.behavior.is_walk()
    }
}
