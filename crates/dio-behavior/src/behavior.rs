//! Behavior states and their presentation.

use std::fmt;

use crate::{BehaviorError, BehaviorResult};

// ── Behavior ──────────────────────────────────────────────────────────────────

/// The wanderer's state.  Exactly one of these is active at any time.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Behavior {
    Idle,
    Walk1,
    Walk2,
    Walk3,
}

impl Behavior {
    /// Every state, in draw order.
    pub const ALL: [Behavior; 4] = [Behavior::Idle, Behavior::Walk1, Behavior::Walk2, Behavior::Walk3];

    /// Position in [`Behavior::ALL`].
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn is_walk(self) -> bool {
        self != Behavior::Idle
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Behavior::Idle  => "idle",
            Behavior::Walk1 => "walk1",
            Behavior::Walk2 => "walk2",
            Behavior::Walk3 => "walk3",
        }
    }
}

impl fmt::Display for Behavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── BehaviorTable ─────────────────────────────────────────────────────────────

/// What the outside world sees of one state: the floating label and the
/// looping clip requested from the animation player.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BehaviorCue {
    pub caption:   String,
    pub animation: String,
}

impl BehaviorCue {
    pub fn new(caption: impl Into<String>, animation: impl Into<String>) -> Self {
        Self { caption: caption.into(), animation: animation.into() }
    }
}

/// Caption and animation for every [`Behavior`], indexed by
/// [`Behavior::index`].
///
/// Captions and animations must be non-empty and pairwise distinct so the
/// viewer can always tell which state an agent is in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BehaviorTable {
    cues: [BehaviorCue; 4],
}

impl BehaviorTable {
    /// Build a table from cues in [`Behavior::ALL`] order.
    pub fn new(cues: [BehaviorCue; 4]) -> BehaviorResult<Self> {
        for (i, cue) in cues.iter().enumerate() {
            let state = Behavior::ALL[i];
            if cue.caption.trim().is_empty() || cue.animation.trim().is_empty() {
                return Err(BehaviorError::Config(format!(
                    "{state}: caption and animation must be non-empty"
                )));
            }
            for other in &cues[..i] {
                if other.caption == cue.caption || other.animation == cue.animation {
                    return Err(BehaviorError::Config(format!(
                        "{state}: caption {:?} / animation {:?} already used by another state",
                        cue.caption, cue.animation
                    )));
                }
            }
        }
        Ok(Self { cues })
    }

    #[inline]
    pub fn cue(&self, behavior: Behavior) -> &BehaviorCue {
        &self.cues[behavior.index()]
    }

    pub fn caption(&self, behavior: Behavior) -> &str {
        &self.cue(behavior).caption
    }

    pub fn animation(&self, behavior: Behavior) -> &str {
        &self.cue(behavior).animation
    }
}

impl Default for BehaviorTable {
    fn default() -> Self {
        Self {
            cues: [
                BehaviorCue::new("Just standing here.",        "idle01"),
                BehaviorCue::new("Going for a little walk.",   "walk01"),
                BehaviorCue::new("Something over there...",    "walk02"),
                BehaviorCue::new("Where was I going again?",   "walk03"),
            ],
        }
    }
}
