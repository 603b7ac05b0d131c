//! `dio-behavior` — what a wandering character decides to do next.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                      |
//! |--------------|---------------------------------------------------------------|
//! | [`behavior`] | `Behavior` states, `BehaviorTable` (caption + animation each) |
//! | [`decision`] | `BehaviorDecision` — one decision, consumed by mobility + UI  |
//! | [`selector`] | `BehaviorSelector` — uniform draw, never the same twice       |
//! | [`target`]   | `TargetSelector`, `select_target` — clearance-aware sampling  |
//! | [`context`]  | `DecisionContext<'a>` — read-only view at a decision point    |
//! | [`model`]    | `BehaviorModel` trait                                         |
//! | [`wander`]   | `WanderModel` — the idle / walk state machine                 |
//! | [`noop`]     | `NoopBehavior` — always idle, never moves                     |
//! | [`error`]    | `BehaviorError`, `BehaviorResult<T>`                          |
//!
//! # Decision points
//!
//! A model is only consulted when something ends: the idle dwell elapsed,
//! the walk target was reached, or the stuck detector gave up on it.  Each
//! call returns exactly one [`BehaviorDecision`]; the scene applies it to the
//! agent state and forwards caption and animation to its collaborators.
//!
//! Every decision satisfies `destination.is_none() == (behavior == Idle)`.

pub mod behavior;
pub mod context;
pub mod decision;
pub mod error;
pub mod model;
pub mod noop;
pub mod selector;
pub mod target;
pub mod wander;


pub use behavior::{Behavior, BehaviorCue, BehaviorTable};
pub use context::DecisionContext;
pub use decision::BehaviorDecision;
pub use error::{BehaviorError, BehaviorResult};
pub use model::BehaviorModel;
pub use noop::NoopBehavior;
pub use selector::BehaviorSelector;
pub use target::{TargetSelector, select_target};
pub use wander::WanderModel;
