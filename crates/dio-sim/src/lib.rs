//! `dio-sim` — fixed-tick scene runner for the rust_diorama crates.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Timers    — drain TimerQueue<TimerEvent> for this tick:
//!                   Decide(agent)           → wanderer asks its model again
//!                   EnterStep{agent, step}  → performer starts a routine step
//!   ② Motion    — each wanderer: integrate, stuck check, ground follow
//!                 (parallel with the `parallel` feature).
//!   ③ Decide    — wanderers that arrived or stalled decide immediately,
//!                 in ascending AgentId order.
//!   ④ Commit    — SceneObserver::on_commit sees every agent's final state.
//! ```
//!
//! # Lifecycle
//!
//! Agents are spawned by the [`SceneBuilder`] (or later via
//! `Scene::spawn_*`) and removed with `Scene::despawn`, which cancels the
//! agent's pending timers and fades out its animation.  Dropping the scene
//! despawns every remaining agent the same way.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the motion phase on Rayon's thread pool.          |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use dio_behavior::WanderModel;
//! use dio_core::{NavTuning, SceneConfig, Vec3};
//! use dio_sim::{ClipSet, NoopObserver, SceneBuilder};
//!
//! let tuning = NavTuning::default();
//! let mut scene = SceneBuilder::new(SceneConfig::default(), WanderModel::from_tuning(&tuning))
//!     .tuning(tuning)
//!     .obstacle(Vec3::ZERO)
//!     .wanderer("Hedoban", Vec3::new(3.0, 0.0, 0.0), ClipSet::new(["idle01", "walk01"]))
//!     .build()?;
//! scene.run(&mut NoopObserver)?;
//! ```

mod agent;
pub mod builder;
pub mod error;
pub mod observer;
pub mod player;
pub mod scene;

#[cfg(test)]
mod tests;

pub use agent::TimerEvent;
pub use builder::SceneBuilder;
pub use error::{SimError, SimResult};
pub use observer::{AgentRole, AgentSnapshot, NoopObserver, SceneObserver};
pub use player::{AnimationPlayer, ClipSet, Journal, PlayerCall};
pub use scene::Scene;
