//! `dio-core` — foundational types for the `rust_diorama` navigation crates.
//!
//! This crate is a dependency of every other `dio-*` crate.  It has no
//! `dio-*` dependencies and minimal external ones (`glam`, `rand`,
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`ids`]     | `AgentId`, `SurfaceId`, `TimerId`                         |
//! | [`math`]    | `Vec3` (`glam::DVec3`), horizontal-plane helpers, yaw     |
//! | [`time`]    | `Tick`, `SimClock`, `SceneConfig`                         |
//! | [`tuning`]  | `NavTuning` — every navigation constant in one place      |
//! | [`rng`]     | `AgentRng` — per-agent deterministic streams              |
//! | [`error`]   | `DioError`, `DioResult`                                   |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to config and id types.     |

pub mod error;
pub mod ids;
pub mod math;
pub mod rng;
pub mod time;
pub mod tuning;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{DioError, DioResult};
pub use ids::{AgentId, SurfaceId, TimerId};
pub use math::Vec3;
pub use rng::AgentRng;
pub use time::{SceneConfig, SimClock, Tick};
pub use tuning::NavTuning;
