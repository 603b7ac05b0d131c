//! `dio-spatial` — static obstacles, walkable surfaces, and ground following.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`obstacles`] | `ObstacleRegistry` (immutable points + R-tree)             |
//! | [`surface`]   | `HeightField` trait, `Platform`, `Disc`, `Ramp`            |
//! | [`raycast`]   | `SurfaceRegistry`, `RayHit` — downward ray queries         |
//! | [`ground`]    | `GroundSampler` — target height + smoothed climbing        |
//! | [`error`]     | `SpatialError`, `SpatialResult<T>`                         |
//!
//! Both registries are built once when the scene is assembled and are only
//! read afterwards, so they can be shared freely (`Sync`) between agents.

pub mod error;
pub mod ground;
pub mod obstacles;
pub mod raycast;
pub mod surface;


pub use error::{SpatialError, SpatialResult};
pub use ground::GroundSampler;
pub use obstacles::ObstacleRegistry;
pub use raycast::{RayHit, Surface, SurfaceRegistry};
pub use surface::{Disc, HeightField, Platform, Ramp};
