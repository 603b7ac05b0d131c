//! Spatial-subsystem error type.

use thiserror::Error;

use dio_core::SurfaceId;

/// Errors produced by `dio-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("invalid surface shape: {0}")]
    InvalidShape(String),

    #[error("surface {0} not found")]
    SurfaceNotFound(SurfaceId),

    #[error("obstacle at ({x}, {z}) is not finite")]
    NonFiniteObstacle { x: f64, z: f64 },
}

pub type SpatialResult<T> = Result<T, SpatialError>;
