//! Surface shapes queried by downward raycasts.
//!
//! A shape only answers one question: "what is the height of your top face
//! above this (x, z), if you cover it at all?"  That is all a straight-down
//! ray needs, and it keeps each query O(1) per surface instead of walking a
//! scene graph.

use std::fmt::Debug;

use crate::{SpatialError, SpatialResult};

/// Height of a surface's top face over the x/z plane.
///
/// Implementations must be `Send + Sync`; the registry is shared read-only
/// across agents and, with the `parallel` feature, across worker threads.
pub trait HeightField: Debug + Send + Sync {
    /// Top-face height at `(x, z)`, or `None` if the footprint doesn't cover
    /// that point.
    fn height_at(&self, x: f64, z: f64) -> Option<f64>;
}

fn check_finite(what: &str, values: &[f64]) -> SpatialResult<()> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(SpatialError::InvalidShape(format!("{what} has a non-finite coordinate")))
    }
}

// ── Platform ──────────────────────────────────────────────────────────────────

/// Axis-aligned box top: flat at `top` over `[min_x, max_x] × [min_z, max_z]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Platform {
    min_x: f64,
    min_z: f64,
    max_x: f64,
    max_z: f64,
    top:   f64,
}

impl Platform {
    pub fn new(min_x: f64, min_z: f64, max_x: f64, max_z: f64, top: f64) -> SpatialResult<Self> {
        check_finite("platform", &[min_x, min_z, max_x, max_z, top])?;
        if min_x > max_x || min_z > max_z {
            return Err(SpatialError::InvalidShape(format!(
                "platform bounds inverted: x {min_x}..{max_x}, z {min_z}..{max_z}"
            )));
        }
        Ok(Self { min_x, min_z, max_x, max_z, top })
    }
}

impl HeightField for Platform {
    fn height_at(&self, x: f64, z: f64) -> Option<f64> {
        let inside = (self.min_x..=self.max_x).contains(&x) && (self.min_z..=self.max_z).contains(&z);
        inside.then_some(self.top)
    }
}

// ── Disc ──────────────────────────────────────────────────────────────────────

/// Flat circular top, e.g. a stump or a trunk cross-section.
#[derive(Clone, Debug, PartialEq)]
pub struct Disc {
    center_x: f64,
    center_z: f64,
    radius:   f64,
    top:      f64,
}

impl Disc {
    pub fn new(center_x: f64, center_z: f64, radius: f64, top: f64) -> SpatialResult<Self> {
        check_finite("disc", &[center_x, center_z, radius, top])?;
        if radius < 0.0 {
            return Err(SpatialError::InvalidShape(format!("disc radius {radius} is negative")));
        }
        Ok(Self { center_x, center_z, radius, top })
    }
}

impl HeightField for Disc {
    fn height_at(&self, x: f64, z: f64) -> Option<f64> {
        let dx = x - self.center_x;
        let dz = z - self.center_z;
        (dx * dx + dz * dz <= self.radius * self.radius).then_some(self.top)
    }
}

// ── Ramp ──────────────────────────────────────────────────────────────────────

/// Rectangular footprint whose top rises linearly along x, from `low` at
/// `min_x` to `high` at `max_x`.
#[derive(Clone, Debug, PartialEq)]
pub struct Ramp {
    min_x: f64,
    min_z: f64,
    max_x: f64,
    max_z: f64,
    low:   f64,
    high:  f64,
}

impl Ramp {
    pub fn new(
        min_x: f64,
        min_z: f64,
        max_x: f64,
        max_z: f64,
        low:   f64,
        high:  f64,
    ) -> SpatialResult<Self> {
        check_finite("ramp", &[min_x, min_z, max_x, max_z, low, high])?;
        if min_x >= max_x || min_z > max_z {
            return Err(SpatialError::InvalidShape(format!(
                "ramp bounds degenerate: x {min_x}..{max_x}, z {min_z}..{max_z}"
            )));
        }
        Ok(Self { min_x, min_z, max_x, max_z, low, high })
    }
}

impl HeightField for Ramp {
    fn height_at(&self, x: f64, z: f64) -> Option<f64> {
        if !(self.min_x..=self.max_x).contains(&x) || !(self.min_z..=self.max_z).contains(&z) {
            return None;
        }
        let t = (x - self.min_x) / (self.max_x - self.min_x);
        Some(self.low + (self.high - self.low) * t)
    }
}
