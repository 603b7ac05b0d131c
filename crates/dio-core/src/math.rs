//! Vector type and horizontal-plane helpers.
//!
//! The scene is y-up.  Navigation (clearance, repulsion, stepping) happens in
//! the horizontal x/z plane; height is owned by the ground sampler.  `Vec3`
//! is double precision so that a few hundred fixed-size steps still land
//! exactly on a target instead of drifting past it.

/// World-space 3D vector (`x`, `y` up, `z`).
pub type Vec3 = glam::DVec3;

/// Drop the vertical component.
#[inline]
pub fn horizontal(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

/// Distance between `a` and `b` measured in the x/z plane.
#[inline]
pub fn horizontal_distance(a: Vec3, b: Vec3) -> f64 {
    horizontal(b - a).length()
}

/// Heading (rotation about +y) that turns a model facing +z towards `dir`.
///
/// Returns `None` for a zero-length horizontal direction, in which case the
/// caller keeps its current heading.
#[inline]
pub fn yaw_of(dir: Vec3) -> Option<f64> {
    let flat = horizontal(dir);
    if flat.length_squared() <= f64::EPSILON {
        return None;
    }
    Some(flat.x.atan2(flat.z))
}

/// Heading from `from` looking at `to` (see [`yaw_of`]).
#[inline]
pub fn yaw_towards(from: Vec3, to: Vec3) -> Option<f64> {
    yaw_of(to - from)
}
