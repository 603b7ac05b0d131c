//! Ground following: pick the supporting height and ease towards it.

use dio_core::{NavTuning, Vec3};

use crate::SurfaceRegistry;

/// Samples the height an agent should stand at and smooths its vertical
/// position towards it.
///
/// The target comes from a downward ray started `ray_start_offset` above the
/// agent, so a surface up to that much higher than the agent's feet is
/// stepped onto.  With no walkable hit the bare ground (height 0) applies.
#[derive(Clone, Debug, PartialEq)]
pub struct GroundSampler {
    pub ray_start_offset: f64,
    pub climb_offset:     f64,
    /// Fraction of the remaining gap closed per tick, in `(0, 1]`.
    pub smoothing:        f64,
}

impl GroundSampler {
    pub fn new(ray_start_offset: f64, climb_offset: f64, smoothing: f64) -> Self {
        Self { ray_start_offset, climb_offset, smoothing }
    }

    pub fn from_tuning(tuning: &NavTuning) -> Self {
        Self::new(tuning.ray_start_offset, tuning.climb_offset, tuning.height_smoothing)
    }

    /// Height the agent at `position` should settle to.
    pub fn target_height(&self, position: Vec3, surfaces: &SurfaceRegistry) -> f64 {
        let origin = Vec3::new(position.x, position.y + self.ray_start_offset, position.z);
        match surfaces.first_walkable_below(origin) {
            Some(hit) => hit.point.y + self.climb_offset,
            None => 0.0,
        }
    }

    /// One smoothing step from `current` towards `target`.
    ///
    /// With `smoothing < 1` the result always lies between `current` and
    /// `target`, so the approach is monotonic and never overshoots.
    #[inline]
    pub fn settle(&self, current: f64, target: f64) -> f64 {
        current + (target - current) * self.smoothing
    }

    /// Sample and settle in one go; returns the agent's new height.
    pub fn follow(&self, position: Vec3, surfaces: &SurfaceRegistry) -> f64 {
        let target = self.target_height(position, surfaces);
        self.settle(position.y, target)
    }
}

impl Default for GroundSampler {
    fn default() -> Self {
        Self::from_tuning(&NavTuning::default())
    }
}
