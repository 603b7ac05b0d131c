//! Static obstacle registry.
//!
//! # Data layout
//!
//! Obstacles are bare points (scenery anchors and the fixed positions of
//! performing characters).  They carry no radius; every clearance test uses a
//! shared distance supplied by the caller.  Distances are horizontal; the
//! ground sampler owns height, so a character standing on a raised surface
//! still keeps its distance from the tree trunk beneath.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) over the `[x, z]` footprint answers "which
//! obstacles are within `r` of this point" without scanning the whole set.
//! The registry is immutable after construction; share it with `Arc`.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use dio_core::Vec3;

use crate::{SpatialError, SpatialResult};

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// Entry stored in the R-tree: the `[x, z]` footprint plus the full point.
#[derive(Clone, Debug)]
struct ObstacleEntry {
    footprint: [f64; 2],
    position:  Vec3,
}

impl RTreeObject for ObstacleEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.footprint)
    }
}

impl PointDistance for ObstacleEntry {
    /// Squared horizontal distance.
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.footprint[0] - point[0];
        let dz = self.footprint[1] - point[1];
        dx * dx + dz * dz
    }
}

// ── ObstacleRegistry ──────────────────────────────────────────────────────────

/// Immutable set of occupied locations.
pub struct ObstacleRegistry {
    points: Vec<Vec3>,
    index:  RTree<ObstacleEntry>,
}

impl ObstacleRegistry {
    /// Build the registry.  Fails if any point has a non-finite x or z.
    pub fn new(points: impl IntoIterator<Item = Vec3>) -> SpatialResult<Self> {
        let points: Vec<Vec3> = points.into_iter().collect();
        if let Some(bad) = points.iter().find(|p| !(p.x.is_finite() && p.z.is_finite())) {
            return Err(SpatialError::NonFiniteObstacle { x: bad.x, z: bad.z });
        }
        let entries = points
            .iter()
            .map(|&position| ObstacleEntry {
                footprint: [position.x, position.z],
                position,
            })
            .collect();
        Ok(Self {
            points,
            index: RTree::bulk_load(entries),
        })
    }

    /// A registry with no obstacles.
    pub fn empty() -> Self {
        Self {
            points: Vec::new(),
            index:  RTree::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// All obstacles in registration order.
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Obstacles whose horizontal distance to `point` is at most `radius`,
    /// paired with that distance.  Order is unspecified.
    pub fn within(&self, point: Vec3, radius: f64) -> impl Iterator<Item = (Vec3, f64)> + '_ {
        let query = [point.x, point.z];
        self.index
            .locate_within_distance(query, radius * radius)
            .map(move |e| (e.position, e.distance_2(&query).sqrt()))
    }

    /// `true` if every obstacle is strictly farther than `clearance` from
    /// `point` (horizontally).  Always `true` for an empty registry.
    pub fn is_clear(&self, point: Vec3, clearance: f64) -> bool {
        self.within(point, clearance).next().is_none()
    }
}

impl std::fmt::Debug for ObstacleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObstacleRegistry")
            .field("points", &self.points)
            .finish_non_exhaustive()
    }
}

impl Default for ObstacleRegistry {
    fn default() -> Self {
        Self::empty()
    }
}
