//! Surface registry and straight-down ray queries.
//!
//! The registry replaces a whole-scene traversal filtered by a "walkable"
//! tag: surfaces are registered explicitly once, each with an id, a tag and
//! a [`HeightField`].  A downward ray from `origin` hits every surface whose
//! footprint covers `(origin.x, origin.z)` and whose top lies at or below
//! `origin.y`; hits come back nearest-first, like a renderer's raycaster.

use dio_core::{SurfaceId, Vec3};

use crate::{HeightField, SpatialError, SpatialResult};

/// One registered surface.
#[derive(Debug)]
pub struct Surface {
    pub id:       SurfaceId,
    /// Human-readable label used in logs ("stump", "trunk", …).
    pub label:    String,
    /// Agents may stand on walkable surfaces; other surfaces still occlude
    /// the ray but are skipped by the ground sampler.
    pub walkable: bool,
    shape:        Box<dyn HeightField>,
}

impl Surface {
    #[inline]
    pub fn height_at(&self, x: f64, z: f64) -> Option<f64> {
        self.shape.height_at(x, z)
    }
}

/// A single ray intersection.
#[derive(Clone, Debug, PartialEq)]
pub struct RayHit {
    pub surface:  SurfaceId,
    pub walkable: bool,
    /// World-space intersection point.
    pub point:    Vec3,
    /// Distance travelled from the ray origin.
    pub distance: f64,
}

/// Explicit registry of surfaces that downward rays are tested against.
#[derive(Debug, Default)]
pub struct SurfaceRegistry {
    surfaces: Vec<Surface>,
}

impl SurfaceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a surface and return its id.  Ids are dense and assigned in
    /// registration order.
    pub fn add<S: HeightField + 'static>(
        &mut self,
        label:    impl Into<String>,
        walkable: bool,
        shape:    S,
    ) -> SurfaceId {
        let id = SurfaceId(self.surfaces.len() as u32);
        self.surfaces.push(Surface {
            id,
            label: label.into(),
            walkable,
            shape: Box::new(shape),
        });
        id
    }

    pub fn get(&self, id: SurfaceId) -> SpatialResult<&Surface> {
        self.surfaces
            .get(id.index())
            .ok_or(SpatialError::SurfaceNotFound(id))
    }

    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    /// Cast a ray straight down from `origin`.
    ///
    /// Returns every intersection ordered by distance (ties broken by
    /// registration order).  Surfaces above the origin are not hit.
    pub fn raycast_down(&self, origin: Vec3) -> Vec<RayHit> {
        let mut hits: Vec<RayHit> = self
            .surfaces
            .iter()
            .filter_map(|s| {
                let h = s.height_at(origin.x, origin.z)?;
                (h <= origin.y).then(|| RayHit {
                    surface:  s.id,
                    walkable: s.walkable,
                    point:    Vec3::new(origin.x, h, origin.z),
                    distance: origin.y - h,
                })
            })
            .collect();
        hits.sort_by(|a, b| {
            a.distance
                .total_cmp(&b.distance)
                .then(a.surface.cmp(&b.surface))
        });
        hits
    }

    /// The nearest walkable intersection below `origin`, if any.
    pub fn first_walkable_below(&self, origin: Vec3) -> Option<RayHit> {
        self.raycast_down(origin).into_iter().find(|h| h.walkable)
    }
}
