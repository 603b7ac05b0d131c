//! Fluent builder for constructing a [`Scene`].

use std::collections::HashSet;
use std::sync::Arc;

use dio_behavior::BehaviorModel;
use dio_core::{NavTuning, SceneConfig, Vec3};
use dio_mobility::{MobilityEngine, ObstacleRepulsion, SteeringField};
use dio_schedule::Routine;
use dio_spatial::{HeightField, ObstacleRegistry, SurfaceRegistry};

use crate::{AnimationPlayer, Scene, SimError, SimResult};

struct PerformerSpec {
    name:     String,
    position: Vec3,
    yaw:      f64,
    routine:  Routine,
    player:   Box<dyn AnimationPlayer>,
}

struct WandererSpec {
    name:     String,
    position: Vec3,
    player:   Box<dyn AnimationPlayer>,
}

/// Fluent builder for [`Scene<B, S>`].
///
/// # Required inputs
///
/// - [`SceneConfig`] — tick rate, run length, seed
/// - `B: BehaviorModel` — decides for every wanderer
///
/// # Optional inputs (have defaults)
///
/// | Method              | Default                       |
/// |---------------------|-------------------------------|
/// | `.tuning(t)`        | `NavTuning::default()`        |
/// | `.obstacle(p)`      | none (performers still count) |
/// | `.surface(..)`      | none (bare ground at y = 0)   |
/// | `.performer(..)`    | none                          |
/// | `.wanderer(..)`     | none                          |
///
/// Every performer's position is added to the obstacle registry, which is
/// frozen when the scene is built.
///
/// # Example
///
/// ```rust,ignore
/// let mut scene = SceneBuilder::new(config, WanderModel::from_tuning(&tuning))
///     .tuning(tuning)
///     .obstacle(Vec3::ZERO)
///     .performer("Kariage", Vec3::new(2.5, 0.0, -1.5), 0.0, sitting, kariage_clips)
///     .wanderer("Hedoban", Vec3::new(-1.0, 0.0, 3.0), hedoban_clips)
///     .build()?;
/// scene.run(&mut NoopObserver)?;
/// ```
pub struct SceneBuilder<B: BehaviorModel> {
    config:     SceneConfig,
    tuning:     NavTuning,
    behavior:   B,
    obstacles:  Vec<Vec3>,
    surfaces:   SurfaceRegistry,
    performers: Vec<PerformerSpec>,
    wanderers:  Vec<WandererSpec>,
}

impl<B: BehaviorModel> SceneBuilder<B> {
    pub fn new(config: SceneConfig, behavior: B) -> Self {
        Self {
            config,
            tuning:     NavTuning::default(),
            behavior,
            obstacles:  Vec::new(),
            surfaces:   SurfaceRegistry::new(),
            performers: Vec::new(),
            wanderers:  Vec::new(),
        }
    }

    pub fn tuning(mut self, tuning: NavTuning) -> Self {
        self.tuning = tuning;
        self
    }

    /// Add a static obstacle (scenery anchor).
    pub fn obstacle(mut self, point: Vec3) -> Self {
        self.obstacles.push(point);
        self
    }

    pub fn obstacles(mut self, points: impl IntoIterator<Item = Vec3>) -> Self {
        self.obstacles.extend(points);
        self
    }

    /// Register a surface for ground rays.  Non-walkable surfaces are hit but
    /// never stood on.
    pub fn surface<H: HeightField + 'static>(
        mut self,
        label:    impl Into<String>,
        walkable: bool,
        shape:    H,
    ) -> Self {
        self.surfaces.add(label, walkable, shape);
        self
    }

    /// Add a character that plays `routine` at `position`, facing `yaw`.
    pub fn performer(
        mut self,
        name:     impl Into<String>,
        position: Vec3,
        yaw:      f64,
        routine:  Routine,
        player:   impl AnimationPlayer + 'static,
    ) -> Self {
        self.performers.push(PerformerSpec {
            name: name.into(),
            position,
            yaw,
            routine,
            player: Box::new(player),
        });
        self
    }

    /// Add a wandering character starting at `position`.
    pub fn wanderer(
        mut self,
        name:     impl Into<String>,
        position: Vec3,
        player:   impl AnimationPlayer + 'static,
    ) -> Self {
        self.wanderers.push(WandererSpec {
            name: name.into(),
            position,
            player: Box::new(player),
        });
        self
    }

    /// Build with [`ObstacleRepulsion`] steering configured from the tuning.
    pub fn build(self) -> SimResult<Scene<B, ObstacleRepulsion>> {
        self.build_with(|obstacles, tuning| ObstacleRepulsion::from_tuning(obstacles, tuning))
    }

    /// Build with a custom steering field, created from the frozen obstacle
    /// registry and the tuning.
    pub fn build_with<S, F>(self, steering: F) -> SimResult<Scene<B, S>>
    where
        S: SteeringField,
        F: FnOnce(Arc<ObstacleRegistry>, &NavTuning) -> S,
    {
        // ── Validate ──────────────────────────────────────────────────────
        self.config.validate()?;
        let mut names = HashSet::new();
        let all_names = self
            .performers
            .iter()
            .map(|p| &p.name)
            .chain(self.wanderers.iter().map(|w| &w.name));
        for name in all_names {
            if !names.insert(name.as_str()) {
                return Err(SimError::Config(format!("duplicate agent name {name:?}")));
            }
        }

        // ── Freeze obstacles: scenery plus every performer ────────────────
        let points = self
            .obstacles
            .iter()
            .copied()
            .chain(self.performers.iter().map(|p| p.position));
        let obstacles = Arc::new(ObstacleRegistry::new(points)?);

        let mobility = MobilityEngine::from_tuning(
            &self.tuning,
            steering(Arc::clone(&obstacles), &self.tuning),
        )?;

        let mut scene = Scene::assemble(
            self.config,
            self.tuning,
            obstacles,
            self.surfaces,
            mobility,
            self.behavior,
        );

        // ── Spawn: performers first, then wanderers ───────────────────────
        for p in self.performers {
            scene.spawn_boxed_performer(p.name, p.position, p.yaw, p.routine, p.player);
        }
        for w in self.wanderers {
            scene.spawn_boxed_wanderer(w.name, w.position, w.player);
        }
        Ok(scene)
    }
}
