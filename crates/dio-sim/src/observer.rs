//! Scene observer trait: the renderer and UI overlay side of the loop.

use dio_behavior::{Behavior, BehaviorDecision};
use dio_core::{AgentId, Tick, Vec3};

/// Whether an agent wanders or plays a scripted routine.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AgentRole {
    Wanderer,
    Performer,
}

impl AgentRole {
    pub fn as_str(self) -> &'static str {
        match self {
            AgentRole::Wanderer  => "wanderer",
            AgentRole::Performer => "performer",
        }
    }
}

/// The committed, end-of-tick view of one agent.
#[derive(Clone, Debug, PartialEq)]
pub struct AgentSnapshot<'a> {
    pub id:          AgentId,
    pub name:        &'a str,
    pub role:        AgentRole,
    pub position:    Vec3,
    /// Heading about +y in radians; 0 faces +z.
    pub yaw:         f64,
    /// `None` for performers.
    pub behavior:    Option<Behavior>,
    /// Target of the current walk, if any.
    pub target:      Option<Vec3>,
    /// Floating label; `None` hides it.
    pub caption:     Option<&'a str>,
    /// Last clip successfully requested from the player.
    pub animation:   Option<&'a str>,
    pub stuck_ticks: u32,
}

/// Callbacks invoked by [`Scene::run`][crate::Scene::run].
///
/// All methods default to no-ops.
///
/// # Example — caption printer
///
/// ```rust,ignore
/// struct Captions;
///
/// impl SceneObserver for Captions {
///     fn on_decision(&mut self, tick: Tick, agent: AgentId, d: &BehaviorDecision) {
///         if let Some(text) = &d.caption {
///             println!("{tick} {agent}: {text}");
///         }
///     }
/// }
/// ```
pub trait SceneObserver {
    /// Start of a tick, before any timers fire.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// A wanderer made a decision.  Called in ascending `AgentId` order
    /// within each phase.
    fn on_decision(&mut self, _tick: Tick, _agent: AgentId, _decision: &BehaviorDecision) {}

    /// Final positions of every live agent, once per tick after motion,
    /// ground following and decisions are all done.  Ordered by `AgentId`.
    fn on_commit(&mut self, _tick: Tick, _agents: &[AgentSnapshot<'_>]) {}

    /// End of a tick.  `decisions` counts the decisions made during it.
    fn on_tick_end(&mut self, _tick: Tick, _decisions: usize) {}

    /// After the final tick of [`Scene::run`][crate::Scene::run].
    fn on_scene_end(&mut self, _final_tick: Tick) {}
}

/// A [`SceneObserver`] that ignores everything.
pub struct NoopObserver;

impl SceneObserver for NoopObserver {}
