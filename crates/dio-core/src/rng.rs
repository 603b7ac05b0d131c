//! Deterministic per-agent random streams.
//!
//! An agent's stream is seeded from the scene seed and its id:
//!
//!   seed = scene_seed XOR (agent_id * MIXING_CONSTANT)
//!
//! `MIXING_CONSTANT` is the golden-ratio fraction scaled to 64 bits, so
//! neighbouring ids land far apart in seed space.  Spawning one more
//! character leaves everybody else's stream untouched, and a seeded scene
//! replays tick for tick.

use std::f64::consts::TAU;

use rand::distributions::uniform::{SampleRange, SampleUniform};
use rand::distributions::{Distribution, Standard};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::AgentId;

const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// One agent's random stream.  Owned by the agent; never shared.
pub struct AgentRng(SmallRng);

impl AgentRng {
    pub fn new(scene_seed: u64, agent: AgentId) -> Self {
        let seed = scene_seed ^ u64::from(agent.0).wrapping_mul(MIXING_CONSTANT);
        Self(SmallRng::seed_from_u64(seed))
    }

    /// Uniform in `[0, 1)`.
    #[inline]
    pub fn unit(&mut self) -> f64 {
        Standard.sample(&mut self.0)
    }

    /// Uniform in `range` (half-open or inclusive).
    #[inline]
    pub fn gen_range<T: SampleUniform, R: SampleRange<T>>(&mut self, range: R) -> T {
        self.0.gen_range(range)
    }

    /// A point drawn uniformly from the disk of `radius` around the x/z
    /// origin, returned as `(x, z)`.
    ///
    /// Uses the square-root radius transform so the density is uniform over
    /// area rather than bunched at the center.  A zero (or negative) radius
    /// always yields the origin.
    pub fn sample_in_disk(&mut self, radius: f64) -> (f64, f64) {
        if radius <= 0.0 {
            return (0.0, 0.0);
        }
        let r = radius * self.unit().sqrt();
        let theta = TAU * self.unit();
        (r * theta.cos(), r * theta.sin())
    }
}
