//! Picks the next behavior state.

use dio_core::AgentRng;

use crate::Behavior;

/// Uniform state draw that never repeats the previous state.
///
/// Each draw is 25 % per state.  A draw equal to the previous state is
/// thrown away and redrawn, up to `max_redraws` times.  If all of those
/// repeat too, the result is taken uniformly from the three other states,
/// so two consecutive decisions always differ.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BehaviorSelector {
    pub max_redraws: u32,
}

impl BehaviorSelector {
    pub fn new(max_redraws: u32) -> Self {
        Self { max_redraws }
    }

    /// Draw the state that follows `previous` (`None` for the first decision).
    pub fn next(&self, previous: Option<Behavior>, rng: &mut AgentRng) -> Behavior {
        let mut draw = Self::draw(rng);
        let Some(previous) = previous else {
            return draw;
        };

        let mut redraws = 0;
        while draw == previous && redraws < self.max_redraws {
            draw = Self::draw(rng);
            redraws += 1;
        }
        if draw != previous {
            return draw;
        }

        // Skip over `previous` when indexing the remaining three.
        let mut i = rng.gen_range(0..Behavior::ALL.len() - 1);
        if i >= previous.index() {
            i += 1;
        }
        Behavior::ALL[i]
    }

    #[inline]
    fn draw(rng: &mut AgentRng) -> Behavior {
        Behavior::ALL[rng.gen_range(0..Behavior::ALL.len())]
    }
}

impl Default for BehaviorSelector {
    fn default() -> Self {
        Self::new(5)
    }
}
