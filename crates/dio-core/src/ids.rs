//! Typed handles for agents, surfaces and timers.
//!
//! Each is a `Copy` newtype over an integer, ordered and hashable, so it can
//! key a map or sort a list.  Agents and surfaces are dense indices into
//! their owner's `Vec` (see `.index()`); timer handles only ever grow.

use std::fmt;

macro_rules! typed_id {
    ($(#[$attr:meta])* $name:ident($inner:ty)) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name(pub $inner);

        impl $name {
            /// Position in the owning `Vec`.
            #[inline]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }
    };
}

typed_id!(
    /// A character (wanderer or performer) in the scene.  Never reused after
    /// a despawn.
    AgentId(u32)
);

typed_id!(
    /// A surface registered with a `SurfaceRegistry`.
    SurfaceId(u32)
);

typed_id!(
    /// A deferred event in a `TimerQueue`.  Never reused within one queue,
    /// so a stale handle can't cancel somebody else's timer.
    TimerId(u64)
);
