//! `dio-schedule` — deferred events, scripted routines, and CSV loading.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`timer_queue`] | `TimerQueue<E>` (`BTreeMap<Tick, Vec<(TimerId, E)>>`)     |
//! | [`routine`]     | `Hold`, `RoutineStep`, `Routine`                          |
//! | [`loader`]      | `load_routines_csv`, `load_routines_reader`               |
//! | [`error`]       | `ScheduleError`, `ScheduleResult<T>`                      |
//!
//! # Waiting without blocking
//!
//! Nothing in the scene ever sleeps.  "Idle for four seconds" or "hold this
//! pose for 5–10 s" becomes an event pushed into the `TimerQueue` at the tick
//! it is due; the tick loop drains due events each frame.  Every event has a
//! `TimerId` so the owner can cancel it when it goes away.

pub mod error;
pub mod loader;
pub mod routine;
pub mod timer_queue;


pub use error::{ScheduleError, ScheduleResult};
pub use loader::{load_routines_csv, load_routines_reader};
pub use routine::{Hold, Routine, RoutineStep};
pub use timer_queue::TimerQueue;
