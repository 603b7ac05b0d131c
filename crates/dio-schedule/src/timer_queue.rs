//! `TimerQueue` — sparse per-tick deferred-event queue.
//!
//! An owner registers the tick at which it next needs attention (an idle
//! dwell running out, a routine hold ending) and the scene drains only the
//! events due at the current tick.
//!
//! # Cancellation
//!
//! `schedule` hands back a [`TimerId`].  A side index maps each live id to
//! its tick so `cancel` touches one bucket instead of scanning the queue.
//! Ids are never reused, so cancelling an id that already fired is a no-op.

use std::collections::{BTreeMap, HashMap};

use dio_core::{Tick, TimerId};

/// A queue mapping ticks → events due at that tick.
pub struct TimerQueue<E> {
    inner:   BTreeMap<Tick, Vec<(TimerId, E)>>,
    /// Live id → due tick, for O(log W) cancellation.
    index:   HashMap<TimerId, Tick>,
    next_id: u64,
}

impl<E> Default for TimerQueue<E> {
    fn default() -> Self {
        Self {
            inner:   BTreeMap::new(),
            index:   HashMap::new(),
            next_id: 0,
        }
    }
}

impl<E> TimerQueue<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `event` to fire at `tick`.
    pub fn schedule(&mut self, tick: Tick, event: E) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.inner.entry(tick).or_default().push((id, event));
        self.index.insert(id, tick);
        id
    }

    /// Cancel a pending event.  Returns `false` if `id` already fired or was
    /// cancelled before.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let Some(tick) = self.index.remove(&id) else {
            return false;
        };
        if let Some(bucket) = self.inner.get_mut(&tick) {
            bucket.retain(|(queued, _)| *queued != id);
            if bucket.is_empty() {
                self.inner.remove(&tick);
            }
        }
        true
    }

    /// Remove and return every event due at or before `now`, ordered by due
    /// tick and then by scheduling order.
    ///
    /// Returns an empty `Vec` (no allocation) on the common quiet tick.
    pub fn drain_due(&mut self, now: Tick) -> Vec<(TimerId, E)> {
        match self.next_tick() {
            Some(first) if first <= now => {}
            _ => return Vec::new(),
        }
        let later = self.inner.split_off(&now.offset(1));
        let due = std::mem::replace(&mut self.inner, later);
        let events: Vec<(TimerId, E)> = due.into_values().flatten().collect();
        for (id, _) in &events {
            self.index.remove(id);
        }
        events
    }

    /// `true` if `id` is still waiting to fire.
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.index.contains_key(&id)
    }

    /// The earliest tick with at least one queued event, or `None` if empty.
    pub fn next_tick(&self) -> Option<Tick> {
        self.inner.keys().next().copied()
    }

    /// Total number of pending events.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}
