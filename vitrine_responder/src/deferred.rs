// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cancellable deferred actions on a virtual clock.
//!
//! ## Overview
//!
//! Hover intent and hide grace periods are modeled as actions that become due
//! after a delay. Each action occupies a *slot* (for example "tooltip show" or
//! "popover hide"); scheduling into an occupied slot cancels the prior action.
//! A new intent therefore always supersedes the previous one for the same
//! owner, and a stale show can never fire after a newer hide.
//!
//! The clock only moves when [`DeferredQueue::advance`] is called, which keeps
//! the queue deterministic and independent of any timer API.
//!
//! ```
//! use core::time::Duration;
//! use vitrine_responder::deferred::DeferredQueue;
//!
//! let mut q: DeferredQueue<&str, u32> = DeferredQueue::new();
//! q.schedule("show", Duration::from_millis(200), 1);
//! // Re-scheduling the slot replaces the pending action.
//! assert_eq!(q.schedule("show", Duration::from_millis(50), 2), Some(1));
//! assert!(q.advance(Duration::from_millis(49)).is_empty());
//! assert_eq!(q.advance(Duration::from_millis(1)), vec![("show", 2)]);
//! ```

use alloc::vec::Vec;
use core::time::Duration;

#[derive(Clone, Debug)]
struct Entry<S, A> {
    slot: S,
    due: Duration,
    seq: u64,
    action: A,
}

/// A queue of delayed actions keyed by slot.
#[derive(Clone, Debug)]
pub struct DeferredQueue<S, A> {
    now: Duration,
    next_seq: u64,
    entries: Vec<Entry<S, A>>,
}

impl<S: Copy + Eq, A> Default for DeferredQueue<S, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Copy + Eq, A> DeferredQueue<S, A> {
    /// Create an empty queue at time zero.
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_seq: 0,
            entries: Vec::new(),
        }
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of pending actions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Schedule `action` to run `delay` from now in `slot`.
    ///
    /// Returns the action previously pending in that slot, which is cancelled.
    pub fn schedule(&mut self, slot: S, delay: Duration, action: A) -> Option<A> {
        let previous = self.cancel(slot);
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.push(Entry {
            slot,
            due: self.now.saturating_add(delay),
            seq,
            action,
        });
        previous
    }

    /// Cancel the action pending in `slot`, returning it.
    pub fn cancel(&mut self, slot: S) -> Option<A> {
        let idx = self.entries.iter().position(|e| e.slot == slot)?;
        Some(self.entries.swap_remove(idx).action)
    }

    /// The action pending in `slot`, if any.
    pub fn pending(&self, slot: S) -> Option<&A> {
        self.entries
            .iter()
            .find(|e| e.slot == slot)
            .map(|e| &e.action)
    }

    /// Time left until the action in `slot` is due.
    pub fn remaining(&self, slot: S) -> Option<Duration> {
        self.entries
            .iter()
            .find(|e| e.slot == slot)
            .map(|e| e.due.saturating_sub(self.now))
    }

    /// Time left until the earliest pending action is due.
    pub fn next_due(&self) -> Option<Duration> {
        self.entries
            .iter()
            .map(|e| e.due.saturating_sub(self.now))
            .min()
    }

    /// Move the clock forward by `elapsed` and return due actions.
    ///
    /// Actions are returned in due order; actions due at the same instant come
    /// back in scheduling order.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<(S, A)> {
        self.now = self.now.saturating_add(elapsed);
        let now = self.now;
        let mut due = Vec::new();
        let mut i = 0;
        while i < self.entries.len() {
            if self.entries[i].due <= now {
                due.push(self.entries.swap_remove(i));
            } else {
                i += 1;
            }
        }
        due.sort_by_key(|e| (e.due, e.seq));
        due.into_iter().map(|e| (e.slot, e.action)).collect()
    }

    /// Drop every pending action.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    const fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn due_actions_fire_in_order() {
        let mut q: DeferredQueue<u8, &str> = DeferredQueue::new();
        q.schedule(1, ms(300), "late");
        q.schedule(2, ms(100), "early");
        q.schedule(3, ms(100), "early-second");
        assert_eq!(q.next_due(), Some(ms(100)));
        assert_eq!(
            q.advance(ms(300)),
            vec![(2, "early"), (3, "early-second"), (1, "late")]
        );
        assert!(q.is_empty());
    }

    #[test]
    fn cancel_prevents_firing() {
        let mut q: DeferredQueue<u8, ()> = DeferredQueue::new();
        q.schedule(1, ms(100), ());
        assert_eq!(q.cancel(1), Some(()));
        assert_eq!(q.cancel(1), None);
        assert!(q.advance(ms(1000)).is_empty());
    }

    #[test]
    fn reschedule_restarts_delay_from_now() {
        let mut q: DeferredQueue<u8, u8> = DeferredQueue::new();
        q.schedule(1, ms(100), 1);
        assert!(q.advance(ms(80)).is_empty());
        assert_eq!(q.schedule(1, ms(100), 2), Some(1));
        assert_eq!(q.remaining(1), Some(ms(100)));
        assert!(q.advance(ms(80)).is_empty());
        assert_eq!(q.advance(ms(20)), vec![(1, 2)]);
        assert_eq!(q.now(), ms(180));
    }

    #[test]
    fn slots_are_independent() {
        let mut q: DeferredQueue<u8, u8> = DeferredQueue::new();
        q.schedule(1, ms(10), 1);
        q.schedule(2, ms(10), 2);
        q.cancel(1);
        assert_eq!(q.pending(2), Some(&2));
        assert_eq!(q.len(), 1);
        assert_eq!(q.advance(ms(10)), vec![(2, 2)]);
    }

    #[test]
    fn zero_delay_fires_on_next_advance() {
        let mut q: DeferredQueue<u8, u8> = DeferredQueue::new();
        q.schedule(1, Duration::ZERO, 7);
        assert_eq!(q.advance(Duration::ZERO), vec![(1, 7)]);
    }
}
