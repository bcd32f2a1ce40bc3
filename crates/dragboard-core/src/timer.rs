#![forbid(unsafe_code)]

//! Single-threaded timer queue with generational cancellation tokens.
//!
//! Deferred work (auto-scroll ticks, hold windows) is expressed as entries in
//! a [`TimerQueue`]. The owner polls the queue with the current time from its
//! event loop; nothing here blocks, sleeps, or spawns threads.
//!
//! # Invariants
//!
//! 1. A [`TimerToken`] identifies exactly one scheduled entry. Once that entry
//!    fires or is cancelled, the token is stale forever: slot reuse bumps the
//!    slot generation.
//! 2. [`TimerQueue::pop_due`] yields entries in due order; entries with the
//!    same due time fire in scheduling order.
//! 3. Cancelling a stale token is a no-op returning `false`.
//!
//! # Failure Modes
//!
//! - Owners that keep a token after the entry fired must compare it against
//!   the fired token before acting; a stale match is impossible by (1).

use std::time::Duration;

use web_time::Instant;

/// Handle to a scheduled timer entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken {
    slot: u32,
    generation: u32,
}

#[derive(Debug)]
struct Entry<T> {
    due: Instant,
    seq: u64,
    payload: T,
}

#[derive(Debug)]
struct Slot<T> {
    generation: u32,
    entry: Option<Entry<T>>,
}

/// Arena of pending timers keyed by generational tokens.
#[derive(Debug)]
pub struct TimerQueue<T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    live: usize,
    next_seq: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            live: 0,
            next_seq: 0,
        }
    }

    /// Schedule `payload` to fire at `due`.
    pub fn schedule(&mut self, due: Instant, payload: T) -> TimerToken {
        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        let entry = Entry { due, seq, payload };
        self.live += 1;

        if let Some(slot) = self.free.pop() {
            let cell = &mut self.slots[slot as usize];
            cell.entry = Some(entry);
            return TimerToken {
                slot,
                generation: cell.generation,
            };
        }

        let slot = u32::try_from(self.slots.len()).unwrap_or(u32::MAX);
        self.slots.push(Slot {
            generation: 0,
            entry: Some(entry),
        });
        TimerToken {
            slot,
            generation: 0,
        }
    }

    /// Schedule `payload` to fire `delay` after `now`.
    pub fn schedule_after(&mut self, now: Instant, delay: Duration, payload: T) -> TimerToken {
        self.schedule(now + delay, payload)
    }

    /// Cancel a pending entry. Returns `false` for stale tokens.
    pub fn cancel(&mut self, token: TimerToken) -> bool {
        self.take(token).is_some()
    }

    /// Whether `token` still refers to a pending entry.
    #[must_use]
    pub fn is_pending(&self, token: TimerToken) -> bool {
        self.slots
            .get(token.slot as usize)
            .is_some_and(|s| s.generation == token.generation && s.entry.is_some())
    }

    /// Remove and return the earliest entry due at or before `now`.
    pub fn pop_due(&mut self, now: Instant) -> Option<(TimerToken, T)> {
        let (slot, generation) = self
            .slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.entry.as_ref().map(|e| (i, s.generation, e)))
            .filter(|(_, _, e)| e.due <= now)
            .min_by_key(|(_, _, e)| (e.due, e.seq))
            .map(|(i, generation, _)| (i, generation))?;
        let token = TimerToken {
            slot: u32::try_from(slot).unwrap_or(u32::MAX),
            generation,
        };
        self.take(token).map(|payload| (token, payload))
    }

    /// Earliest pending due time.
    #[must_use]
    pub fn next_due(&self) -> Option<Instant> {
        self.slots
            .iter()
            .filter_map(|s| s.entry.as_ref().map(|e| e.due))
            .min()
    }

    /// Number of pending entries.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.live
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Cancel every pending entry. All outstanding tokens become stale.
    pub fn clear(&mut self) {
        for (i, slot) in self.slots.iter_mut().enumerate() {
            if slot.entry.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(u32::try_from(i).unwrap_or(u32::MAX));
            }
        }
        self.live = 0;
    }

    fn take(&mut self, token: TimerToken) -> Option<T> {
        let slot = self.slots.get_mut(token.slot as usize)?;
        if slot.generation != token.generation {
            return None;
        }
        let entry = slot.entry.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(token.slot);
        self.live -= 1;
        Some(entry.payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_10: Duration = Duration::from_millis(10);
    const MS_20: Duration = Duration::from_millis(20);

    #[test]
    fn fires_in_due_order() {
        let t = Instant::now();
        let mut q = TimerQueue::new();
        q.schedule(t + MS_20, "late");
        q.schedule(t + MS_10, "early");

        assert!(q.pop_due(t).is_none());
        assert_eq!(q.pop_due(t + MS_20).map(|(_, p)| p), Some("early"));
        assert_eq!(q.pop_due(t + MS_20).map(|(_, p)| p), Some("late"));
        assert!(q.is_empty());
    }

    #[test]
    fn same_due_fires_fifo() {
        let t = Instant::now();
        let mut q = TimerQueue::new();
        q.schedule(t, 1);
        q.schedule(t, 2);
        q.schedule(t, 3);
        let order: Vec<_> = std::iter::from_fn(|| q.pop_due(t).map(|(_, p)| p)).collect();
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[test]
    fn cancel_prevents_firing() {
        let t = Instant::now();
        let mut q = TimerQueue::new();
        let token = q.schedule(t, ());
        assert!(q.is_pending(token));
        assert!(q.cancel(token));
        assert!(!q.is_pending(token));
        assert!(q.pop_due(t + MS_10).is_none());
    }

    #[test]
    fn stale_token_cannot_cancel_reused_slot() {
        let t = Instant::now();
        let mut q = TimerQueue::new();
        let first = q.schedule(t, "first");
        assert!(q.cancel(first));

        let second = q.schedule(t, "second");
        assert_ne!(first, second);
        assert!(!q.cancel(first));
        assert!(q.is_pending(second));
        assert_eq!(q.pop_due(t).map(|(_, p)| p), Some("second"));
    }

    #[test]
    fn fired_token_becomes_stale() {
        let t = Instant::now();
        let mut q = TimerQueue::new();
        let token = q.schedule(t, ());
        let (fired, ()) = q.pop_due(t).expect("due entry");
        assert_eq!(fired, token);
        assert!(!q.is_pending(token));
        assert!(!q.cancel(token));
    }

    #[test]
    fn clear_invalidates_everything() {
        let t = Instant::now();
        let mut q = TimerQueue::new();
        let a = q.schedule(t, 1);
        let b = q.schedule_after(t, MS_10, 2);
        q.clear();
        assert!(q.is_empty());
        assert!(!q.is_pending(a));
        assert!(!q.is_pending(b));
        assert!(q.next_due().is_none());
    }

    #[test]
    fn next_due_reports_minimum() {
        let t = Instant::now();
        let mut q = TimerQueue::new();
        q.schedule(t + MS_20, ());
        q.schedule(t + MS_10, ());
        assert_eq!(q.next_due(), Some(t + MS_10));
        assert_eq!(q.len(), 2);
    }
}
