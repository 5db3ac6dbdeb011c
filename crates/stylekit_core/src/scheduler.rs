//! One-shot timers on a virtual clock
//!
//! The host owns time: it advances the clock and the queue hands back every
//! timer that came due, earliest first. Timers due at the same instant fire
//! in the order they were scheduled.

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    pub struct TimerId;
}

struct Timer<K> {
    due: u64,
    seq: u64,
    owner: K,
    token: u64,
}

/// A timer that came due
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fired<K> {
    pub id: TimerId,
    pub owner: K,
    pub token: u64,
    pub due: u64,
}

/// Queue of pending one-shot timers
pub struct TimerQueue<K> {
    timers: SlotMap<TimerId, Timer<K>>,
    now: u64,
    next_seq: u64,
}

impl<K: Copy + Eq> TimerQueue<K> {
    pub fn new() -> Self {
        Self {
            timers: SlotMap::with_key(),
            now: 0,
            next_seq: 0,
        }
    }

    /// Current clock value in milliseconds
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Schedule `token` for `owner` to fire `delay_ms` from now
    pub fn schedule(&mut self, owner: K, delay_ms: u64, token: u64) -> TimerId {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.timers.insert(Timer {
            due: self.now + delay_ms,
            seq,
            owner,
            token,
        })
    }

    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.timers.remove(id).is_some()
    }

    pub fn cancel_owner(&mut self, owner: K) {
        self.timers.retain(|_, t| t.owner != owner);
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.contains_key(id)
    }

    /// Due time of the next pending timer
    pub fn next_due(&self) -> Option<u64> {
        self.timers.values().map(|t| t.due).min()
    }

    /// Pop the earliest timer due at or before `until`, moving the clock to its due time
    pub fn pop_due(&mut self, until: u64) -> Option<Fired<K>> {
        let (id, _) = self
            .timers
            .iter()
            .filter(|(_, t)| t.due <= until)
            .min_by_key(|(_, t)| (t.due, t.seq))?;
        let timer = self.timers.remove(id)?;
        self.now = self.now.max(timer.due);
        Some(Fired {
            id,
            owner: timer.owner,
            token: timer.token,
            due: timer.due,
        })
    }

    /// Move the clock forward without firing anything
    pub fn settle(&mut self, until: u64) {
        self.now = self.now.max(until);
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}

impl<K: Copy + Eq> Default for TimerQueue<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_in_due_order() {
        let mut timers: TimerQueue<u32> = TimerQueue::new();
        timers.schedule(1, 300, 10);
        timers.schedule(2, 100, 20);

        let first = timers.pop_due(1000).unwrap();
        assert_eq!((first.owner, first.token, first.due), (2, 20, 100));
        assert_eq!(timers.now(), 100);

        let second = timers.pop_due(1000).unwrap();
        assert_eq!((second.owner, second.due), (1, 300));
        assert!(timers.pop_due(1000).is_none());
    }

    #[test]
    fn test_not_due_yet() {
        let mut timers: TimerQueue<u32> = TimerQueue::new();
        timers.schedule(1, 500, 0);

        assert!(timers.pop_due(499).is_none());
        timers.settle(499);
        assert_eq!(timers.now(), 499);
        assert!(timers.pop_due(500).is_some());
    }

    #[test]
    fn test_ties_fire_in_schedule_order() {
        let mut timers: TimerQueue<u32> = TimerQueue::new();
        timers.schedule(1, 50, 1);
        timers.schedule(1, 50, 2);

        assert_eq!(timers.pop_due(50).unwrap().token, 1);
        assert_eq!(timers.pop_due(50).unwrap().token, 2);
    }

    #[test]
    fn test_cancel() {
        let mut timers: TimerQueue<u32> = TimerQueue::new();
        let id = timers.schedule(1, 10, 0);
        timers.schedule(2, 10, 0);

        assert!(timers.cancel(id));
        assert!(!timers.is_pending(id));
        timers.cancel_owner(2);
        assert!(timers.is_empty());
    }

    #[test]
    fn test_delay_is_relative_to_clock() {
        let mut timers: TimerQueue<u32> = TimerQueue::new();
        timers.settle(600);
        timers.schedule(1, 1200, 0);

        assert_eq!(timers.next_due(), Some(1800));
    }
}
