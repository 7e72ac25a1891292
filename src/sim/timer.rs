//! Virtual-clock timer queue
//!
//! The only source of time in the simulation. The host advances the clock by
//! real elapsed milliseconds; due timers are popped in (due, id) order. Timers
//! are plain data so a cancelled handle can never run anything.

use std::collections::BTreeMap;

/// What a timer does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Start of the next appearance (or level end after the last one)
    Cadence,
    /// End of the visible window for the given appearance
    Hide { appearance: u32 },
}

/// Cancellable handle to a scheduled timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerHandle {
    id: u64,
    due_ms: u64,
}

impl TimerHandle {
    pub fn due_ms(&self) -> u64 {
        self.due_ms
    }
}

/// Ordered set of pending timers plus the current virtual time
#[derive(Debug, Default)]
pub struct Timers {
    now_ms: u64,
    next_id: u64,
    pending: BTreeMap<(u64, u64), TimerKind>,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time (ms)
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Number of live timers
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Schedule `kind` to fire `delay_ms` from now
    pub fn schedule(&mut self, delay_ms: u64, kind: TimerKind) -> TimerHandle {
        let handle = TimerHandle {
            id: self.next_id,
            due_ms: self.now_ms + delay_ms,
        };
        self.next_id += 1;
        self.pending.insert((handle.due_ms, handle.id), kind);
        handle
    }

    /// Cancel a timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        self.pending.remove(&(handle.due_ms, handle.id)).is_some()
    }

    /// Pop the earliest timer due at or before `until_ms`, moving the clock to
    /// its due time.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<(TimerHandle, TimerKind)> {
        let (&(due_ms, id), _) = self.pending.first_key_value()?;
        if due_ms > until_ms {
            return None;
        }
        let kind = self.pending.remove(&(due_ms, id))?;
        self.now_ms = self.now_ms.max(due_ms);
        Some((TimerHandle { id, due_ms }, kind))
    }

    /// Move the clock forward without firing anything
    pub fn set_now(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }
}
