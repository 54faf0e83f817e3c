// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared, deadline-ordered alarm registry.
//!
//! All state lives behind one mutex, held only for in-memory work. The
//! registry also owns the wake condition the scheduler sleeps on: every
//! mutation recomputes `next_wake` under the lock before reporting whether
//! the scheduler must be woken, so the scheduler's first read after a wake
//! always sees the latest state.
//!
//! Cancellation is lazy: `cancel` only flags the record, and the next
//! `pop_due` removes it.

use crate::error::RegistryError;
use alarm_core::alarm::{deadline_after, validate_message};
use alarm_core::{AlarmId, AlarmRecord, AlarmSnapshot, SequenceGen};
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap};
use std::time::Instant;
use tokio::sync::futures::Notified;
use tokio::sync::Notify;

/// Queue position: deadline first, then insertion sequence (FIFO tie-break).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct QueueKey {
    deadline: Instant,
    seq: u64,
}

#[derive(Debug, Default)]
struct RegistryState {
    queue: BTreeMap<QueueKey, AlarmRecord>,
    index: HashMap<AlarmId, QueueKey>,
    /// Earliest deadline among records that are not cancel-requested.
    next_wake: Option<Instant>,
    cancelled: usize,
}

impl RegistryState {
    fn key_of(&self, id: AlarmId) -> Result<QueueKey, RegistryError> {
        self.index
            .get(&id)
            .copied()
            .ok_or(RegistryError::NotFound(id))
    }

    fn recompute_next_wake(&mut self) {
        self.next_wake = self
            .queue
            .iter()
            .find(|(_, record)| !record.cancel_requested)
            .map(|(key, _)| key.deadline);
    }

    fn pending(&self) -> usize {
        self.queue.len() - self.cancelled
    }

    fn remove(&mut self, key: &QueueKey) -> Option<AlarmRecord> {
        let record = self.queue.remove(key)?;
        self.index.remove(&record.id);
        if record.cancel_requested {
            self.cancelled -= 1;
        }
        Some(record)
    }
}

/// Result of a successful mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mutation {
    /// The affected alarm, as it stands after the mutation.
    pub alarm: AlarmSnapshot,
    /// The scheduler's wake time moved; call [`AlarmRegistry::wake`].
    pub wake: bool,
}

/// An alarm removed by [`AlarmRegistry::pop_due`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Due {
    /// Deadline reached; deliver it.
    Fire(AlarmSnapshot),
    /// Cancel was requested; drop it.
    Cancelled(AlarmSnapshot),
}

impl Due {
    pub fn alarm(&self) -> &AlarmSnapshot {
        match self {
            Due::Fire(alarm) | Due::Cancelled(alarm) => alarm,
        }
    }
}

/// The set of live alarms plus the wake condition guarding their schedule.
pub struct AlarmRegistry {
    state: Mutex<RegistryState>,
    seq: SequenceGen,
    max_message_len: usize,
    wake: Notify,
    idle: Notify,
}

impl AlarmRegistry {
    pub fn new(max_message_len: usize) -> Self {
        Self {
            state: Mutex::new(RegistryState::default()),
            seq: SequenceGen::new(),
            max_message_len,
            wake: Notify::new(),
            idle: Notify::new(),
        }
    }

    pub fn max_message_len(&self) -> usize {
        self.max_message_len
    }

    /// Add a new alarm. Fails if a live record with the same id exists.
    pub fn insert(&self, record: AlarmRecord) -> Result<Mutation, RegistryError> {
        let mut state = self.state.lock();
        if state.index.contains_key(&record.id) {
            return Err(RegistryError::DuplicateId(record.id));
        }

        let key = QueueKey {
            deadline: record.deadline,
            seq: self.seq.next(),
        };
        let alarm = record.snapshot();
        state.index.insert(record.id, key);
        state.queue.insert(key, record);

        let wake = match state.next_wake {
            Some(current) if current <= key.deadline => false,
            _ => {
                state.next_wake = Some(key.deadline);
                true
            }
        };
        tracing::debug!(alarm_id = %alarm.id, seconds = alarm.seconds, wake, "inserted");
        Ok(Mutation { alarm, wake })
    }

    /// Re-arm a pending alarm with a new delay and message, measured from `now`.
    ///
    /// Fails with `NotFound` if no live record exists and `AlreadyCancelled`
    /// if the record is cancel-requested.
    pub fn replace(
        &self,
        id: AlarmId,
        seconds: u64,
        message: String,
        now: Instant,
    ) -> Result<Mutation, RegistryError> {
        deadline_after(now, seconds)?;
        validate_message(&message, self.max_message_len)?;

        let mut state = self.state.lock();
        let key = state.key_of(id)?;
        match state.queue.get_mut(&key) {
            None => return Err(RegistryError::NotFound(id)),
            Some(record) if record.cancel_requested => {
                return Err(RegistryError::AlreadyCancelled(id));
            }
            Some(record) => record.rearm(seconds, message, now)?,
        }
        let Some(record) = state.remove(&key) else {
            return Err(RegistryError::NotFound(id));
        };

        let key = QueueKey {
            deadline: record.deadline,
            seq: self.seq.next(),
        };
        let alarm = record.snapshot();
        state.index.insert(id, key);
        state.queue.insert(key, record);

        let before = state.next_wake;
        state.recompute_next_wake();
        let wake = state.next_wake != before;
        tracing::debug!(alarm_id = %id, seconds, wake, "replaced");
        Ok(Mutation { alarm, wake })
    }

    /// Flag a pending alarm as cancelled. The record stays until the next
    /// `pop_due`, but is never delivered.
    pub fn cancel(&self, id: AlarmId) -> Result<Mutation, RegistryError> {
        let mut state = self.state.lock();
        let key = state.key_of(id)?;
        let Some(record) = state.queue.get_mut(&key) else {
            return Err(RegistryError::NotFound(id));
        };
        if record.cancel_requested {
            return Err(RegistryError::AlreadyCancelled(id));
        }
        record.cancel_requested = true;
        let alarm = record.snapshot();
        state.cancelled += 1;

        let before = state.next_wake;
        if before == Some(key.deadline) {
            state.recompute_next_wake();
        }
        let wake = state.next_wake != before;
        if state.pending() == 0 {
            self.idle.notify_waiters();
        }
        tracing::debug!(alarm_id = %id, wake, "cancel requested");
        Ok(Mutation { alarm, wake })
    }

    /// Remove every alarm due at `now` plus every cancel-requested alarm.
    ///
    /// Due alarms come back in deadline order (insertion order on ties);
    /// cancelled alarms whose deadline has not passed follow them.
    pub fn pop_due(&self, now: Instant) -> Vec<Due> {
        let mut state = self.state.lock();
        let mut due = Vec::new();

        while let Some(entry) = state.queue.first_entry() {
            if entry.key().deadline > now {
                break;
            }
            let record = entry.remove();
            state.index.remove(&record.id);
            if record.cancel_requested {
                state.cancelled -= 1;
                due.push(Due::Cancelled(record.snapshot()));
            } else {
                due.push(Due::Fire(record.snapshot()));
            }
        }

        if state.cancelled > 0 {
            let swept: Vec<QueueKey> = state
                .queue
                .iter()
                .filter(|(_, record)| record.cancel_requested)
                .map(|(key, _)| *key)
                .collect();
            for key in swept {
                if let Some(record) = state.remove(&key) {
                    due.push(Due::Cancelled(record.snapshot()));
                }
            }
        }

        state.recompute_next_wake();
        if !due.is_empty() && state.pending() == 0 {
            self.idle.notify_waiters();
        }
        due
    }

    /// Earliest deadline among alarms that will still be delivered.
    pub fn peek_next_wake(&self) -> Option<Instant> {
        self.state.lock().next_wake
    }

    /// Copy of a live alarm, cancelled or not.
    pub fn get(&self, id: AlarmId) -> Result<AlarmSnapshot, RegistryError> {
        let state = self.state.lock();
        let key = state.key_of(id)?;
        state
            .queue
            .get(&key)
            .map(AlarmRecord::snapshot)
            .ok_or(RegistryError::NotFound(id))
    }

    pub fn is_cancel_requested(&self, id: AlarmId) -> Result<bool, RegistryError> {
        let state = self.state.lock();
        let key = state.key_of(id)?;
        state
            .queue
            .get(&key)
            .map(|record| record.cancel_requested)
            .ok_or(RegistryError::NotFound(id))
    }

    /// Number of live records, including cancel-requested ones.
    pub fn len(&self) -> usize {
        self.state.lock().queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().queue.is_empty()
    }

    /// Number of records that will still be delivered.
    pub fn pending(&self) -> usize {
        self.state.lock().pending()
    }

    /// Alarms that will still be delivered, in firing order.
    pub fn snapshot(&self) -> Vec<AlarmSnapshot> {
        self.state
            .lock()
            .queue
            .values()
            .filter(|record| !record.cancel_requested)
            .map(AlarmRecord::snapshot)
            .collect()
    }

    /// Collect alarms replaced since the last call and clear their flag.
    pub fn take_replaced(&self) -> Vec<AlarmSnapshot> {
        let mut state = self.state.lock();
        state
            .queue
            .values_mut()
            .filter(|record| record.replaced && !record.cancel_requested)
            .map(|record| {
                record.replaced = false;
                record.snapshot()
            })
            .collect()
    }

    /// Drop every record. Returns how many would still have been delivered.
    pub fn clear(&self) -> usize {
        let mut state = self.state.lock();
        let discarded = state.pending();
        *state = RegistryState::default();
        drop(state);
        self.idle.notify_waiters();
        self.wake();
        discarded
    }

    /// Signal the scheduler that `next_wake` changed.
    ///
    /// A signal sent while the scheduler is busy is kept and consumed by its
    /// next wait, so no wakeup is lost.
    pub fn wake(&self) {
        self.wake.notify_one();
    }

    /// Future resolving on the next [`wake`](Self::wake).
    pub fn woken(&self) -> Notified<'_> {
        self.wake.notified()
    }

    /// Wait until no alarm is left to deliver.
    pub async fn wait_idle(&self) {
        loop {
            let idle = self.idle.notified();
            if self.pending() == 0 {
                return;
            }
            idle.await;
        }
    }
}

impl std::fmt::Debug for AlarmRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("AlarmRegistry")
            .field("live", &state.queue.len())
            .field("cancelled", &state.cancelled)
            .field("next_wake", &state.next_wake)
            .finish()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
