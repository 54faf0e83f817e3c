// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake sink for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{DeliverySink, SinkError};
use alarm_core::{AlarmId, Event};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Notify;

#[derive(Default)]
struct FakeSinkState {
    events: Vec<Event>,
    fail_all: bool,
    fail_fired: HashSet<AlarmId>,
}

/// Records every event; can be told to fail deliveries.
#[derive(Clone, Default)]
pub struct FakeSink {
    inner: Arc<Mutex<FakeSinkState>>,
    delivered: Arc<Notify>,
}

impl FakeSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All events delivered so far, including failed attempts.
    pub fn events(&self) -> Vec<Event> {
        self.inner.lock().events.clone()
    }

    /// Events delivered so far, rendered as console lines.
    pub fn lines(&self) -> Vec<String> {
        self.inner
            .lock()
            .events
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    /// Ids of `AlarmFired` events, in delivery order.
    pub fn fired_ids(&self) -> Vec<u64> {
        self.inner
            .lock()
            .events
            .iter()
            .filter_map(|e| match e {
                Event::AlarmFired { id, .. } => Some(id.get()),
                _ => None,
            })
            .collect()
    }

    /// Make every subsequent delivery fail.
    pub fn fail_all(&self, fail: bool) {
        self.inner.lock().fail_all = fail;
    }

    /// Make the firing of one alarm fail.
    pub fn fail_fired(&self, id: AlarmId) {
        self.inner.lock().fail_fired.insert(id);
    }

    /// Wait until at least `count` events have been delivered.
    pub async fn wait_for(&self, count: usize) {
        loop {
            let notified = self.delivered.notified();
            if self.inner.lock().events.len() >= count {
                return;
            }
            notified.await;
        }
    }
}

#[async_trait]
impl DeliverySink for FakeSink {
    async fn deliver(&self, event: &Event) -> Result<(), SinkError> {
        let fail = {
            let mut state = self.inner.lock();
            state.events.push(event.clone());
            state.fail_all
                || matches!(event, Event::AlarmFired { id, .. } if state.fail_fired.contains(id))
        };
        self.delivered.notify_waiters();
        if fail {
            return Err(SinkError::SendFailed(format!(
                "fake failure for {}",
                event.name()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
