// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Background delivery worker.
//!
//! One task per process. It sleeps until the registry's next wake time,
//! fires whatever is due, and re-reads the schedule whenever the registry
//! signals that the wake time moved.

use crate::registry::{AlarmRegistry, Due};
use alarm_adapters::DeliverySink;
use alarm_core::{format_remaining, Clock, Event};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Notify;
use tokio::task::{JoinError, JoinHandle};

/// Worker options
#[derive(Debug, Clone, Copy, Default)]
pub struct SchedulerConfig {
    /// Also emit `AlarmReplaced` and `AlarmRemoved` events.
    pub lifecycle_events: bool,
}

/// What the worker is doing between dispatch passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    /// Nothing scheduled; wait for a wake signal.
    Idle,
    /// Sleep until the deadline or a wake signal.
    Waiting(Instant),
    /// Something is already due.
    Dispatching,
}

impl WorkerState {
    /// Classify the registry's next wake time.
    pub fn from_next_wake(next_wake: Option<Instant>, now: Instant) -> Self {
        match next_wake {
            None => WorkerState::Idle,
            Some(deadline) if deadline <= now => WorkerState::Dispatching,
            Some(deadline) => WorkerState::Waiting(deadline),
        }
    }
}

/// Counters reported when the worker stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerStats {
    pub delivered: u64,
    pub failed: u64,
    pub cancelled: u64,
}

/// The delivery worker. Call [`spawn`](Self::spawn) to start it.
pub struct SchedulerWorker<S, C> {
    registry: Arc<AlarmRegistry>,
    sink: S,
    clock: C,
    config: SchedulerConfig,
    shutdown: Arc<Notify>,
    stats: WorkerStats,
}

impl<S, C> SchedulerWorker<S, C>
where
    S: DeliverySink,
    C: Clock,
{
    pub fn new(registry: Arc<AlarmRegistry>, sink: S, clock: C, config: SchedulerConfig) -> Self {
        Self {
            registry,
            sink,
            clock,
            config,
            shutdown: Arc::new(Notify::new()),
            stats: WorkerStats::default(),
        }
    }

    /// Start the worker on the current tokio runtime.
    pub fn spawn(self) -> SchedulerHandle {
        let shutdown = Arc::clone(&self.shutdown);
        let join = tokio::spawn(self.run());
        SchedulerHandle { shutdown, join }
    }

    /// Run until shutdown is requested.
    pub async fn run(mut self) -> WorkerStats {
        tracing::info!("scheduler started");
        let shutdown = Arc::clone(&self.shutdown);
        let registry = Arc::clone(&self.registry);

        loop {
            self.dispatch().await;

            let now = self.clock.now();
            let state = WorkerState::from_next_wake(registry.peek_next_wake(), now);
            match state {
                WorkerState::Dispatching => continue,
                WorkerState::Idle => {
                    tracing::debug!("idle");
                    tokio::select! {
                        _ = registry.woken() => {}
                        _ = shutdown.notified() => break,
                    }
                }
                WorkerState::Waiting(deadline) => {
                    let remaining = deadline.saturating_duration_since(now);
                    tracing::debug!(deadline_in = %format_remaining(remaining), "waiting");
                    tokio::select! {
                        _ = registry.woken() => {}
                        _ = tokio::time::sleep(remaining) => {}
                        _ = shutdown.notified() => break,
                    }
                }
            }
        }

        tracing::info!(
            delivered = self.stats.delivered,
            failed = self.stats.failed,
            cancelled = self.stats.cancelled,
            "scheduler stopped"
        );
        self.stats
    }

    /// One pass: report replacements, then fire and drop whatever is due.
    async fn dispatch(&mut self) {
        if self.config.lifecycle_events {
            let at = self.clock.epoch_secs();
            for alarm in self.registry.take_replaced() {
                self.emit(&Event::replaced(&alarm, at)).await;
            }
        }

        let due = self.registry.pop_due(self.clock.now());
        if due.is_empty() {
            return;
        }
        let at = self.clock.epoch_secs();
        for entry in due {
            match entry {
                Due::Fire(alarm) => {
                    let event = Event::fired(&alarm, at);
                    if self.emit(&event).await {
                        self.stats.delivered += 1;
                        tracing::info!(alarm_id = %alarm.id, seconds = alarm.seconds, "alarm fired");
                    } else {
                        self.stats.failed += 1;
                    }
                }
                Due::Cancelled(alarm) => {
                    self.stats.cancelled += 1;
                    tracing::debug!(alarm_id = %alarm.id, "dropped cancelled alarm");
                    if self.config.lifecycle_events {
                        self.emit(&Event::removed(&alarm, at)).await;
                    }
                }
            }
        }
    }

    /// Deliver one event; failures are logged and never stop the loop.
    async fn emit(&self, event: &Event) -> bool {
        match self.sink.deliver(event).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    event = event.name(),
                    alarm_id = ?event.alarm_id().map(|id| id.get()),
                    error = %e,
                    "delivery failed"
                );
                false
            }
        }
    }
}

/// Handle to a running worker.
pub struct SchedulerHandle {
    shutdown: Arc<Notify>,
    join: JoinHandle<WorkerStats>,
}

impl SchedulerHandle {
    /// Ask the worker to stop after its current pass.
    pub fn shutdown(&self) {
        self.shutdown.notify_one();
    }

    /// Wait for the worker to exit.
    pub async fn join(self) -> Result<WorkerStats, JoinError> {
        self.join.await
    }

    /// Request shutdown and wait for the worker to exit.
    pub async fn stop(self) -> Result<WorkerStats, JoinError> {
        self.shutdown();
        self.join().await
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
