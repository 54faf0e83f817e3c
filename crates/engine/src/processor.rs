// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command ingestion: turns parsed commands into registry mutations.

use crate::error::RegistryError;
use crate::registry::{AlarmRegistry, Mutation};
use alarm_adapters::DeliverySink;
use alarm_core::{AlarmId, AlarmRecord, AlarmSnapshot, Clock, Command, Event};
use std::sync::Arc;

/// Applies commands to the registry and reports what happened.
///
/// Holds no state of its own; cloning shares the registry and sink.
#[derive(Clone)]
pub struct CommandProcessor<S, C> {
    registry: Arc<AlarmRegistry>,
    sink: S,
    clock: C,
    /// Wake the worker on every replace so it reports it straight away.
    lifecycle_events: bool,
}

impl<S, C> CommandProcessor<S, C>
where
    S: DeliverySink,
    C: Clock,
{
    pub fn new(registry: Arc<AlarmRegistry>, sink: S, clock: C) -> Self {
        Self {
            registry,
            sink,
            clock,
            lifecycle_events: false,
        }
    }

    /// Match the worker's [`SchedulerConfig::lifecycle_events`](crate::SchedulerConfig).
    pub fn with_lifecycle_events(mut self, enabled: bool) -> Self {
        self.lifecycle_events = enabled;
        self
    }

    pub fn registry(&self) -> &Arc<AlarmRegistry> {
        &self.registry
    }

    /// Parse one input line and process it.
    ///
    /// Lines that do not match the grammar produce [`Event::BadCommand`].
    pub async fn process_line(&self, line: &str) -> Event {
        match Command::parse(line, self.registry.max_message_len()) {
            Ok(command) => self.process(command).await,
            Err(e) => {
                tracing::debug!(line, error = %e, "rejected command");
                self.emit(Event::BadCommand).await
            }
        }
    }

    /// Apply one command, wake the worker if the schedule moved, and emit
    /// the resulting observation.
    pub async fn process(&self, command: Command) -> Event {
        tracing::debug!(alarm_id = %command.id(), "processing command");
        let event = match command {
            Command::Insert {
                id,
                seconds,
                message,
            } => self.insert(id, seconds, message),
            Command::Cancel { id } => self.cancel(id),
        };
        self.emit(event).await
    }

    fn insert(&self, id: AlarmId, seconds: u64, message: String) -> Event {
        let received_at = self.clock.epoch_secs();
        let now = self.clock.now();
        let record = match AlarmRecord::new(
            id,
            seconds,
            message.clone(),
            now,
            self.registry.max_message_len(),
        ) {
            Ok(record) => record,
            Err(e) => {
                tracing::debug!(alarm_id = %id, error = %e, "invalid alarm");
                return Event::BadCommand;
            }
        };

        // A firing can remove the record between a failed insert and the
        // replace; go round again as a plain insert.
        loop {
            match self.registry.insert(record.clone()) {
                Ok(m) => return Event::received(&self.signal(m), received_at),
                Err(RegistryError::DuplicateId(_)) => {}
                Err(e) => {
                    tracing::warn!(alarm_id = %id, error = %e, "insert failed");
                    return Event::BadCommand;
                }
            }

            match self.registry.replace(id, seconds, message.clone(), now) {
                Ok(mut m) => {
                    m.wake |= self.lifecycle_events;
                    return Event::replacement_received(&self.signal(m), received_at);
                }
                Err(RegistryError::AlreadyCancelled(_)) => return Event::ReplaceRejected { id },
                Err(RegistryError::NotFound(_)) => {
                    tracing::debug!(alarm_id = %id, "alarm left the registry before replace");
                }
                Err(e) => {
                    tracing::warn!(alarm_id = %id, error = %e, "replace failed");
                    return Event::BadCommand;
                }
            }
        }
    }

    fn cancel(&self, id: AlarmId) -> Event {
        let received_at = self.clock.epoch_secs();
        match self.registry.cancel(id) {
            Ok(m) => Event::cancel_received(&self.signal(m), received_at),
            Err(RegistryError::AlreadyCancelled(_)) => Event::CancelDuplicate { id },
            Err(RegistryError::NotFound(_)) => Event::CancelUnknown { id },
            Err(e) => {
                tracing::warn!(alarm_id = %id, error = %e, "cancel failed");
                Event::BadCommand
            }
        }
    }

    /// Wake the worker when the mutation moved the next wake time.
    fn signal(&self, m: Mutation) -> AlarmSnapshot {
        if m.wake {
            self.registry.wake();
        }
        m.alarm
    }

    async fn emit(&self, event: Event) -> Event {
        if let Err(e) = self.sink.deliver(&event).await {
            tracing::warn!(event = event.name(), error = %e, "delivery failed");
        }
        event
    }
}

#[cfg(test)]
#[path = "processor_tests.rs"]
mod tests;
