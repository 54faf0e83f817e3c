// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Deliver to two sinks.

use super::{DeliverySink, SinkError};
use alarm_core::Event;
use async_trait::async_trait;

/// Delivers every event to `primary`, then `secondary`.
///
/// Both sinks are always attempted; the first error is returned.
#[derive(Clone, Debug)]
pub struct FanoutSink<A, B> {
    primary: A,
    secondary: B,
}

impl<A, B> FanoutSink<A, B> {
    pub fn new(primary: A, secondary: B) -> Self {
        Self { primary, secondary }
    }
}

#[async_trait]
impl<A: DeliverySink, B: DeliverySink> DeliverySink for FanoutSink<A, B> {
    async fn deliver(&self, event: &Event) -> Result<(), SinkError> {
        let first = self.primary.deliver(event).await;
        let second = self.secondary.deliver(event).await;
        first.and(second)
    }
}

#[cfg(test)]
#[path = "fanout_tests.rs"]
mod tests;
