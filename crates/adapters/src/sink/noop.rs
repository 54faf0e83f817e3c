// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! No-op sink.

use super::{DeliverySink, SinkError};
use alarm_core::Event;
use async_trait::async_trait;

/// Sink that silently discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpSink;

impl NoOpSink {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DeliverySink for NoOpSink {
    async fn deliver(&self, _event: &Event) -> Result<(), SinkError> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "noop_tests.rs"]
mod tests;
