// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced sink wrapper for consistent observability

use crate::sink::{DeliverySink, SinkError};
use alarm_core::Event;
use async_trait::async_trait;
use tracing::Instrument;

/// Wrapper that adds tracing to any DeliverySink
#[derive(Clone)]
pub struct TracedSink<S> {
    inner: S,
}

impl<S> TracedSink<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

#[async_trait]
impl<S: DeliverySink> DeliverySink for TracedSink<S> {
    async fn deliver(&self, event: &Event) -> Result<(), SinkError> {
        let alarm_id = event.alarm_id().map(|id| id.get());
        let span = tracing::debug_span!("sink.deliver", event = event.name(), ?alarm_id);
        async {
            let start = std::time::Instant::now();
            let result = self.inner.deliver(event).await;
            let elapsed_us = start.elapsed().as_micros() as u64;
            match &result {
                Ok(()) => tracing::trace!(elapsed_us, "delivered"),
                Err(e) => tracing::error!(elapsed_us, error = %e, "delivery failed"),
            }
            result
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
