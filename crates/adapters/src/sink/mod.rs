// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Delivery sinks: where alarm events end up

mod console;
mod desktop;
mod fanout;
mod noop;

pub use console::{ConsoleSink, LineFormat, WriterSink};
pub use desktop::DesktopNotifySink;
pub use fanout::FanoutSink;
pub use noop::NoOpSink;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeSink;

use alarm_core::Event;
use async_trait::async_trait;
use thiserror::Error;

/// Errors from delivering an event
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("encode failed: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("send failed: {0}")]
    SendFailed(String),
}

/// Destination for alarm events, invoked once per event.
#[async_trait]
pub trait DeliverySink: Clone + Send + Sync + 'static {
    async fn deliver(&self, event: &Event) -> Result<(), SinkError>;
}
