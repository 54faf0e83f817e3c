// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Line-oriented console sink.
//!
//! Rejections go to the error stream, everything else to the output stream.

use super::{DeliverySink, SinkError};
use alarm_core::Event;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::io::{Stderr, Stdout, Write};
use std::sync::Arc;

/// How each event is rendered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineFormat {
    /// The event's `Display` line
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

impl LineFormat {
    pub fn render(self, event: &Event) -> Result<String, SinkError> {
        match self {
            LineFormat::Text => Ok(event.to_string()),
            LineFormat::Json => Ok(serde_json::to_string(event)?),
        }
    }
}

/// Sink writing one line per event to a pair of writers.
pub struct WriterSink<O, E> {
    out: Arc<Mutex<O>>,
    err: Arc<Mutex<E>>,
    format: LineFormat,
}

// Manual impl: the writers themselves need not be Clone.
impl<O, E> Clone for WriterSink<O, E> {
    fn clone(&self) -> Self {
        Self {
            out: Arc::clone(&self.out),
            err: Arc::clone(&self.err),
            format: self.format,
        }
    }
}

impl<O, E> WriterSink<O, E>
where
    O: Write + Send + 'static,
    E: Write + Send + 'static,
{
    pub fn new(out: O, err: E, format: LineFormat) -> Self {
        Self {
            out: Arc::new(Mutex::new(out)),
            err: Arc::new(Mutex::new(err)),
            format,
        }
    }

    /// Run `f` against the output writer.
    pub fn with_out<R>(&self, f: impl FnOnce(&mut O) -> R) -> R {
        f(&mut self.out.lock())
    }

    /// Run `f` against the error writer.
    pub fn with_err<R>(&self, f: impl FnOnce(&mut E) -> R) -> R {
        f(&mut self.err.lock())
    }

    fn write_line(&self, event: &Event) -> Result<(), SinkError> {
        let line = self.format.render(event)?;
        if event.is_error() {
            let mut err = self.err.lock();
            writeln!(err, "{line}")?;
            err.flush()?;
        } else {
            let mut out = self.out.lock();
            writeln!(out, "{line}")?;
            out.flush()?;
        }
        Ok(())
    }
}

/// Console sink on the process's stdout and stderr.
pub type ConsoleSink = WriterSink<Stdout, Stderr>;

impl ConsoleSink {
    pub fn stdio(format: LineFormat) -> Self {
        Self::new(std::io::stdout(), std::io::stderr(), format)
    }
}

#[async_trait]
impl<O, E> DeliverySink for WriterSink<O, E>
where
    O: Write + Send + 'static,
    E: Write + Send + 'static,
{
    async fn deliver(&self, event: &Event) -> Result<(), SinkError> {
        self.write_line(event)
    }
}

#[cfg(test)]
#[path = "console_tests.rs"]
mod tests;
