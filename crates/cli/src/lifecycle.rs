// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process lifecycle: configuration, logging, shutdown.

use std::path::PathBuf;

use alarm_core::DEFAULT_MAX_MESSAGE_LEN;
use alarm_engine::{AlarmRegistry, SchedulerConfig, SchedulerHandle};
use thiserror::Error;
use tracing::info;

use crate::env;
use crate::output::OutputFormat;
use crate::Cli;

/// Resolved runtime configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub output: OutputFormat,
    pub max_message_len: usize,
    pub lifecycle_events: bool,
    pub notify: bool,
    pub drain: bool,
    pub prompt: bool,
    /// Path to the log file
    pub log_path: PathBuf,
    /// `tracing` filter directive
    pub log_filter: String,
}

impl Config {
    /// Merge command-line flags over environment defaults.
    pub fn load(cli: &Cli) -> Result<Self, LifecycleError> {
        let max_message_len = cli
            .max_message_len
            .or_else(env::max_message_len)
            .unwrap_or(DEFAULT_MAX_MESSAGE_LEN);
        if max_message_len == 0 {
            return Err(LifecycleError::InvalidConfig(
                "--max-message-len must be positive".to_string(),
            ));
        }

        let log_path = match &cli.log_file {
            Some(path) => path.clone(),
            None => env::state_dir()?.join("alarm.log"),
        };

        Ok(Self {
            output: cli.output,
            max_message_len,
            lifecycle_events: cli.lifecycle,
            notify: cli.notify,
            drain: cli.drain,
            prompt: !cli.no_prompt,
            log_path,
            log_filter: env::log_filter().unwrap_or_else(|| "info".to_string()),
        })
    }

    pub fn scheduler(&self) -> SchedulerConfig {
        SchedulerConfig {
            lifecycle_events: self.lifecycle_events,
        }
    }
}

/// Startup failures. These are the only errors that end the process.
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Could not determine state directory")]
    NoStateDir,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid log filter: {0}")]
    LogFilter(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Install the file-backed `tracing` subscriber.
///
/// Logs never go to the console, so they cannot interleave with alarm output.
pub fn setup_logging(
    config: &Config,
) -> Result<tracing_appender::non_blocking::WorkerGuard, LifecycleError> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_new(&config.log_filter)
        .map_err(|e| LifecycleError::LogFilter(e.to_string()))?;

    // Create log directory if needed
    let dir = config
        .log_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), PathBuf::from);
    std::fs::create_dir_all(&dir)?;

    let file_name = config
        .log_path
        .file_name()
        .ok_or_else(|| LifecycleError::InvalidConfig("log path has no file name".to_string()))?;
    let file_appender = tracing_appender::rolling::never(&dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_ansi(false).with_writer(non_blocking))
        .init();

    Ok(guard)
}

/// Why the input loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    EndOfInput,
    Signal(&'static str),
}

/// Stop the worker and drop whatever is left.
///
/// Returns the number of alarms discarded undelivered.
pub async fn shutdown(
    registry: &AlarmRegistry,
    worker: SchedulerHandle,
) -> Result<usize, tokio::task::JoinError> {
    let stats = worker.stop().await?;
    let discarded = registry.clear();
    info!(
        delivered = stats.delivered,
        failed = stats.failed,
        cancelled = stats.cancelled,
        discarded,
        "shutdown complete"
    );
    Ok(discarded)
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
