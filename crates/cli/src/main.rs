// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! alarm - concurrent alarm scheduler
//!
//! Reads alarm commands from stdin, one per line, and prints each alarm's
//! message when its time comes. A background worker owns delivery; the
//! input loop only mutates the shared registry.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod env;
mod input;
mod lifecycle;
mod output;

use std::path::PathBuf;
use std::sync::Arc;

use alarm_adapters::{ConsoleSink, DeliverySink, DesktopNotifySink, FanoutSink, TracedSink};
use alarm_core::SystemClock;
use alarm_engine::{AlarmRegistry, CommandProcessor, SchedulerWorker};
use anyhow::Result;
use clap::Parser;
use tokio::io::BufReader;
use tokio::signal::unix::{signal, SignalKind};
use tracing::info;

use crate::lifecycle::{Config, StopReason};
use crate::output::{OutputFormat, PROMPT};

#[derive(Parser, Debug)]
#[command(
    name = "alarm",
    version,
    about = "Concurrent alarm scheduler",
    after_help = "Commands (one per line on stdin):\n  \
                  <seconds> Message(<id>) <text>   set or replace alarm <id>\n  \
                  Cancel: Message(<id>)            cancel alarm <id>"
)]
struct Cli {
    /// Output format
    #[arg(short = 'o', long = "output", value_enum, default_value_t)]
    output: OutputFormat,

    /// Longest accepted message, in characters [env: ALARM_MAX_MESSAGE_LEN; default: 128]
    #[arg(long, value_name = "N")]
    max_message_len: Option<usize>,

    /// Also report when a replacement or cancellation takes effect
    #[arg(long)]
    lifecycle: bool,

    /// Also show fired alarms as desktop notifications
    #[arg(long)]
    notify: bool,

    /// At end of input, wait for pending alarms instead of discarding them
    #[arg(long)]
    drain: bool,

    /// Do not print the `Alarm> ` prompt
    #[arg(long)]
    no_prompt: bool,

    /// Log file [default: $ALARM_STATE_DIR/alarm.log]
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    // Exit explicitly: a pending stdin read on the blocking pool would
    // otherwise hold up runtime shutdown.
    match run().await {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", format_error(&e));
            std::process::exit(1);
        }
    }
}

/// Format an anyhow error, deduplicating the chain.
///
/// If the top-level Display already contains the source error text, the
/// "Caused by" chain is skipped.
fn format_error(err: &anyhow::Error) -> String {
    let top = err.to_string();

    let chain_redundant = err
        .chain()
        .skip(1)
        .all(|cause| top.contains(&cause.to_string()));

    if chain_redundant {
        return top;
    }

    let mut buf = top;
    for (i, cause) in err.chain().skip(1).enumerate() {
        buf.push_str(&format!("\n\nCaused by:\n    {}: {}", i, cause));
    }
    buf
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(&cli)?;
    let _log_guard = lifecycle::setup_logging(&config)?;

    info!(
        max_message_len = config.max_message_len,
        output = ?config.output,
        notify = config.notify,
        "starting alarm scheduler"
    );

    let console = ConsoleSink::stdio(config.output.into());
    if config.notify {
        let sink = FanoutSink::new(console, DesktopNotifySink::new());
        serve(&config, TracedSink::new(sink)).await
    } else {
        serve(&config, TracedSink::new(console)).await
    }
}

async fn serve<S: DeliverySink>(config: &Config, sink: S) -> Result<()> {
    let registry = Arc::new(AlarmRegistry::new(config.max_message_len));
    let worker = SchedulerWorker::new(
        Arc::clone(&registry),
        sink.clone(),
        SystemClock,
        config.scheduler(),
    )
    .spawn();
    let processor = CommandProcessor::new(Arc::clone(&registry), sink, SystemClock)
        .with_lifecycle_events(config.lifecycle_events);

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    let prompt = config.prompt.then_some(PROMPT);
    let stdin = BufReader::new(tokio::io::stdin());

    let reason = tokio::select! {
        result = input::read_commands(stdin, &processor, prompt) => {
            let processed = result?;
            info!(processed, "end of input");
            StopReason::EndOfInput
        }
        _ = sigterm.recv() => StopReason::Signal("SIGTERM"),
        _ = sigint.recv() => StopReason::Signal("SIGINT"),
    };

    if reason == StopReason::EndOfInput && config.drain {
        info!(pending = registry.pending(), "draining");
        tokio::select! {
            _ = registry.wait_idle() => {}
            _ = sigterm.recv() => info!("drain interrupted by SIGTERM"),
            _ = sigint.recv() => info!("drain interrupted by SIGINT"),
        }
    } else {
        info!(?reason, "stopping");
    }

    lifecycle::shutdown(&registry, worker).await?;
    Ok(())
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
