// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Line-oriented command input.

use alarm_adapters::DeliverySink;
use alarm_core::Clock;
use alarm_engine::CommandProcessor;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::output::print_prompt;

/// Feed every non-blank line of `reader` to the processor until end of input.
///
/// Returns the number of commands processed.
pub async fn read_commands<R, S, C>(
    reader: R,
    processor: &CommandProcessor<S, C>,
    prompt: Option<&str>,
) -> std::io::Result<usize>
where
    R: AsyncBufRead + Unpin,
    S: DeliverySink,
    C: Clock,
{
    let mut lines = reader.lines();
    let mut processed = 0;
    loop {
        if let Some(prompt) = prompt {
            print_prompt(prompt)?;
        }
        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }
        let event = processor.process_line(&line).await;
        tracing::debug!(event = event.name(), "processed command");
        processed += 1;
    }
    Ok(processed)
}

#[cfg(test)]
#[path = "input_tests.rs"]
mod tests;
