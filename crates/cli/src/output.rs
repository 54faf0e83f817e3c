// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use alarm_adapters::LineFormat;
use clap::ValueEnum;

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl From<OutputFormat> for LineFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => LineFormat::Text,
            OutputFormat::Json => LineFormat::Json,
        }
    }
}

/// Prompt printed before each command is read.
pub const PROMPT: &str = "Alarm> ";

/// Print the prompt without a newline.
pub fn print_prompt(prompt: &str) -> std::io::Result<()> {
    use std::io::Write;
    let mut out = std::io::stdout().lock();
    out.write_all(prompt.as_bytes())?;
    out.flush()
}
