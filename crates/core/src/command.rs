// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Alarm commands and their line grammar.
//!
//! ```text
//! <seconds> Message(<id>) <text>     insert, or replace if <id> is pending
//! Cancel: Message(<id>)              cancel a pending alarm
//! ```

use crate::alarm::{validate_message, validate_seconds, AlarmError};
use crate::id::AlarmId;
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

// Allow expect here as the regex is compile-time verified to be valid
#[allow(clippy::expect_used)]
static INSERT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d+)\s+Message\((\d+)\)\s+(\S.*?)\s*$")
        .expect("constant regex pattern is valid")
});

#[allow(clippy::expect_used)]
static CANCEL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*Cancel:\s*Message\((\d+)\)\s*$").expect("constant regex pattern is valid")
});

/// Errors from parsing a command line
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unrecognized command")]
    Unrecognized,
    #[error("number out of range: {0}")]
    OutOfRange(String),
    #[error(transparent)]
    Invalid(#[from] AlarmError),
}

/// A parsed alarm command.
///
/// Replacement has no grammar of its own: an insert whose id is already
/// pending becomes a replace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Insert {
        id: AlarmId,
        seconds: u64,
        message: String,
    },
    Cancel {
        id: AlarmId,
    },
}

impl Command {
    /// Parse one input line.
    pub fn parse(line: &str, max_message_len: usize) -> Result<Self, ParseError> {
        if let Some(caps) = CANCEL_PATTERN.captures(line) {
            let id = parse_id(&caps[1])?;
            return Ok(Command::Cancel { id });
        }

        let caps = INSERT_PATTERN
            .captures(line)
            .ok_or(ParseError::Unrecognized)?;
        let seconds = parse_number(&caps[1])?;
        validate_seconds(seconds)?;
        let id = parse_id(&caps[2])?;
        let message = caps[3].to_string();
        validate_message(&message, max_message_len)?;

        Ok(Command::Insert {
            id,
            seconds,
            message,
        })
    }

    pub fn id(&self) -> AlarmId {
        match self {
            Command::Insert { id, .. } | Command::Cancel { id } => *id,
        }
    }
}

fn parse_number(digits: &str) -> Result<u64, ParseError> {
    digits
        .parse::<u64>()
        .map_err(|_| ParseError::OutOfRange(digits.to_string()))
}

fn parse_id(digits: &str) -> Result<AlarmId, ParseError> {
    Ok(AlarmId::new(parse_number(digits)?)?)
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
