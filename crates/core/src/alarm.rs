// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Alarm records: the unit of scheduled work.
//!
//! An [`AlarmRecord`] lives inside the registry for its whole life. Anything
//! that leaves the registry lock is an [`AlarmSnapshot`] copied out of it.

use crate::id::AlarmId;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Default upper bound on message length, in characters.
pub const DEFAULT_MAX_MESSAGE_LEN: usize = 128;

/// Longest accepted delay, in seconds.
pub const MAX_ALARM_SECONDS: u64 = i32::MAX as u64;

/// Validation failures for alarm fields
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlarmError {
    #[error("alarm id must be a positive integer")]
    ZeroId,
    #[error("invalid alarm id: {0}")]
    InvalidId(String),
    #[error("alarm duration must be a positive number of seconds")]
    ZeroDuration,
    #[error("alarm duration of {0} seconds is out of range")]
    DurationOutOfRange(u64),
    #[error("alarm message is empty")]
    EmptyMessage,
    #[error("alarm message is {len} characters, maximum is {max}")]
    MessageTooLong { len: usize, max: usize },
}

/// Check a message against the configured length bound.
///
/// Overlong messages are rejected rather than truncated.
pub fn validate_message(message: &str, max_len: usize) -> Result<(), AlarmError> {
    if message.trim().is_empty() {
        return Err(AlarmError::EmptyMessage);
    }
    let len = message.chars().count();
    if len > max_len {
        return Err(AlarmError::MessageTooLong { len, max: max_len });
    }
    Ok(())
}

/// Check a requested delay.
pub fn validate_seconds(seconds: u64) -> Result<(), AlarmError> {
    if seconds == 0 {
        return Err(AlarmError::ZeroDuration);
    }
    if seconds > MAX_ALARM_SECONDS {
        return Err(AlarmError::DurationOutOfRange(seconds));
    }
    Ok(())
}

/// The instant `seconds` after `now`.
pub fn deadline_after(now: Instant, seconds: u64) -> Result<Instant, AlarmError> {
    validate_seconds(seconds)?;
    now.checked_add(Duration::from_secs(seconds))
        .ok_or(AlarmError::DurationOutOfRange(seconds))
}

/// A pending alarm owned by the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlarmRecord {
    pub id: AlarmId,
    /// Delay requested at creation or at the last replacement.
    pub seconds: u64,
    /// Absolute fire time: creation-or-replacement instant plus `seconds`.
    pub deadline: Instant,
    pub message: String,
    pub cancel_requested: bool,
    /// Set by a successful replace, cleared when observed.
    pub replaced: bool,
}

impl AlarmRecord {
    /// Build a validated record due `seconds` after `now`.
    pub fn new(
        id: AlarmId,
        seconds: u64,
        message: impl Into<String>,
        now: Instant,
        max_message_len: usize,
    ) -> Result<Self, AlarmError> {
        let message = message.into();
        let deadline = deadline_after(now, seconds)?;
        validate_message(&message, max_message_len)?;
        Ok(Self {
            id,
            seconds,
            deadline,
            message,
            cancel_requested: false,
            replaced: false,
        })
    }

    /// Re-arm with a new delay and message. The id is unchanged.
    ///
    /// On error the record is left as it was.
    pub fn rearm(
        &mut self,
        seconds: u64,
        message: String,
        now: Instant,
    ) -> Result<(), AlarmError> {
        self.deadline = deadline_after(now, seconds)?;
        self.seconds = seconds;
        self.message = message;
        self.replaced = true;
        Ok(())
    }

    pub fn snapshot(&self) -> AlarmSnapshot {
        AlarmSnapshot {
            id: self.id,
            seconds: self.seconds,
            message: self.message.clone(),
            deadline: self.deadline,
        }
    }
}

/// Copy of the fields of a record that callers outside the lock need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlarmSnapshot {
    pub id: AlarmId,
    pub seconds: u64,
    pub message: String,
    pub deadline: Instant,
}

#[cfg(test)]
#[path = "alarm_tests.rs"]
mod tests;
