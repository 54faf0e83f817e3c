// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::{AlarmId, AlarmRecord, Command, DEFAULT_MAX_MESSAGE_LEN};
use std::time::Instant;

/// Build an id from a literal known to be positive.
pub fn alarm_id(n: u64) -> AlarmId {
    match AlarmId::new(n) {
        Ok(id) => id,
        Err(e) => panic!("test alarm id {n}: {e}"),
    }
}

/// Build a record due `seconds` after `now`.
pub fn record(id: u64, seconds: u64, message: &str, now: Instant) -> AlarmRecord {
    match AlarmRecord::new(alarm_id(id), seconds, message, now, DEFAULT_MAX_MESSAGE_LEN) {
        Ok(record) => record,
        Err(e) => panic!("test record {id}: {e}"),
    }
}

// ── Command factory functions ───────────────────────────────────────────────

pub fn insert_command(id: u64, seconds: u64, message: &str) -> Command {
    Command::Insert {
        id: alarm_id(id),
        seconds,
        message: message.to_string(),
    }
}

pub fn cancel_command(id: u64) -> Command {
    Command::Cancel { id: alarm_id(id) }
}
