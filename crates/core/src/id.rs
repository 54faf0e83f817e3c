// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Alarm identifiers and sequence generation

use crate::alarm::AlarmError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Caller-supplied alarm identifier (the `N` in `Message(N)`).
///
/// Always positive. Stable for the lifetime of the alarm, including across
/// replacements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct AlarmId(u64);

impl AlarmId {
    /// Create an id, rejecting zero.
    pub fn new(id: u64) -> Result<Self, AlarmError> {
        if id == 0 {
            return Err(AlarmError::ZeroId);
        }
        Ok(Self(id))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for AlarmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u64> for AlarmId {
    type Error = AlarmError;

    fn try_from(id: u64) -> Result<Self, Self::Error> {
        Self::new(id)
    }
}

impl From<AlarmId> for u64 {
    fn from(id: AlarmId) -> Self {
        id.0
    }
}

impl FromStr for AlarmId {
    type Err = AlarmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let n = s
            .parse::<u64>()
            .map_err(|_| AlarmError::InvalidId(s.to_string()))?;
        Self::new(n)
    }
}

impl PartialEq<u64> for AlarmId {
    fn eq(&self, other: &u64) -> bool {
        self.0 == *other
    }
}

/// Monotonic sequence numbers used to keep insertion order stable.
///
/// Clones share the same counter.
#[derive(Clone, Debug, Default)]
pub struct SequenceGen {
    counter: Arc<AtomicU64>,
}

impl SequenceGen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the next sequence number, starting at 0.
    pub fn next(&self) -> u64 {
        self.counter.fetch_add(1, Ordering::Relaxed)
    }
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
