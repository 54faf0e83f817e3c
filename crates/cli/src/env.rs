// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI crate.

use std::path::PathBuf;

use crate::lifecycle::LifecycleError;

/// Resolve state directory: ALARM_STATE_DIR > XDG_STATE_HOME/alarm > ~/.local/state/alarm
pub fn state_dir() -> Result<PathBuf, LifecycleError> {
    if let Ok(dir) = std::env::var("ALARM_STATE_DIR") {
        return Ok(PathBuf::from(dir));
    }
    if let Ok(xdg) = std::env::var("XDG_STATE_HOME") {
        return Ok(PathBuf::from(xdg).join("alarm"));
    }
    let home = dirs::home_dir().ok_or(LifecycleError::NoStateDir)?;
    Ok(home.join(".local/state/alarm"))
}

/// Log filter directive, e.g. `debug` or `alarm_engine=trace`.
pub fn log_filter() -> Option<String> {
    std::env::var("ALARM_LOG").ok().filter(|s| !s.is_empty())
}

/// Message length bound override
pub fn max_message_len() -> Option<usize> {
    std::env::var("ALARM_MAX_MESSAGE_LEN")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .filter(|&n| n > 0)
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
