// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Desktop notification sink using notify-rust.
//!
//! Only fired alarms become notifications; every other event is ignored.
//!
//! On macOS, `notify-rust` uses `mac-notification-sys`, whose first call runs
//! an AppleScript bundle lookup that blocks forever in a process without
//! Automation permissions. The bundle identifier is pre-set at construction
//! time to skip that lookup.

use super::{DeliverySink, SinkError};
use alarm_core::Event;
use async_trait::async_trait;

const TITLE_PREFIX: &str = "Alarm";

#[derive(Clone, Copy, Debug, Default)]
pub struct DesktopNotifySink;

impl DesktopNotifySink {
    pub fn new() -> Self {
        #[cfg(target_os = "macos")]
        {
            let _ = mac_notification_sys::set_application("com.apple.Terminal");
        }
        Self
    }
}

#[async_trait]
impl DeliverySink for DesktopNotifySink {
    async fn deliver(&self, event: &Event) -> Result<(), SinkError> {
        let Event::AlarmFired { id, message, .. } = event else {
            return Ok(());
        };
        let title = format!("{TITLE_PREFIX} {id}");
        let message = message.clone();
        // Notification::show() is synchronous; fire-and-forget on the
        // bounded blocking pool.
        tokio::task::spawn_blocking(move || {
            match notify_rust::Notification::new()
                .summary(&title)
                .body(&message)
                .show()
            {
                Ok(_) => tracing::debug!(%title, "desktop notification sent"),
                Err(e) => tracing::warn!(%title, error = %e, "desktop notification failed"),
            }
        });
        Ok(())
    }
}
