// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Observable alarm events.
//!
//! Every event renders as exactly one console line via `Display` and
//! serializes as `{"type": "alarm:name", ...fields}` for JSON output.

use crate::alarm::AlarmSnapshot;
use crate::id::AlarmId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Something an operator can observe about an alarm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    // -- command receipts --
    #[serde(rename = "alarm:received")]
    AlarmReceived {
        id: AlarmId,
        received_at: u64,
        seconds: u64,
        message: String,
    },

    #[serde(rename = "alarm:replacement_received")]
    ReplacementReceived {
        id: AlarmId,
        received_at: u64,
        seconds: u64,
        message: String,
    },

    #[serde(rename = "alarm:cancel_received")]
    CancelReceived {
        id: AlarmId,
        received_at: u64,
        seconds: u64,
        message: String,
    },

    // -- command rejections --
    #[serde(rename = "alarm:cancel_unknown")]
    CancelUnknown { id: AlarmId },

    #[serde(rename = "alarm:cancel_duplicate")]
    CancelDuplicate { id: AlarmId },

    /// A replace targeted an alarm that is already cancel-requested.
    #[serde(rename = "alarm:replace_rejected")]
    ReplaceRejected { id: AlarmId },

    #[serde(rename = "alarm:bad_command")]
    BadCommand,

    // -- scheduler --
    #[serde(rename = "alarm:fired")]
    AlarmFired {
        id: AlarmId,
        fired_at: u64,
        seconds: u64,
        message: String,
    },

    /// The scheduler picked up a replacement.
    #[serde(rename = "alarm:replaced")]
    AlarmReplaced {
        id: AlarmId,
        at: u64,
        seconds: u64,
        message: String,
    },

    /// The scheduler dropped a cancelled alarm.
    #[serde(rename = "alarm:removed")]
    AlarmRemoved {
        id: AlarmId,
        at: u64,
        seconds: u64,
        message: String,
    },
}

impl Event {
    pub fn received(alarm: &AlarmSnapshot, received_at: u64) -> Self {
        Event::AlarmReceived {
            id: alarm.id,
            received_at,
            seconds: alarm.seconds,
            message: alarm.message.clone(),
        }
    }

    pub fn replacement_received(alarm: &AlarmSnapshot, received_at: u64) -> Self {
        Event::ReplacementReceived {
            id: alarm.id,
            received_at,
            seconds: alarm.seconds,
            message: alarm.message.clone(),
        }
    }

    pub fn cancel_received(alarm: &AlarmSnapshot, received_at: u64) -> Self {
        Event::CancelReceived {
            id: alarm.id,
            received_at,
            seconds: alarm.seconds,
            message: alarm.message.clone(),
        }
    }

    pub fn fired(alarm: &AlarmSnapshot, fired_at: u64) -> Self {
        Event::AlarmFired {
            id: alarm.id,
            fired_at,
            seconds: alarm.seconds,
            message: alarm.message.clone(),
        }
    }

    pub fn replaced(alarm: &AlarmSnapshot, at: u64) -> Self {
        Event::AlarmReplaced {
            id: alarm.id,
            at,
            seconds: alarm.seconds,
            message: alarm.message.clone(),
        }
    }

    pub fn removed(alarm: &AlarmSnapshot, at: u64) -> Self {
        Event::AlarmRemoved {
            id: alarm.id,
            at,
            seconds: alarm.seconds,
            message: alarm.message.clone(),
        }
    }

    /// The alarm this event concerns, if any.
    pub fn alarm_id(&self) -> Option<AlarmId> {
        match self {
            Event::AlarmReceived { id, .. }
            | Event::ReplacementReceived { id, .. }
            | Event::CancelReceived { id, .. }
            | Event::CancelUnknown { id }
            | Event::CancelDuplicate { id }
            | Event::ReplaceRejected { id }
            | Event::AlarmFired { id, .. }
            | Event::AlarmReplaced { id, .. }
            | Event::AlarmRemoved { id, .. } => Some(*id),
            Event::BadCommand => None,
        }
    }

    /// Rejections, reported on the error stream.
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Event::CancelUnknown { .. }
                | Event::CancelDuplicate { .. }
                | Event::ReplaceRejected { .. }
                | Event::BadCommand
        )
    }

    /// Short name for log fields.
    pub fn name(&self) -> &'static str {
        match self {
            Event::AlarmReceived { .. } => "alarm:received",
            Event::ReplacementReceived { .. } => "alarm:replacement_received",
            Event::CancelReceived { .. } => "alarm:cancel_received",
            Event::CancelUnknown { .. } => "alarm:cancel_unknown",
            Event::CancelDuplicate { .. } => "alarm:cancel_duplicate",
            Event::ReplaceRejected { .. } => "alarm:replace_rejected",
            Event::BadCommand => "alarm:bad_command",
            Event::AlarmFired { .. } => "alarm:fired",
            Event::AlarmReplaced { .. } => "alarm:replaced",
            Event::AlarmRemoved { .. } => "alarm:removed",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::AlarmReceived {
                id,
                received_at,
                seconds,
                message,
            } => write!(
                f,
                "First Alarm Request With Message Number ({id}) Received at <{received_at}>: <{seconds} {message}>"
            ),
            Event::ReplacementReceived {
                id,
                received_at,
                seconds,
                message,
            } => write!(
                f,
                "Replacement Alarm Request With Message Number ({id}) Received at <{received_at}>: <{seconds} {message}>"
            ),
            Event::CancelReceived {
                id,
                received_at,
                seconds,
                message,
            } => write!(
                f,
                "Cancel Alarm Request With Message Number ({id}) Received at <{received_at}>: <{seconds} {message}>"
            ),
            Event::CancelUnknown { id } => write!(
                f,
                "Error: No Alarm Request With Message Number ({id}) to Cancel!"
            ),
            Event::CancelDuplicate { id } => write!(
                f,
                "Error: More Than One Request to Cancel Alarm Request With Message Number ({id})!"
            ),
            Event::ReplaceRejected { id } => write!(
                f,
                "Error: Alarm Request With Message Number ({id}) Is Cancelled and Cannot Be Replaced!"
            ),
            Event::BadCommand => write!(f, "Bad command"),
            Event::AlarmFired {
                seconds, message, ..
            } => write!(f, "({seconds}) {message}"),
            Event::AlarmReplaced {
                id,
                at,
                seconds,
                message,
            } => write!(
                f,
                "Alarm With Message Number ({id}) Replaced at <{at}>: <{seconds} {message}>"
            ),
            Event::AlarmRemoved {
                id,
                at,
                seconds,
                message,
            } => write!(
                f,
                "Alarm With Message Number ({id}) Removed at <{at}>: <{seconds} {message}>"
            ),
        }
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
