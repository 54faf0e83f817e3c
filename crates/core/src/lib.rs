// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! alarm-core: value types shared by the alarm scheduler crates

pub mod alarm;
pub mod clock;
pub mod command;
pub mod event;
pub mod id;
pub mod time_fmt;

#[cfg(any(test, feature = "test-support"))]
#[allow(clippy::panic)]
pub mod test_support;

pub use alarm::{AlarmError, AlarmRecord, AlarmSnapshot, DEFAULT_MAX_MESSAGE_LEN, MAX_ALARM_SECONDS};
pub use clock::{Clock, SystemClock};
pub use command::{Command, ParseError};
pub use event::Event;
pub use id::{AlarmId, SequenceGen};
pub use time_fmt::{format_elapsed, format_remaining};

#[cfg(any(test, feature = "test-support"))]
pub use clock::FakeClock;
