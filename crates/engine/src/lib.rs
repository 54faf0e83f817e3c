// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Alarm scheduling engine: the shared registry, the delivery worker and
//! the command processor that feeds it.

mod error;
mod processor;
mod registry;
mod scheduler;

pub use error::RegistryError;
pub use processor::CommandProcessor;
pub use registry::{AlarmRegistry, Due, Mutation};
pub use scheduler::{
    SchedulerConfig, SchedulerHandle, SchedulerWorker, WorkerState, WorkerStats,
};
