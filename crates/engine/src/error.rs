// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the alarm registry

use alarm_core::{AlarmError, AlarmId};
use thiserror::Error;

/// Errors returned by registry operations. None of them are fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("alarm {0} is already pending")]
    DuplicateId(AlarmId),
    #[error("no pending alarm {0}")]
    NotFound(AlarmId),
    #[error("alarm {0} is already cancelled")]
    AlreadyCancelled(AlarmId),
    #[error(transparent)]
    Invalid(#[from] AlarmError),
}
