/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Result type for lock acquisition
pub type LockResult<T> = Result<T, LockError>;

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Blocking step of an acquisition that ran out of budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AcquireStage {
    /// Waiting for the writer-waiting gate to reopen
    WriterGate,
    /// Waiting for the first-reader turnstile
    Turnstile,
    /// Waiting for the exclusion gate
    Exclusion,
}

impl AcquireStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WriterGate => "writer_gate",
            Self::Turnstile => "turnstile",
            Self::Exclusion => "exclusion",
        }
    }
}

impl fmt::Display for AcquireStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reasons a lock acquisition did not succeed
///
/// None of these is a defect: they are the expected "not accessible under the
/// given budget" outcomes that the boolean API collapses into `false`.
#[derive(Error, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum LockError {
    #[error("Timed out waiting on the {stage}")]
    #[diagnostic(
        code(rwlock::timeout),
        help("The lock is held or a writer is queued. Retry or use a longer timeout.")
    )]
    Timeout { stage: AcquireStage },

    #[error("Calling thread already holds the read lock")]
    #[diagnostic(
        code(rwlock::read_already_held),
        help("Read acquisition is not reentrant. Release before entering again.")
    )]
    ReadAlreadyHeld,

    #[error("Calling thread already holds the write lock")]
    #[diagnostic(
        code(rwlock::write_already_held),
        help("Write acquisition is not reentrant. Release before entering again.")
    )]
    WriteAlreadyHeld,

    #[error("Calling thread holds the write lock and cannot enter read mode")]
    #[diagnostic(
        code(rwlock::write_held_by_caller),
        help("Use downgrade_write_to_read_lock() to switch from write to read mode.")
    )]
    WriteHeldByCaller,

    #[error("Upgrade requested but calling thread does not hold the read lock")]
    #[diagnostic(
        code(rwlock::not_read_holder),
        help("Enter read mode first, or call enter_write_lock() without the upgrade flag.")
    )]
    NotReadHolder,
}

impl LockError {
    /// The acquisition ran out of time
    #[inline]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// The acquisition was refused without blocking
    #[inline]
    pub fn is_rejection(&self) -> bool {
        !self.is_timeout()
    }

    /// Stage at which a timeout happened
    pub fn stage(&self) -> Option<AcquireStage> {
        match self {
            Self::Timeout { stage } => Some(*stage),
            _ => None,
        }
    }
}

/// Configuration errors
#[derive(Error, Debug, Diagnostic)]
pub enum ConfigError {
    #[error("Failed to parse lock configuration: {0}")]
    #[diagnostic(
        code(config::parse),
        help("Expected a JSON object with optional name, default_timeout, slow_acquire_threshold_ms.")
    )]
    Parse(#[from] serde_json::Error),

    #[error("Configured default timeout {0:?} exceeds the maximum")]
    #[diagnostic(
        code(config::timeout_too_long),
        help("Use \"infinite\" for unbounded waits.")
    )]
    TimeoutTooLong(std::time::Duration),

    #[error("Slow-acquire threshold must be non-zero")]
    #[diagnostic(
        code(config::invalid_threshold),
        help("Omit the threshold to disable slow-acquire reporting.")
    )]
    InvalidThreshold,

    #[error("Lock name must not be empty")]
    #[diagnostic(code(config::empty_name))]
    EmptyName,
}
