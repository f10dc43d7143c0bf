/*!
 * Acquisition Timeouts
 *
 * Explicit timeout policy for every blocking lock operation.
 *
 * ## Timeout Kinds
 *
 * - **Infinite**: wait until the resource becomes available
 * - **Immediate**: attempt once, never wait
 * - **Bounded**: wait at most the given duration
 *
 * A [`Deadline`] is fixed once at the start of an acquisition so that every
 * blocking step of that acquisition draws from the same budget.
 *
 * ## Example
 *
 * ```
 * use rw_sync::LockTimeout;
 * use std::time::Duration;
 *
 * let bounded: LockTimeout = Duration::from_millis(50).into();
 * assert_eq!(bounded, LockTimeout::Bounded(Duration::from_millis(50)));
 *
 * let infinite: LockTimeout = None.into();
 * assert!(infinite.is_infinite());
 * ```
 */

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DurationMilliSeconds};
use std::time::{Duration, Instant};

/// Timeout policy for a lock acquisition
#[serde_as]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LockTimeout {
    /// No timeout (wait indefinitely)
    #[default]
    Infinite,

    /// Single attempt, never blocks
    Immediate,

    /// Wait at most this long (milliseconds on the wire)
    Bounded(#[serde_as(as = "DurationMilliSeconds<u64>")] Duration),
}

impl LockTimeout {
    /// Bounded timeout from milliseconds
    pub const fn from_millis(ms: u64) -> Self {
        Self::Bounded(Duration::from_millis(ms))
    }

    /// Budget of this policy (`None` means unbounded)
    pub fn duration(&self) -> Option<Duration> {
        match self {
            Self::Infinite => None,
            Self::Immediate => Some(Duration::ZERO),
            Self::Bounded(d) => Some(*d),
        }
    }

    #[inline]
    pub fn is_infinite(&self) -> bool {
        matches!(self, Self::Infinite)
    }

    /// Immediate, or a bounded zero duration
    #[inline]
    pub fn is_immediate(&self) -> bool {
        self.duration() == Some(Duration::ZERO)
    }

    /// Start the clock for an acquisition
    pub fn start(&self) -> Deadline {
        match self.duration() {
            None => Deadline::Never,
            Some(d) => Deadline::at(Instant::now().checked_add(d)),
        }
    }

    /// Timeout category as string (for tracing fields)
    pub fn category(&self) -> &'static str {
        match self {
            Self::Infinite => "infinite",
            Self::Immediate => "immediate",
            Self::Bounded(_) => "bounded",
        }
    }
}

impl From<Duration> for LockTimeout {
    fn from(d: Duration) -> Self {
        if d.is_zero() {
            Self::Immediate
        } else {
            Self::Bounded(d)
        }
    }
}

impl From<Option<Duration>> for LockTimeout {
    fn from(d: Option<Duration>) -> Self {
        d.map_or(Self::Infinite, Self::from)
    }
}

/// Point in time after which an acquisition gives up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deadline {
    Never,
    At(Instant),
}

impl Deadline {
    /// An instant that overflowed `Instant` arithmetic is treated as never
    fn at(instant: Option<Instant>) -> Self {
        instant.map_or(Self::Never, Self::At)
    }

    /// Deadline that has already passed
    pub fn now() -> Self {
        Self::At(Instant::now())
    }

    pub fn instant(&self) -> Option<Instant> {
        match self {
            Self::Never => None,
            Self::At(at) => Some(*at),
        }
    }

    pub fn is_expired(&self) -> bool {
        match self {
            Self::Never => false,
            Self::At(at) => Instant::now() >= *at,
        }
    }

    /// Remaining budget (`None` means unbounded)
    pub fn remaining(&self) -> Option<Duration> {
        self.instant()
            .map(|at| at.saturating_duration_since(Instant::now()))
    }
}
