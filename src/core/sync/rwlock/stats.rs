/*!
 * Lock Statistics
 *
 * Monotonic counters for lock activity. Relaxed atomics: the counters are
 * diagnostics and never participate in the locking protocol.
 */

use crate::core::errors::LockError;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub(crate) struct LockStats {
    read_acquisitions: AtomicU64,
    write_acquisitions: AtomicU64,
    timeouts: AtomicU64,
    rejections: AtomicU64,
    upgrades: AtomicU64,
    downgrades: AtomicU64,
}

impl LockStats {
    #[inline]
    pub(crate) fn record_read(&self) {
        self.read_acquisitions.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_write(&self) {
        self.write_acquisitions.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_upgrade(&self) {
        self.upgrades.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_downgrade(&self) {
        self.downgrades.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_failure(&self, err: &LockError) {
        if err.is_timeout() {
            self.timeouts.fetch_add(1, Ordering::Relaxed);
        } else {
            self.rejections.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub(crate) fn snapshot(&self) -> LockStatsSnapshot {
        LockStatsSnapshot {
            read_acquisitions: self.read_acquisitions.load(Ordering::Relaxed),
            write_acquisitions: self.write_acquisitions.load(Ordering::Relaxed),
            timeouts: self.timeouts.load(Ordering::Relaxed),
            rejections: self.rejections.load(Ordering::Relaxed),
            upgrades: self.upgrades.load(Ordering::Relaxed),
            downgrades: self.downgrades.load(Ordering::Relaxed),
        }
    }
}

/// Copy of the lock's counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockStatsSnapshot {
    pub read_acquisitions: u64,
    pub write_acquisitions: u64,
    /// Acquisitions that ran out of budget
    pub timeouts: u64,
    /// Acquisitions refused without blocking (reentrancy, invalid upgrade)
    pub rejections: u64,
    pub upgrades: u64,
    pub downgrades: u64,
}

impl LockStatsSnapshot {
    pub fn acquisitions(&self) -> u64 {
        self.read_acquisitions + self.write_acquisitions
    }

    pub fn failures(&self) -> u64 {
        self.timeouts + self.rejections
    }
}
