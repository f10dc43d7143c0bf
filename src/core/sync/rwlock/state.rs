/*!
 * Holder Bookkeeping
 *
 * Which threads hold the lock, and in which mode. Only ever touched while
 * holding the lock's state mutex, and only for O(1) work.
 */

use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use std::thread::ThreadId;

/// Reader set and writer identity
#[derive(Debug, Default)]
pub(crate) struct HolderTable {
    readers: AHashSet<ThreadId>,
    writer: Option<ThreadId>,
}

impl HolderTable {
    #[inline]
    pub(crate) fn is_reader(&self, id: ThreadId) -> bool {
        self.readers.contains(&id)
    }

    #[inline]
    pub(crate) fn is_writer(&self, id: ThreadId) -> bool {
        self.writer == Some(id)
    }

    #[inline]
    pub(crate) fn has_readers(&self) -> bool {
        !self.readers.is_empty()
    }

    #[inline]
    pub(crate) fn reader_count(&self) -> usize {
        self.readers.len()
    }

    #[inline]
    pub(crate) fn has_writer(&self) -> bool {
        self.writer.is_some()
    }

    pub(crate) fn add_reader(&mut self, id: ThreadId) {
        self.readers.insert(id);
    }

    /// Remove a reader; returns `true` if it was the last one
    pub(crate) fn remove_reader(&mut self, id: ThreadId) -> bool {
        self.readers.remove(&id) && self.readers.is_empty()
    }

    pub(crate) fn set_writer(&mut self, id: ThreadId) {
        self.writer = Some(id);
    }

    /// Clear the writer if `id` holds it; returns `true` if cleared
    pub(crate) fn clear_writer(&mut self, id: ThreadId) -> bool {
        if self.is_writer(id) {
            self.writer = None;
            true
        } else {
            false
        }
    }
}

/// Point-in-time view of a lock, for diagnostics
///
/// Like the `is_*_lock_held` queries, a snapshot is only true at the instant
/// it was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockSnapshot {
    /// Threads holding read mode
    pub readers: usize,
    /// Whether some thread holds write mode
    pub writer_held: bool,
    /// Threads blocked acquiring write mode
    pub waiting_writers: usize,
}

impl LockSnapshot {
    pub fn is_idle(&self) -> bool {
        self.readers == 0 && !self.writer_held
    }

    /// The readers/writer exclusion invariant
    pub fn is_consistent(&self) -> bool {
        !(self.writer_held && self.readers > 0)
    }
}
