/*!
 * Turnstile
 *
 * Reentrant gate that serializes the "becomes first reader" decision. Only
 * read acquisitions and read releases pass through it.
 */

use crate::core::sync::timeout::Deadline;
use parking_lot::{ReentrantMutex, ReentrantMutexGuard};

/// Proof of passage; the turnstile is released on drop
pub type TurnstilePass<'a> = ReentrantMutexGuard<'a, ()>;

pub struct Turnstile {
    inner: ReentrantMutex<()>,
}

impl Turnstile {
    pub fn new() -> Self {
        Self {
            inner: ReentrantMutex::new(()),
        }
    }

    /// Enter the turnstile, waiting until `deadline`
    #[inline]
    pub fn enter(&self, deadline: Deadline) -> Option<TurnstilePass<'_>> {
        match deadline {
            Deadline::Never => Some(self.inner.lock()),
            Deadline::At(at) => self.inner.try_lock_until(at),
        }
    }

    /// Enter the turnstile without a time limit
    #[inline]
    pub fn enter_blocking(&self) -> TurnstilePass<'_> {
        self.inner.lock()
    }

    pub fn is_occupied(&self) -> bool {
        self.inner.is_locked()
    }
}

impl Default for Turnstile {
    fn default() -> Self {
        Self::new()
    }
}
