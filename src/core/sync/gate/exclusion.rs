/*!
 * Exclusion Gate
 *
 * Non-reentrant binary lock representing true reader/writer exclusivity.
 *
 * # Design: Ownerless Binary Semaphore
 *
 * The gate is held either by a writer or collectively by the readers. The
 * reader that releases it (the last one out) is usually not the reader that
 * acquired it (the first one in), so the gate cannot be a guard-based mutex
 * tied to the acquiring thread. A `held` flag under a `parking_lot::Mutex`
 * plus a `Condvar` gives a binary lock any thread may release.
 */

use crate::core::sync::timeout::Deadline;
use parking_lot::{Condvar, Mutex};

pub struct ExclusionGate {
    held: Mutex<bool>,
    released: Condvar,
}

impl ExclusionGate {
    pub fn new() -> Self {
        Self {
            held: Mutex::new(false),
            released: Condvar::new(),
        }
    }

    /// Acquire the gate, waiting until `deadline`
    ///
    /// Returns `false` if the deadline passed while the gate was still held.
    pub fn acquire(&self, deadline: Deadline) -> bool {
        let mut held = self.held.lock();
        while *held {
            match deadline {
                Deadline::Never => self.released.wait(&mut held),
                Deadline::At(at) => {
                    if self.released.wait_until(&mut held, at).timed_out() && *held {
                        return false;
                    }
                }
            }
        }
        *held = true;
        true
    }

    /// Acquire only if free right now
    #[inline]
    pub fn try_acquire(&self) -> bool {
        self.acquire(Deadline::now())
    }

    /// Release the gate and wake one waiter
    ///
    /// Releasing a free gate is a no-op.
    pub fn release(&self) {
        let mut held = self.held.lock();
        if *held {
            *held = false;
            self.released.notify_one();
        }
    }

    #[inline]
    pub fn is_held(&self) -> bool {
        *self.held.lock()
    }
}

impl Default for ExclusionGate {
    fn default() -> Self {
        Self::new()
    }
}
