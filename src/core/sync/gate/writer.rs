/*!
 * Writer-Waiting Gate
 *
 * Broadcast signal implementing write preference. The gate is closed while
 * at least one writer is waiting for the exclusion gate; new read
 * acquisitions wait for it to reopen.
 *
 * # Design: Counter and Signal Under One Mutex
 *
 * The waiting-writer counter lives under the same mutex the condvar waits
 * on, so "counter > 0" and "gate closed" can never be observed out of step.
 * The last waiting writer to leave reopens the gate with `notify_all`,
 * releasing every queued reader at once.
 */

use crate::core::sync::timeout::Deadline;
use parking_lot::{Condvar, Mutex};
use tracing::trace;

pub struct WriterWaitingGate {
    waiting: Mutex<usize>,
    reopened: Condvar,
}

impl WriterWaitingGate {
    pub fn new() -> Self {
        Self {
            waiting: Mutex::new(0),
            reopened: Condvar::new(),
        }
    }

    /// Register a waiting writer, closing the gate on the 0 -> 1 transition
    ///
    /// The returned token unregisters the writer when dropped, whatever the
    /// outcome of its wait.
    pub fn register_writer(&self) -> WaitingWriter<'_> {
        let mut waiting = self.waiting.lock();
        *waiting += 1;
        if *waiting == 1 {
            trace!("writer-waiting gate closed");
        }
        WaitingWriter { gate: self }
    }

    fn unregister_writer(&self) {
        let mut waiting = self.waiting.lock();
        *waiting = waiting.saturating_sub(1);
        if *waiting == 0 {
            trace!("writer-waiting gate reopened");
            self.reopened.notify_all();
        }
    }

    /// Wait until no writer is waiting
    ///
    /// Returns `false` if the deadline passed with the gate still closed.
    pub fn wait_open(&self, deadline: Deadline) -> bool {
        let mut waiting = self.waiting.lock();
        while *waiting > 0 {
            match deadline {
                Deadline::Never => self.reopened.wait(&mut waiting),
                Deadline::At(at) => {
                    if self.reopened.wait_until(&mut waiting, at).timed_out() && *waiting > 0 {
                        return false;
                    }
                }
            }
        }
        true
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        *self.waiting.lock() == 0
    }

    /// Number of writers currently waiting
    #[inline]
    pub fn waiting_writers(&self) -> usize {
        *self.waiting.lock()
    }
}

impl Default for WriterWaitingGate {
    fn default() -> Self {
        Self::new()
    }
}

/// Registration of a writer on the gate
#[must_use = "the writer is unregistered as soon as the token is dropped"]
pub struct WaitingWriter<'a> {
    gate: &'a WriterWaitingGate,
}

impl Drop for WaitingWriter<'_> {
    fn drop(&mut self) {
        self.gate.unregister_writer();
    }
}
