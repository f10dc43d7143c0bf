/*!
 * Scoped Lock Guards
 *
 * RAII wrappers over the enter/exit calls. A guard exits its mode on drop,
 * so early returns and panics cannot leave the lock held.
 *
 * Guards are `!Send`: the lock records holders by thread identity, and an
 * exit issued from another thread would be ignored.
 */

use super::lock::ReaderWriterLock;
use crate::core::errors::LockResult;
use crate::core::sync::timeout::LockTimeout;
use std::marker::PhantomData;
use std::mem;

/// Read-mode hold on a [`ReaderWriterLock`]
#[must_use = "the read lock is released as soon as the guard is dropped"]
pub struct ReadLockGuard<'a> {
    lock: &'a ReaderWriterLock,
    _not_send: PhantomData<*const ()>,
}

impl<'a> ReadLockGuard<'a> {
    pub(super) fn new(lock: &'a ReaderWriterLock) -> Self {
        Self {
            lock,
            _not_send: PhantomData,
        }
    }

    /// Switch to write mode
    ///
    /// Not atomic: the read hold is released before the write acquisition
    /// begins. On failure the thread holds neither mode.
    pub fn upgrade(self, timeout: impl Into<LockTimeout>) -> LockResult<WriteLockGuard<'a>> {
        let lock = self.lock;
        lock.try_enter_write(timeout, true)?;
        mem::forget(self);
        Ok(WriteLockGuard::new(lock))
    }

    pub fn lock(&self) -> &'a ReaderWriterLock {
        self.lock
    }
}

impl Drop for ReadLockGuard<'_> {
    fn drop(&mut self) {
        self.lock.exit_read_lock();
    }
}

/// Write-mode hold on a [`ReaderWriterLock`]
#[must_use = "the write lock is released as soon as the guard is dropped"]
pub struct WriteLockGuard<'a> {
    lock: &'a ReaderWriterLock,
    _not_send: PhantomData<*const ()>,
}

impl<'a> WriteLockGuard<'a> {
    pub(super) fn new(lock: &'a ReaderWriterLock) -> Self {
        Self {
            lock,
            _not_send: PhantomData,
        }
    }

    /// Switch to read mode
    ///
    /// Not atomic: the exclusion gate is briefly free between the two modes.
    pub fn downgrade(self) -> ReadLockGuard<'a> {
        let lock = self.lock;
        mem::forget(self);
        lock.downgrade_write_to_read_lock();
        ReadLockGuard::new(lock)
    }

    pub fn lock(&self) -> &'a ReaderWriterLock {
        self.lock
    }
}

impl Drop for WriteLockGuard<'_> {
    fn drop(&mut self) {
        self.lock.exit_write_lock(false);
    }
}
