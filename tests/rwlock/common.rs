/*!
 * Test harness: threads that take the lock, hold it, and touch a shared value
 */

#![allow(dead_code)]

use rw_sync::{LockTimeout, ReaderWriterLock};
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// One scenario time unit
pub const UNIT: Duration = Duration::from_millis(100);

pub fn units(n: u32) -> Duration {
    UNIT * n
}

/// Value guarded by the lock under test (the lock never touches it)
pub type SharedValue = Arc<AtomicI32>;

pub fn shared_value(initial: i32) -> SharedValue {
    Arc::new(AtomicI32::new(initial))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WriterReport {
    pub write_acquired: bool,
    pub write_lock_held: bool,
}

/// Acquires write mode, holds it, then stores a new value and releases
pub struct WriterThread {
    handle: JoinHandle<WriterReport>,
}

impl WriterThread {
    pub fn spawn(
        lock: &Arc<ReaderWriterLock>,
        lock_timeout: LockTimeout,
        hold: Duration,
        value: &SharedValue,
        new_value: i32,
    ) -> Self {
        let lock = lock.clone();
        let value = value.clone();
        let handle = thread::spawn(move || {
            let write_acquired = lock.enter_write_lock(lock_timeout, false);
            let write_lock_held = lock.is_write_lock_held();
            if write_acquired {
                thread::sleep(hold);
                value.store(new_value, Ordering::SeqCst);
                lock.exit_write_lock(false);
            }
            WriterReport {
                write_acquired,
                write_lock_held,
            }
        });
        Self { handle }
    }

    pub fn join(self) -> WriterReport {
        self.handle.join().expect("writer thread panicked")
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ReaderReport {
    pub read_acquired: bool,
    pub read_lock_held: bool,
    pub value_read: Option<i32>,
}

/// Acquires read mode, holds it, then loads the value and releases
pub struct ReaderThread {
    handle: JoinHandle<ReaderReport>,
}

impl ReaderThread {
    pub fn spawn(
        lock: &Arc<ReaderWriterLock>,
        lock_timeout: LockTimeout,
        hold: Duration,
        value: &SharedValue,
    ) -> Self {
        let lock = lock.clone();
        let value = value.clone();
        let handle = thread::spawn(move || {
            let read_acquired = lock.enter_read_lock(lock_timeout);
            let read_lock_held = lock.is_read_lock_held();
            let mut value_read = None;
            if read_acquired {
                thread::sleep(hold);
                value_read = Some(value.load(Ordering::SeqCst));
                lock.exit_read_lock();
            }
            ReaderReport {
                read_acquired,
                read_lock_held,
                value_read,
            }
        });
        Self { handle }
    }

    pub fn join(self) -> ReaderReport {
        self.handle.join().expect("reader thread panicked")
    }
}

pub fn new_lock(name: &str) -> Arc<ReaderWriterLock> {
    rw_sync::init_test_tracing();
    Arc::new(ReaderWriterLock::named(name))
}
