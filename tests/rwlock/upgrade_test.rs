/*!
 * Upgrade and downgrade between read and write mode
 */

use super::common::*;
use pretty_assertions::assert_eq;
use rw_sync::{AcquireStage, LockError, LockTimeout};
use serial_test::serial;
use std::sync::atomic::Ordering;
use std::thread;

#[test]
fn test_upgrade_read_to_write_lock() {
    let lock = new_lock("upgrade_roundtrip");

    assert!(lock.enter_read_lock(LockTimeout::Infinite));
    assert!(lock.is_read_lock_held());

    assert!(lock.upgrade_read_to_write_lock(LockTimeout::Infinite));
    assert!(lock.is_write_lock_held());
    assert!(!lock.is_read_lock_held());

    lock.downgrade_write_to_read_lock();
    assert!(lock.is_read_lock_held());
    assert!(!lock.is_write_lock_held());

    lock.exit_read_lock();
    assert!(lock.snapshot().is_idle());
}

#[test]
fn test_upgrade_without_read_hold_fails() {
    let lock = new_lock("upgrade_no_read");
    assert!(!lock.upgrade_read_to_write_lock(LockTimeout::Immediate));
    assert_eq!(
        lock.try_enter_write(LockTimeout::Immediate, true),
        Err(LockError::NotReadHolder)
    );
    assert!(!lock.is_write_lock_held());
}

#[test]
fn test_upgrade_while_writing_fails() {
    let lock = new_lock("upgrade_while_writing");
    assert!(lock.enter_write_lock(LockTimeout::Immediate, false));
    assert_eq!(
        lock.try_enter_write(LockTimeout::Immediate, true),
        Err(LockError::WriteAlreadyHeld)
    );
    assert!(lock.is_write_lock_held());
    lock.exit_write_lock(false);
}

#[test]
fn test_downgrade_without_write_hold_is_ignored() {
    let lock = new_lock("downgrade_no_write");
    lock.downgrade_write_to_read_lock();
    assert!(!lock.is_read_lock_held());
    assert_eq!(lock.stats().downgrades, 0);
}

#[test]
#[serial]
fn test_upgrade_waits_for_other_readers() {
    let lock = new_lock("upgrade_waits");
    let value = shared_value(1);

    let other = ReaderThread::spawn(&lock, LockTimeout::Infinite, units(2), &value);
    thread::sleep(units(1));

    assert!(lock.enter_read_lock(LockTimeout::Infinite));
    assert_eq!(lock.current_read_count(), 2);

    // Our read hold is dropped first; the other reader still holds the
    // exclusion gate until it finishes
    assert!(lock.upgrade_read_to_write_lock(LockTimeout::Infinite));
    assert_eq!(lock.current_read_count(), 0);
    value.store(5, Ordering::SeqCst);
    lock.exit_write_lock(false);

    let report = other.join();
    assert!(report.read_acquired);
    assert_eq!(report.value_read, Some(1));
}

#[test]
#[serial]
fn test_failed_upgrade_leaves_nothing_held() {
    let lock = new_lock("failed_upgrade");
    let value = shared_value(1);

    let other = ReaderThread::spawn(&lock, LockTimeout::Infinite, units(3), &value);
    thread::sleep(units(1));

    assert!(lock.enter_read_lock(LockTimeout::Infinite));
    assert!(!lock.upgrade_read_to_write_lock(LockTimeout::Bounded(UNIT)));
    assert!(!lock.is_read_lock_held());
    assert!(!lock.is_write_lock_held());

    other.join();
    assert!(lock.snapshot().is_idle());
}

#[test]
#[serial]
fn test_downgrade_lets_readers_in() {
    let lock = new_lock("downgrade_readers");
    let value = shared_value(1);

    assert!(lock.enter_write_lock(LockTimeout::Infinite, false));
    value.store(7, Ordering::SeqCst);

    let reader = ReaderThread::spawn(&lock, LockTimeout::Infinite, units(0), &value);
    thread::sleep(units(1));

    lock.downgrade_write_to_read_lock();
    assert!(lock.is_read_lock_held());

    let report = reader.join();
    assert!(report.read_acquired);
    assert_eq!(report.value_read, Some(7));

    lock.exit_read_lock();
    assert!(lock.snapshot().is_idle());
}

#[test]
#[serial]
fn test_write_without_upgrade_shuts_out_readers() {
    let lock = new_lock("write_while_reading");
    assert!(lock.enter_read_lock(LockTimeout::Infinite));

    let other_reader = {
        let lock = lock.clone();
        thread::spawn(move || {
            thread::sleep(UNIT);
            lock.try_enter_read(UNIT)
        })
    };

    // Blocks on the exclusion gate held for our own read
    assert_eq!(
        lock.try_enter_write(units(3), false),
        Err(LockError::Timeout {
            stage: AcquireStage::Exclusion
        })
    );
    assert_eq!(
        other_reader.join().unwrap(),
        Err(LockError::Timeout {
            stage: AcquireStage::WriterGate
        })
    );
    assert!(lock.is_read_lock_held());
    assert_eq!(lock.snapshot().waiting_writers, 0);

    let late_reader = {
        let lock = lock.clone();
        thread::spawn(move || {
            let acquired = lock.enter_read_lock(LockTimeout::Immediate);
            lock.exit_read_lock();
            acquired
        })
    };
    assert!(late_reader.join().unwrap());

    lock.exit_read_lock();
    assert!(lock.snapshot().is_idle());
}
