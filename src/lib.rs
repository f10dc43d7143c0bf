/*!
 * rw-sync
 * Write-preferring reader-writer lock with reentrancy checks
 *
 * Many readers or one writer; a waiting writer blocks newly arriving readers
 * so it cannot be starved. Holders are tracked per thread, which lets the
 * lock refuse reentrant acquisitions and answer "does this thread hold it".
 *
 * ```
 * use rw_sync::{LockTimeout, ReaderWriterLock};
 * use std::sync::Arc;
 * use std::thread;
 *
 * let lock = Arc::new(ReaderWriterLock::named("config"));
 *
 * let writer = {
 *     let lock = lock.clone();
 *     thread::spawn(move || {
 *         let _guard = lock.write(LockTimeout::Infinite).unwrap();
 *         // mutate the shared resource
 *     })
 * };
 * writer.join().unwrap();
 *
 * let _guard = lock.read(LockTimeout::from_millis(100)).unwrap();
 * assert_eq!(lock.current_read_count(), 1);
 * ```
 */

pub mod core;
pub mod monitoring;

// Re-exports
pub use crate::core::errors::{AcquireStage, ConfigError, ConfigResult, LockError, LockResult};
pub use crate::core::sync::{
    LockSnapshot, LockStatsSnapshot, LockTimeout, ReadLockGuard, ReaderWriterLock, RwLockConfig,
    WriteLockGuard,
};
pub use monitoring::{init_test_tracing, init_tracing};
