/*!
 * Synchronization Primitives
 *
 * A write-preferring reader-writer lock and the gates it is built from:
 * - Exclusion gate (reader/writer exclusion, releasable by any thread)
 * - Turnstile (first-reader serialization)
 * - Writer-waiting gate (write preference via broadcast signal)
 *
 * # Architecture
 *
 * Readers share the exclusion gate: the first reader in acquires it and the
 * last reader out releases it. Writers take it exclusively. A writer that is
 * waiting closes the writer-waiting gate so that new readers queue behind it
 * instead of extending the current read epoch.
 *
 * # Timeouts
 *
 * Every blocking operation takes a [`LockTimeout`]: infinite, immediate, or
 * bounded. Failures are reported as `false` (or a [`LockError`] from the
 * `try_*` variants), never as panics.
 *
 * [`LockError`]: crate::core::errors::LockError
 */

mod config;
mod gate;
mod rwlock;
mod timeout;

pub use config::RwLockConfig;
pub use rwlock::{LockSnapshot, LockStatsSnapshot, ReadLockGuard, ReaderWriterLock, WriteLockGuard};
pub use timeout::{Deadline, LockTimeout};

// Re-export gate primitives for advanced users
pub use gate::{ExclusionGate, Turnstile, TurnstilePass, WaitingWriter, WriterWaitingGate};
