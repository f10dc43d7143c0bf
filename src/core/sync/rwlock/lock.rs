/*!
 * Reader-Writer Lock
 *
 * Any number of threads may hold the lock in read mode at once; exactly one
 * thread may hold it in write mode. A writer that starts waiting blocks new
 * readers, so a steady stream of readers cannot starve it.
 *
 * # Protocol
 *
 * The lock is composed from four primitives:
 *
 * - **Exclusion gate**: held by the writer, or by the first reader in on
 *   behalf of every reader until the last reader out releases it. Writers
 *   therefore block on it exactly once, whatever the reader count.
 * - **Turnstile**: serializes the "am I the first reader" decision with
 *   reader arrivals and departures.
 * - **State mutex**: protects the reader set and writer identity. Held only
 *   for O(1) bookkeeping, never across a wait.
 * - **Writer-waiting gate**: closed while any writer waits for the exclusion
 *   gate; new readers wait for it to reopen. Readers already inside are never
 *   forced out.
 *
 * Every blocking step of one acquisition draws from a single deadline. A
 * timeout at any step unwinds what was taken and reports failure.
 *
 * # Reentrancy
 *
 * Holders are tracked by `ThreadId`. A thread may not enter read mode twice,
 * may not enter write mode twice, and may not enter read mode while holding
 * write mode. These attempts fail immediately without blocking.
 */

use super::guard::{ReadLockGuard, WriteLockGuard};
use super::state::{HolderTable, LockSnapshot};
use super::stats::{LockStats, LockStatsSnapshot};
use crate::core::errors::{AcquireStage, LockError, LockResult};
use crate::core::sync::config::RwLockConfig;
use crate::core::sync::gate::{ExclusionGate, Turnstile, WriterWaitingGate};
use crate::core::sync::timeout::LockTimeout;
use parking_lot::Mutex;
use std::fmt;
use std::thread::{self, ThreadId};
use std::time::Instant;
use tracing::{debug, instrument, trace, warn};

/// Write-preferring reader-writer lock with thread-identity bookkeeping
///
/// The lock guards no data itself; callers bracket their access to some
/// shared resource with enter/exit calls, or hold a guard from
/// [`read`](Self::read) / [`write`](Self::write).
///
/// # Examples
///
/// ```
/// use rw_sync::{LockTimeout, ReaderWriterLock};
///
/// let lock = ReaderWriterLock::new();
///
/// assert!(lock.enter_read_lock(LockTimeout::Infinite));
/// assert!(lock.is_read_lock_held());
/// // Read mode is not reentrant
/// assert!(!lock.enter_read_lock(LockTimeout::Immediate));
/// lock.exit_read_lock();
///
/// assert!(lock.enter_write_lock(LockTimeout::Immediate, false));
/// assert!(lock.is_write_lock_held());
/// lock.exit_write_lock(false);
/// ```
pub struct ReaderWriterLock {
    turnstile: Turnstile,
    exclusion: ExclusionGate,
    state: Mutex<HolderTable>,
    writer_gate: WriterWaitingGate,
    stats: LockStats,
    config: RwLockConfig,
}

impl ReaderWriterLock {
    /// Create a lock with the default configuration
    pub fn new() -> Self {
        Self::with_config(RwLockConfig::default())
    }

    /// Create a lock with the given configuration
    pub fn with_config(config: RwLockConfig) -> Self {
        Self {
            turnstile: Turnstile::new(),
            exclusion: ExclusionGate::new(),
            state: Mutex::new(HolderTable::default()),
            writer_gate: WriterWaitingGate::new(),
            stats: LockStats::default(),
            config,
        }
    }

    /// Create a lock with a name for tracing
    pub fn named(name: impl Into<String>) -> Self {
        Self::with_config(RwLockConfig::default().with_name(name))
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.config.name
    }

    #[inline]
    pub fn config(&self) -> &RwLockConfig {
        &self.config
    }

    // =========================================================================
    // Introspection
    // =========================================================================

    /// Number of threads holding the lock in read mode
    pub fn current_read_count(&self) -> usize {
        self.state.lock().reader_count()
    }

    /// Whether the calling thread holds the lock in read mode
    ///
    /// True at the instant observed; says nothing about other threads' later
    /// calls.
    pub fn is_read_lock_held(&self) -> bool {
        self.state.lock().is_reader(current_id())
    }

    /// Whether the calling thread holds the lock in write mode
    pub fn is_write_lock_held(&self) -> bool {
        self.state.lock().is_writer(current_id())
    }

    /// Point-in-time view of holders and waiting writers
    ///
    /// The waiting-writer count is read after the holder table, so it may be
    /// one step ahead of or behind the holder counts.
    pub fn snapshot(&self) -> LockSnapshot {
        let (readers, writer_held) = {
            let table = self.state.lock();
            (table.reader_count(), table.has_writer())
        };
        LockSnapshot {
            readers,
            writer_held,
            waiting_writers: self.writer_gate.waiting_writers(),
        }
    }

    /// Counters of acquisitions and failures since creation
    pub fn stats(&self) -> LockStatsSnapshot {
        self.stats.snapshot()
    }

    // =========================================================================
    // Read mode
    // =========================================================================

    /// Try to enter the lock in read mode
    ///
    /// Returns `false` if the calling thread already holds the lock in either
    /// mode, or if the timeout expires first.
    pub fn enter_read_lock(&self, timeout: impl Into<LockTimeout>) -> bool {
        self.try_enter_read(timeout).is_ok()
    }

    /// Like [`enter_read_lock`](Self::enter_read_lock), reporting why the
    /// lock was not acquired
    pub fn try_enter_read(&self, timeout: impl Into<LockTimeout>) -> LockResult<()> {
        let timeout = timeout.into();
        let started = self.slow_acquire_clock();
        let result = self.acquire_read(timeout);
        self.observe("read", timeout, started, &result);
        result
    }

    /// Exit read mode
    ///
    /// No-op if the calling thread does not hold the lock in read mode.
    pub fn exit_read_lock(&self) {
        let me = current_id();
        if !self.state.lock().is_reader(me) {
            trace!(lock = %self.config.name, "exit_read_lock without read hold");
            return;
        }

        let _pass = self.turnstile.enter_blocking();
        let last_reader = self.state.lock().remove_reader(me);
        if last_reader {
            self.exclusion.release();
            trace!(lock = %self.config.name, "last reader released exclusion gate");
        }
    }

    #[instrument(level = "trace", skip(self), fields(lock = %self.config.name))]
    fn acquire_read(&self, timeout: LockTimeout) -> LockResult<()> {
        let me = current_id();
        {
            let table = self.state.lock();
            if table.is_reader(me) {
                return Err(LockError::ReadAlreadyHeld);
            }
            if table.is_writer(me) {
                return Err(LockError::WriteHeldByCaller);
            }
        }

        let deadline = timeout.start();

        if !self.writer_gate.wait_open(deadline) {
            return Err(LockError::Timeout {
                stage: AcquireStage::WriterGate,
            });
        }

        let _pass = self.turnstile.enter(deadline).ok_or(LockError::Timeout {
            stage: AcquireStage::Turnstile,
        })?;

        let first_reader = !self.state.lock().has_readers();
        if first_reader {
            // May still be held by a departing writer
            if !self.exclusion.acquire(deadline) {
                return Err(LockError::Timeout {
                    stage: AcquireStage::Exclusion,
                });
            }
            trace!("first reader acquired exclusion gate");
        }

        self.state.lock().add_reader(me);
        self.stats.record_read();
        Ok(())
    }

    // =========================================================================
    // Write mode
    // =========================================================================

    /// Try to enter the lock in write mode
    ///
    /// With `upgrade_from_read`, the calling thread must hold the lock in
    /// read mode; that hold is released before the write acquisition starts.
    /// The switch is **not atomic**: between the two steps the thread holds
    /// neither mode and another thread may acquire either. If the write
    /// acquisition then times out, the thread is left holding nothing.
    ///
    /// Returns `false` if the calling thread already holds write mode, if an
    /// upgrade was requested without a read hold, or if the timeout expires.
    ///
    /// Without `upgrade_from_read`, a caller that holds read mode waits on the
    /// exclusion gate its own read hold keeps taken. The attempt can only time
    /// out, and with [`LockTimeout::Infinite`] it never returns. While it waits
    /// the writer-waiting gate stays closed, so every other new reader is shut
    /// out for the same span.
    pub fn enter_write_lock(
        &self,
        timeout: impl Into<LockTimeout>,
        upgrade_from_read: bool,
    ) -> bool {
        self.try_enter_write(timeout, upgrade_from_read).is_ok()
    }

    /// Like [`enter_write_lock`](Self::enter_write_lock), reporting why the
    /// lock was not acquired
    pub fn try_enter_write(
        &self,
        timeout: impl Into<LockTimeout>,
        upgrade_from_read: bool,
    ) -> LockResult<()> {
        let timeout = timeout.into();
        let started = self.slow_acquire_clock();
        let result = self.acquire_write(timeout, upgrade_from_read);
        self.observe("write", timeout, started, &result);
        result
    }

    /// Exit write mode, optionally moving to read mode
    ///
    /// Ignored if the calling thread does not hold write mode. With
    /// `downgrade_to_read`, the thread then enters read mode with an infinite
    /// timeout. As with upgrades the switch is **not atomic**: the exclusion
    /// gate is briefly free, and a writer that starts waiting in that window
    /// is served before the downgrading thread gets its read hold.
    pub fn exit_write_lock(&self, downgrade_to_read: bool) {
        let me = current_id();
        if !self.state.lock().clear_writer(me) {
            trace!(lock = %self.config.name, "exit_write_lock without write hold");
            return;
        }

        self.exclusion.release();
        trace!(lock = %self.config.name, "writer released exclusion gate");

        if downgrade_to_read && !self.is_read_lock_held() {
            let started = self.slow_acquire_clock();
            let result = self.acquire_read(LockTimeout::Infinite);
            self.observe("downgrade", LockTimeout::Infinite, started, &result);
            if result.is_ok() {
                self.stats.record_downgrade();
            }
        }
    }

    /// Release read mode and enter write mode; see
    /// [`enter_write_lock`](Self::enter_write_lock) for the non-atomic window
    pub fn upgrade_read_to_write_lock(&self, timeout: impl Into<LockTimeout>) -> bool {
        self.enter_write_lock(timeout, true)
    }

    /// Release write mode and enter read mode; see
    /// [`exit_write_lock`](Self::exit_write_lock) for the non-atomic window
    pub fn downgrade_write_to_read_lock(&self) {
        self.exit_write_lock(true)
    }

    #[instrument(level = "trace", skip(self), fields(lock = %self.config.name))]
    fn acquire_write(&self, timeout: LockTimeout, upgrade_from_read: bool) -> LockResult<()> {
        let me = current_id();
        let holds_read = {
            let table = self.state.lock();
            if table.is_writer(me) {
                return Err(LockError::WriteAlreadyHeld);
            }
            table.is_reader(me)
        };

        if upgrade_from_read {
            if !holds_read {
                return Err(LockError::NotReadHolder);
            }
            self.exit_read_lock();
        } else if holds_read {
            warn!(
                lock = %self.config.name,
                timeout = timeout.category(),
                "write acquisition while holding the read lock; upgrade instead"
            );
        }

        let deadline = timeout.start();
        let acquired = {
            let _waiting = self.writer_gate.register_writer();
            self.exclusion.acquire(deadline)
        };
        if !acquired {
            return Err(LockError::Timeout {
                stage: AcquireStage::Exclusion,
            });
        }

        self.state.lock().set_writer(me);
        self.stats.record_write();
        if upgrade_from_read {
            self.stats.record_upgrade();
        }
        Ok(())
    }

    // =========================================================================
    // Guards
    // =========================================================================

    /// Enter read mode, returning a guard that exits on drop
    pub fn read(&self, timeout: impl Into<LockTimeout>) -> LockResult<ReadLockGuard<'_>> {
        self.try_enter_read(timeout)?;
        Ok(ReadLockGuard::new(self))
    }

    /// Enter write mode, returning a guard that exits on drop
    pub fn write(&self, timeout: impl Into<LockTimeout>) -> LockResult<WriteLockGuard<'_>> {
        self.try_enter_write(timeout, false)?;
        Ok(WriteLockGuard::new(self))
    }

    /// [`read`](Self::read) with the configured default timeout
    pub fn read_default(&self) -> LockResult<ReadLockGuard<'_>> {
        self.read(self.config.default_timeout)
    }

    /// [`write`](Self::write) with the configured default timeout
    pub fn write_default(&self) -> LockResult<WriteLockGuard<'_>> {
        self.write(self.config.default_timeout)
    }

    // =========================================================================
    // Diagnostics
    // =========================================================================

    #[inline]
    fn slow_acquire_clock(&self) -> Option<Instant> {
        self.config.slow_acquire_threshold.map(|_| Instant::now())
    }

    fn observe(
        &self,
        mode: &'static str,
        timeout: LockTimeout,
        started: Option<Instant>,
        result: &LockResult<()>,
    ) {
        match result {
            Ok(()) => {
                if let (Some(threshold), Some(started)) =
                    (self.config.slow_acquire_threshold, started)
                {
                    let waited = started.elapsed();
                    if waited >= threshold {
                        warn!(
                            lock = %self.config.name,
                            mode,
                            waited_ms = waited.as_millis() as u64,
                            threshold_ms = threshold.as_millis() as u64,
                            "slow lock acquisition"
                        );
                    }
                }
            }
            Err(err) => {
                self.stats.record_failure(err);
                debug!(
                    lock = %self.config.name,
                    mode,
                    timeout = timeout.category(),
                    error = %err,
                    "lock not acquired"
                );
            }
        }
    }
}

impl Default for ReaderWriterLock {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ReaderWriterLock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReaderWriterLock")
            .field("name", &self.config.name)
            .field("snapshot", &self.snapshot())
            .finish()
    }
}

#[inline]
fn current_id() -> ThreadId {
    thread::current().id()
}
