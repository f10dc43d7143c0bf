/*!
 * Reader-Writer Lock
 *
 * Write-preferring reader-writer lock with reentrancy checks, scoped guards,
 * snapshots and statistics.
 */

mod guard;
mod lock;
mod state;
mod stats;

pub use guard::{ReadLockGuard, WriteLockGuard};
pub use lock::ReaderWriterLock;
pub use state::LockSnapshot;
pub use stats::LockStatsSnapshot;
