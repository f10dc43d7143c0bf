/*!
 * Lock Limits and Constants
 *
 * Centralized location for default timeouts and thresholds used by the
 * reader-writer lock and its configuration presets.
 *
 * ## Conventions
 * - Values are grouped by domain
 * - Performance-relevant constants are marked with [PERF]
 */

use std::time::Duration;

// =============================================================================
// NAMING
// =============================================================================

/// Name given to locks created without an explicit configuration
pub const DEFAULT_LOCK_NAME: &str = "rwlock";

// =============================================================================
// TIMEOUTS
// =============================================================================

/// Default acquisition budget for interactive callers (50ms)
/// Short enough that a stuck holder surfaces as a timeout instead of a hang
pub const INTERACTIVE_ACQUIRE_TIMEOUT: Duration = Duration::from_millis(50);

/// Default acquisition budget for patient callers (10s)
pub const PATIENT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);

/// Upper bound accepted for a configured default timeout (1 hour)
/// Anything longer should be expressed as an infinite wait
pub const MAX_CONFIGURED_TIMEOUT: Duration = Duration::from_secs(3600);

// =============================================================================
// DIAGNOSTICS
// =============================================================================

/// Acquisitions slower than this are reported at warn level (100ms)
/// [PERF] Only measured when a threshold is configured
pub const DEFAULT_SLOW_ACQUIRE_THRESHOLD: Duration = Duration::from_millis(100);

/// Slow-acquire threshold used by the interactive preset (10ms)
pub const INTERACTIVE_SLOW_ACQUIRE_THRESHOLD: Duration = Duration::from_millis(10);
