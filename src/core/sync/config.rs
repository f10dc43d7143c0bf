/*!
 * Lock Configuration
 *
 * Runtime configuration for a reader-writer lock: its name in traces, the
 * timeout used by the `*_default` guard helpers, and the slow-acquire
 * reporting threshold.
 */

use super::timeout::LockTimeout;
use crate::core::errors::{ConfigError, ConfigResult};
use crate::core::limits::{
    DEFAULT_LOCK_NAME, DEFAULT_SLOW_ACQUIRE_THRESHOLD, INTERACTIVE_ACQUIRE_TIMEOUT,
    INTERACTIVE_SLOW_ACQUIRE_THRESHOLD, MAX_CONFIGURED_TIMEOUT, PATIENT_ACQUIRE_TIMEOUT,
};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DurationMilliSeconds};
use std::time::Duration;

/// Reader-writer lock configuration
///
/// # Example
///
/// ```
/// use rw_sync::{LockTimeout, RwLockConfig};
///
/// let config = RwLockConfig::from_json(
///     r#"{"name": "catalog", "default_timeout": {"bounded": 250}}"#,
/// ).unwrap();
///
/// assert_eq!(config.name, "catalog");
/// assert_eq!(config.default_timeout, LockTimeout::from_millis(250));
/// ```
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RwLockConfig {
    /// Name reported in tracing fields
    pub name: String,
    /// Timeout used by `read_default()` / `write_default()`
    pub default_timeout: LockTimeout,
    /// Acquisitions slower than this are logged at warn level
    #[serde_as(as = "Option<DurationMilliSeconds<u64>>")]
    #[serde(rename = "slow_acquire_threshold_ms")]
    pub slow_acquire_threshold: Option<Duration>,
}

impl Default for RwLockConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_LOCK_NAME.to_string(),
            default_timeout: LockTimeout::Infinite,
            slow_acquire_threshold: None,
        }
    }
}

impl RwLockConfig {
    /// Configuration for latency-sensitive callers (short waits, loud when slow)
    pub fn interactive() -> Self {
        Self {
            default_timeout: LockTimeout::Bounded(INTERACTIVE_ACQUIRE_TIMEOUT),
            slow_acquire_threshold: Some(INTERACTIVE_SLOW_ACQUIRE_THRESHOLD),
            ..Default::default()
        }
    }

    /// Configuration for background callers that can afford long waits
    pub fn patient() -> Self {
        Self {
            default_timeout: LockTimeout::Bounded(PATIENT_ACQUIRE_TIMEOUT),
            slow_acquire_threshold: Some(DEFAULT_SLOW_ACQUIRE_THRESHOLD),
            ..Default::default()
        }
    }

    /// Set lock name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set default timeout
    pub fn with_default_timeout(mut self, timeout: impl Into<LockTimeout>) -> Self {
        self.default_timeout = timeout.into();
        self
    }

    /// Set slow-acquire threshold
    pub fn with_slow_acquire_threshold(mut self, threshold: Duration) -> Self {
        self.slow_acquire_threshold = Some(threshold);
        self
    }

    /// Check the configuration for values the lock cannot honor
    pub fn validate(&self) -> ConfigResult<()> {
        if self.name.is_empty() {
            return Err(ConfigError::EmptyName);
        }
        if let LockTimeout::Bounded(d) = self.default_timeout {
            if d > MAX_CONFIGURED_TIMEOUT {
                return Err(ConfigError::TimeoutTooLong(d));
            }
        }
        if self.slow_acquire_threshold == Some(Duration::ZERO) {
            return Err(ConfigError::InvalidThreshold);
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}
