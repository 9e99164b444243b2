//! Retry configuration.
//!
//! [`RetryConfig`] lets an application keep its backoff schedule in a config
//! file or the environment instead of in code.

use crate::error::ConfigError;
use crate::retry::{BackoffSchedule, RetryExecutor};
use serde::{Deserialize, Serialize};

/// Environment variable read by [`RetryConfig::from_env`].
///
/// Holds a comma-separated list of milliseconds, e.g. `500,400,200`.
pub const SCHEDULE_ENV_VAR: &str = "SCHEMACLIP_RETRY_SCHEDULE_MS";

/// Serializable retry settings.
///
/// An empty `schedule_ms` means "use the default schedule".
///
/// # Examples
///
/// ```rust
/// use schemaclip_core::config::RetryConfig;
/// use std::time::Duration;
///
/// let config = RetryConfig::from_toml_str("schedule_ms = [100, 50]")?;
/// assert_eq!(config.schedule().total_delay(), Duration::from_millis(150));
/// # Ok::<(), schemaclip_core::error::ConfigError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RetryConfig {
    /// Waits between attempts, in milliseconds
    pub schedule_ms: Vec<u64>,
}

impl RetryConfig {
    /// Create a config with an explicit schedule.
    pub fn with_schedule_ms(schedule_ms: impl Into<Vec<u64>>) -> Result<Self, ConfigError> {
        Self {
            schedule_ms: schedule_ms.into(),
        }
        .validated()
    }

    /// Parse a TOML document.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        toml::from_str::<Self>(input)?.validated()
    }

    /// Parse a JSON document.
    pub fn from_json_str(input: &str) -> Result<Self, ConfigError> {
        serde_json::from_str::<Self>(input)?.validated()
    }

    /// Read [`SCHEDULE_ENV_VAR`]. Unset or blank yields the default config.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(SCHEDULE_ENV_VAR) {
            Ok(raw) => Self::parse_list(&raw),
            Err(_) => Ok(Self::default()),
        }
    }

    fn parse_list(raw: &str) -> Result<Self, ConfigError> {
        let schedule_ms = raw
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(|entry| {
                entry.parse::<u64>().map_err(|_| ConfigError::InvalidNumber {
                    var: SCHEDULE_ENV_VAR,
                    value: entry.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self { schedule_ms }.validated()
    }

    fn validated(self) -> Result<Self, ConfigError> {
        if let Some(index) = self.schedule_ms.iter().position(|&ms| ms == 0) {
            return Err(ConfigError::InvalidSchedule { index });
        }
        Ok(self)
    }

    /// The effective schedule.
    pub fn schedule(&self) -> BackoffSchedule {
        BackoffSchedule::from_millis(self.schedule_ms.iter().copied())
    }

    /// An executor using this schedule and no filter.
    pub fn executor<E>(&self) -> RetryExecutor<E> {
        RetryExecutor::new().with_schedule(self.schedule())
    }
}
