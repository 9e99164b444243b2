//! Schedules that grow exponentially.

use super::schedule::BackoffSchedule;
use crate::error::ConfigError;
use rand::Rng;
use std::time::Duration;

/// Parameters for generating an exponentially growing [`BackoffSchedule`].
///
/// Entry `n` of the generated schedule is `initial_delay * multiplier^n`,
/// randomised by up to `±jitter` of its value and capped at `max_delay`.
/// Delays that cannot be represented as a [`Duration`] are capped as well.
///
/// # Examples
///
/// ```rust
/// use schemaclip_core::retry::{ExponentialBackoff, RetryExecutor};
/// use std::time::Duration;
///
/// let schedule = ExponentialBackoff::builder()
///     .max_retries(4)
///     .initial_delay(Duration::from_millis(50))
///     .jitter(0.0)
///     .build()?
///     .to_schedule();
///
/// assert_eq!(schedule.retries(), 4);
/// assert_eq!(schedule.delays()[3], Duration::from_millis(400));
///
/// let executor = RetryExecutor::<std::io::Error>::new().with_schedule(schedule);
/// # let _ = executor;
/// # Ok::<(), schemaclip_core::error::ConfigError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ExponentialBackoff {
    max_retries: u32,
    initial_delay: Duration,
    max_delay: Duration,
    multiplier: f64,
    jitter: f64,
}

impl ExponentialBackoff {
    /// Start from 3 retries of 100ms doubling up to 60s with 10% jitter.
    pub fn builder() -> ExponentialBackoffBuilder {
        ExponentialBackoffBuilder {
            params: Self::default(),
        }
    }

    /// Length of the generated schedule.
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Wait after the failure of attempt `attempt` (0-indexed).
    pub fn next_delay(&self, attempt: u32) -> Duration {
        if self.initial_delay.is_zero() {
            return Duration::ZERO;
        }

        let exponent = i32::try_from(attempt).unwrap_or(i32::MAX);
        let mut secs = self.initial_delay.as_secs_f64() * self.multiplier.powi(exponent);
        if self.jitter > 0.0 {
            secs += secs * self.jitter * rand::thread_rng().gen_range(-1.0..=1.0);
        }

        // Overflowing or non-finite delays saturate at the cap.
        Duration::try_from_secs_f64(secs).map_or(self.max_delay, |delay| delay.min(self.max_delay))
    }

    /// Sample one delay per retry into a schedule.
    ///
    /// With `max_retries == 0` the default schedule is returned, since
    /// schedules are never empty.
    pub fn to_schedule(&self) -> BackoffSchedule {
        BackoffSchedule::new(
            (0..self.max_retries)
                .map(|attempt| self.next_delay(attempt))
                .collect::<Vec<_>>(),
        )
    }
}

impl Default for ExponentialBackoff {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(60),
            multiplier: 2.0,
            jitter: 0.1,
        }
    }
}

impl From<ExponentialBackoff> for BackoffSchedule {
    fn from(backoff: ExponentialBackoff) -> Self {
        backoff.to_schedule()
    }
}

/// Builder for [`ExponentialBackoff`]; validated by [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct ExponentialBackoffBuilder {
    params: ExponentialBackoff,
}

impl ExponentialBackoffBuilder {
    /// Number of entries in the generated schedule.
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.params.max_retries = max_retries;
        self
    }

    /// First entry of the schedule.
    pub fn initial_delay(mut self, delay: Duration) -> Self {
        self.params.initial_delay = delay;
        self
    }

    /// Cap on every entry.
    pub fn max_delay(mut self, delay: Duration) -> Self {
        self.params.max_delay = delay;
        self
    }

    /// Ratio between consecutive entries. Must be finite and positive;
    /// values below 1.0 give a shrinking schedule.
    pub fn multiplier(mut self, multiplier: f64) -> Self {
        self.params.multiplier = multiplier;
        self
    }

    /// Randomisation factor. Must be finite; clamped to `0.0..=1.0`.
    pub fn jitter(mut self, jitter: f64) -> Self {
        self.params.jitter = jitter;
        self
    }

    /// Validate the parameters.
    pub fn build(self) -> Result<ExponentialBackoff, ConfigError> {
        let mut params = self.params;

        if !params.multiplier.is_finite() || params.multiplier <= 0.0 {
            return Err(ConfigError::InvalidBackoff {
                field: "multiplier",
                reason: "must be a finite, positive number",
            });
        }
        if !params.jitter.is_finite() {
            return Err(ConfigError::InvalidBackoff {
                field: "jitter",
                reason: "must be a finite number",
            });
        }

        params.jitter = params.jitter.clamp(0.0, 1.0);
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed(initial_ms: u64, multiplier: f64, retries: u32) -> ExponentialBackoff {
        ExponentialBackoff::builder()
            .max_retries(retries)
            .initial_delay(Duration::from_millis(initial_ms))
            .multiplier(multiplier)
            .jitter(0.0)
            .build()
            .unwrap()
    }

    #[test]
    fn test_schedule_grows_by_multiplier() {
        let schedule = fixed(100, 3.0, 3).to_schedule();

        assert_eq!(
            schedule.delays(),
            &[
                Duration::from_millis(100),
                Duration::from_millis(300),
                Duration::from_millis(900),
            ]
        );
    }

    #[test]
    fn test_shrinking_multiplier() {
        let schedule = fixed(400, 0.5, 3).to_schedule();
        assert_eq!(schedule.delays()[2], Duration::from_millis(100));
    }

    #[test]
    fn test_entries_capped_at_max_delay() {
        let backoff = ExponentialBackoff::builder()
            .max_retries(10)
            .initial_delay(Duration::from_secs(1))
            .max_delay(Duration::from_secs(5))
            .multiplier(10.0)
            .jitter(0.5)
            .build()
            .unwrap();

        let schedule = backoff.to_schedule();
        assert!(schedule.iter().all(|delay| delay <= Duration::from_secs(5)));
        assert_eq!(schedule.delays()[9], Duration::from_secs(5));
    }

    #[test]
    fn test_unbounded_cap_saturates_instead_of_panicking() {
        let schedule = ExponentialBackoff::builder()
            .max_retries(80)
            .initial_delay(Duration::from_secs(1))
            .max_delay(Duration::MAX)
            .jitter(0.0)
            .build()
            .unwrap()
            .to_schedule();

        assert_eq!(schedule.retries(), 80);
        assert_eq!(schedule.delays()[0], Duration::from_secs(1));
        assert_eq!(schedule.delays()[79], Duration::MAX);
        assert_eq!(schedule.total_delay(), Duration::MAX);
    }

    #[test]
    fn test_huge_attempt_number_saturates() {
        let backoff = fixed(1, 2.0, 1);
        assert_eq!(backoff.next_delay(u32::MAX), Duration::from_secs(60));
    }

    #[test]
    fn test_zero_initial_delay_stays_zero() {
        let backoff = ExponentialBackoff::builder()
            .initial_delay(Duration::ZERO)
            .multiplier(f64::MAX)
            .build()
            .unwrap();
        assert_eq!(backoff.next_delay(5), Duration::ZERO);
    }

    #[test]
    fn test_invalid_multiplier_rejected() {
        for multiplier in [f64::NAN, f64::INFINITY, 0.0, -2.0] {
            let err = ExponentialBackoff::builder()
                .multiplier(multiplier)
                .build()
                .unwrap_err();
            assert!(
                matches!(err, ConfigError::InvalidBackoff { field: "multiplier", .. }),
                "multiplier {multiplier} should be rejected, got {err:?}"
            );
        }
    }

    #[test]
    fn test_nan_jitter_rejected() {
        let err = ExponentialBackoff::builder().jitter(f64::NAN).build().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBackoff { field: "jitter", .. }));
    }

    #[test]
    fn test_jitter_stays_within_bounds_and_varies() {
        let backoff = ExponentialBackoff::builder()
            .initial_delay(Duration::from_secs(1))
            .jitter(0.5)
            .build()
            .unwrap();

        let delays: Vec<_> = (0..20).map(|_| backoff.next_delay(0)).collect();
        assert!(
            delays
                .iter()
                .all(|d| (500..=1500).contains(&d.as_millis()))
        );
        assert!(delays.windows(2).any(|w| w[0] != w[1]));
    }

    #[test]
    fn test_jitter_clamped() {
        let high = ExponentialBackoff::builder().jitter(2.0).build().unwrap();
        let low = ExponentialBackoff::builder().jitter(-0.5).build().unwrap();
        assert_eq!(high.jitter, 1.0);
        assert_eq!(low.jitter, 0.0);
    }

    #[test]
    fn test_zero_retries_yields_default_schedule() {
        let schedule: BackoffSchedule = fixed(100, 2.0, 0).into();
        assert!(schedule.is_default());
    }

    #[test]
    fn test_unconfigured_builder_matches_default() {
        assert_eq!(
            ExponentialBackoff::builder().build().unwrap(),
            ExponentialBackoff::default()
        );
    }
}
