//! Ordered backoff schedules.

use std::borrow::Cow;
use std::time::Duration;

/// Waits used whenever a caller supplies no schedule, or an empty one.
///
/// Shared read-only by every executor; never mutated.
pub static DEFAULT_SCHEDULE: [Duration; 3] = [
    Duration::from_millis(500),
    Duration::from_millis(400),
    Duration::from_millis(200),
];

/// An ordered, non-empty sequence of waits between retry attempts.
///
/// Entry `i` is the wait inserted after the `i`-th failed attempt. A schedule
/// with `N` entries allows at most `N + 1` attempts: `N` guarded attempts
/// followed by one final attempt whose outcome is returned as-is.
///
/// Constructing a schedule from an empty sequence yields [`DEFAULT_SCHEDULE`].
///
/// # Examples
///
/// ```rust
/// use schemaclip_core::retry::BackoffSchedule;
/// use std::time::Duration;
///
/// let schedule = BackoffSchedule::from_millis([100, 50]);
/// assert_eq!(schedule.max_attempts(), 3);
/// assert_eq!(schedule.total_delay(), Duration::from_millis(150));
///
/// // Empty schedules fall back to the default 500/400/200ms sequence.
/// assert!(BackoffSchedule::new(Vec::new()).is_default());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackoffSchedule {
    delays: Cow<'static, [Duration]>,
}

impl BackoffSchedule {
    /// Create a schedule from explicit delays.
    pub fn new(delays: impl Into<Vec<Duration>>) -> Self {
        let delays = delays.into();
        if delays.is_empty() {
            return Self::default();
        }
        Self {
            delays: Cow::Owned(delays),
        }
    }

    /// Create a schedule from millisecond values.
    pub fn from_millis(millis: impl IntoIterator<Item = u64>) -> Self {
        Self::new(
            millis
                .into_iter()
                .map(Duration::from_millis)
                .collect::<Vec<_>>(),
        )
    }

    /// Resolve an optional caller-supplied schedule to the effective one.
    pub fn resolve(schedule: Option<Self>) -> Self {
        schedule.unwrap_or_default()
    }

    /// The waits, in order.
    pub fn delays(&self) -> &[Duration] {
        &self.delays
    }

    /// Iterate over the waits, in order.
    pub fn iter(&self) -> impl Iterator<Item = Duration> + '_ {
        self.delays.iter().copied()
    }

    /// Number of guarded attempts, i.e. attempts that may be followed by a wait.
    pub fn retries(&self) -> usize {
        self.delays.len()
    }

    /// Upper bound on the number of times an operation is invoked.
    pub fn max_attempts(&self) -> usize {
        self.delays.len() + 1
    }

    /// Sum of every wait in the schedule, saturating at [`Duration::MAX`].
    pub fn total_delay(&self) -> Duration {
        self.delays
            .iter()
            .fold(Duration::ZERO, |total, delay| total.saturating_add(*delay))
    }

    /// Whether this schedule is the shared default.
    pub fn is_default(&self) -> bool {
        *self.delays == DEFAULT_SCHEDULE
    }
}

impl Default for BackoffSchedule {
    fn default() -> Self {
        Self {
            delays: Cow::Borrowed(&DEFAULT_SCHEDULE),
        }
    }
}

impl From<Vec<Duration>> for BackoffSchedule {
    fn from(delays: Vec<Duration>) -> Self {
        Self::new(delays)
    }
}

impl From<&[Duration]> for BackoffSchedule {
    fn from(delays: &[Duration]) -> Self {
        Self::new(delays.to_vec())
    }
}

impl<'a> IntoIterator for &'a BackoffSchedule {
    type Item = Duration;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, Duration>>;

    fn into_iter(self) -> Self::IntoIter {
        self.delays.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_schedule_values() {
        let schedule = BackoffSchedule::default();

        assert_eq!(
            schedule.delays(),
            &[
                Duration::from_millis(500),
                Duration::from_millis(400),
                Duration::from_millis(200),
            ]
        );
        assert_eq!(schedule.retries(), 3);
        assert_eq!(schedule.max_attempts(), 4);
        assert!(schedule.is_default());
    }

    #[test]
    fn test_default_schedule_is_borrowed() {
        // Every default shares the same static storage
        let schedule = BackoffSchedule::default();
        assert!(matches!(schedule.delays, Cow::Borrowed(_)));
        assert!(std::ptr::eq(schedule.delays().as_ptr(), DEFAULT_SCHEDULE.as_ptr()));
    }

    #[test]
    fn test_empty_schedule_falls_back_to_default() {
        assert_eq!(BackoffSchedule::new(Vec::new()), BackoffSchedule::default());
        assert_eq!(BackoffSchedule::from_millis([]), BackoffSchedule::default());
        assert_eq!(BackoffSchedule::resolve(None), BackoffSchedule::default());
    }

    #[test]
    fn test_custom_schedule_preserves_order() {
        let schedule = BackoffSchedule::from_millis([10, 30, 20]);

        let delays: Vec<_> = schedule.iter().collect();
        assert_eq!(
            delays,
            vec![
                Duration::from_millis(10),
                Duration::from_millis(30),
                Duration::from_millis(20),
            ]
        );
        assert_eq!(schedule.total_delay(), Duration::from_millis(60));
        assert!(!schedule.is_default());
    }

    #[test]
    fn test_resolve_keeps_supplied_schedule() {
        let supplied = BackoffSchedule::from_millis([100, 50]);
        assert_eq!(BackoffSchedule::resolve(Some(supplied.clone())), supplied);
    }

    #[test]
    fn test_total_delay_saturates() {
        let schedule = BackoffSchedule::new(vec![Duration::MAX, Duration::from_secs(1)]);
        assert_eq!(schedule.total_delay(), Duration::MAX);
    }

    #[test]
    fn test_explicit_default_values_compare_equal_to_default() {
        let schedule = BackoffSchedule::from_millis([500, 400, 200]);
        assert!(schedule.is_default());
        assert_eq!(schedule, BackoffSchedule::default());
    }
}
