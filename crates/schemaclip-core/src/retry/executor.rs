//! The retry-with-backoff executor.

use super::schedule::BackoffSchedule;
use super::waiter::{BlockingWaiter, SuspendingWaiter, Waiter};
use crate::error::RetryError;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// Classifies a failure: `true` means another attempt is worthwhile,
/// `false` means fail fast.
pub type TransientFilter<E> = Arc<dyn Fn(&E) -> bool + Send + Sync>;

/// Re-invokes an operation that may fail transiently, waiting between
/// attempts according to a [`BackoffSchedule`].
///
/// For each wait `w` in the schedule the operation is invoked once. A success
/// is returned immediately. A failure the filter rejects is returned
/// immediately. Any other failure is followed by a wait of `w`. Once the
/// schedule is exhausted the operation is invoked one final time and that
/// outcome is returned verbatim, without consulting the filter.
///
/// The executor holds no per-invocation state, so one value can be reused
/// across any number of independent calls.
///
/// # Examples
///
/// ```rust
/// use schemaclip_core::retry::{BackoffSchedule, RetryExecutor};
/// use std::cell::Cell;
/// use std::io;
///
/// let attempts = Cell::new(0);
/// let executor = RetryExecutor::new()
///     .with_schedule(BackoffSchedule::from_millis([1, 1]))
///     .with_filter(|err: &io::Error| err.kind() != io::ErrorKind::NotFound);
///
/// let value = executor.run_sync(|| {
///     attempts.set(attempts.get() + 1);
///     if attempts.get() < 3 {
///         Err(io::Error::other("clipboard busy"))
///     } else {
///         Ok("copied")
///     }
/// })?;
///
/// assert_eq!(value, "copied");
/// assert_eq!(attempts.get(), 3);
/// # Ok::<(), io::Error>(())
/// ```
pub struct RetryExecutor<E> {
    filter: Option<TransientFilter<E>>,
    schedule: BackoffSchedule,
}

impl<E> RetryExecutor<E> {
    /// Create an executor with no filter and the default schedule.
    pub fn new() -> Self {
        Self {
            filter: None,
            schedule: BackoffSchedule::default(),
        }
    }

    /// Only retry failures for which `filter` returns `true`.
    pub fn with_filter<P>(mut self, filter: P) -> Self
    where
        P: Fn(&E) -> bool + Send + Sync + 'static,
    {
        self.filter = Some(Arc::new(filter));
        self
    }

    /// Use an already shared filter, or clear it with `None`.
    pub fn with_shared_filter(mut self, filter: Option<TransientFilter<E>>) -> Self {
        self.filter = filter;
        self
    }

    /// Wait according to `schedule`. An empty schedule means the default.
    pub fn with_schedule(mut self, schedule: impl Into<BackoffSchedule>) -> Self {
        self.schedule = schedule.into();
        self
    }

    /// The effective schedule.
    pub fn schedule(&self) -> &BackoffSchedule {
        &self.schedule
    }

    /// Whether a filter has been installed.
    pub fn has_filter(&self) -> bool {
        self.filter.is_some()
    }

    /// Whether `error` should be followed by another attempt.
    ///
    /// Without a filter every failure is transient.
    pub fn is_transient(&self, error: &E) -> bool {
        self.filter.as_ref().is_none_or(|filter| filter(error))
    }

    /// Run `operation` under the retry policy, waiting with `waiter`.
    ///
    /// This is the single retry loop; every other entry point delegates here.
    /// Attempts are strictly sequential: an attempt starts only after the
    /// previous one completed and its wait elapsed.
    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    pub async fn execute_with<W, F, Fut, T>(&self, waiter: &W, mut operation: F) -> Result<T, E>
    where
        W: Waiter + ?Sized,
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        for (attempt, delay) in self.schedule.iter().enumerate() {
            let err = match operation().await {
                Ok(value) => return Ok(value),
                Err(err) => err,
            };

            if !self.is_transient(&err) {
                #[cfg(feature = "tracing")]
                tracing::debug!(attempt = attempt + 1, "non-transient failure, giving up");
                return Err(err);
            }
            drop(err);

            #[cfg(feature = "tracing")]
            tracing::debug!(attempt = attempt + 1, ?delay, "transient failure, retrying");

            waiter.wait(delay).await;
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(
            attempt = self.schedule.max_attempts(),
            "schedule exhausted, final attempt"
        );

        operation().await
    }

    /// Run an immediate operation, blocking the calling thread between attempts.
    ///
    /// Use `T = ()` for operations that produce no value.
    pub fn run_sync<F, T>(&self, mut operation: F) -> Result<T, E>
    where
        F: FnMut() -> Result<T, E>,
    {
        futures::executor::block_on(
            self.execute_with(&BlockingWaiter, || std::future::ready(operation())),
        )
    }

    /// Run a suspending operation, yielding to the runtime between attempts.
    ///
    /// Use `T = ()` for operations that produce no value. Must be awaited
    /// inside a Tokio runtime.
    pub async fn run_async<F, Fut, T>(&self, operation: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        self.execute_with(&SuspendingWaiter, operation).await
    }

    /// Like [`run_sync`](Self::run_sync), for an operation that may be missing.
    ///
    /// A missing operation yields [`RetryError::InvalidArgument`] before any
    /// attempt or wait.
    pub fn try_run_sync<F, T>(&self, operation: Option<F>) -> Result<T, RetryError<E>>
    where
        F: FnMut() -> Result<T, E>,
    {
        let operation = operation.ok_or(RetryError::InvalidArgument("operation"))?;
        self.run_sync(operation).map_err(RetryError::Operation)
    }

    /// Like [`run_async`](Self::run_async), for an operation that may be missing.
    ///
    /// A missing operation yields [`RetryError::InvalidArgument`] before any
    /// attempt or wait.
    pub async fn try_run_async<F, Fut, T>(&self, operation: Option<F>) -> Result<T, RetryError<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let operation = operation.ok_or(RetryError::InvalidArgument("operation"))?;
        self.run_async(operation)
            .await
            .map_err(RetryError::Operation)
    }
}

impl<E> Default for RetryExecutor<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for RetryExecutor<E> {
    fn clone(&self) -> Self {
        Self {
            filter: self.filter.clone(),
            schedule: self.schedule.clone(),
        }
    }
}

impl<E> fmt::Debug for RetryExecutor<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryExecutor")
            .field("filter", &self.filter.as_ref().map(|_| "<filter>"))
            .field("schedule", &self.schedule)
            .finish()
    }
}

/// Retry an immediate operation.
///
/// `filter` and `schedule` are optional; see [`RetryExecutor`] for the policy.
///
/// # Examples
///
/// ```rust
/// use schemaclip_core::retry::{run_sync, BackoffSchedule};
///
/// let result: Result<u32, std::io::Error> =
///     run_sync(|| Ok(7), None, Some(BackoffSchedule::from_millis([10])));
/// assert_eq!(result.unwrap(), 7);
/// ```
pub fn run_sync<F, T, E>(
    operation: F,
    filter: Option<TransientFilter<E>>,
    schedule: Option<BackoffSchedule>,
) -> Result<T, E>
where
    F: FnMut() -> Result<T, E>,
{
    RetryExecutor::new()
        .with_shared_filter(filter)
        .with_schedule(BackoffSchedule::resolve(schedule))
        .run_sync(operation)
}

/// Retry a suspending operation.
///
/// `filter` and `schedule` are optional; see [`RetryExecutor`] for the policy.
///
/// # Examples
///
/// ```rust
/// use schemaclip_core::retry::run_async;
///
/// # async fn example() -> Result<(), std::io::Error> {
/// run_async(|| async { Ok::<_, std::io::Error>(()) }, None, None).await?;
/// # Ok(())
/// # }
/// ```
pub async fn run_async<F, Fut, T, E>(
    operation: F,
    filter: Option<TransientFilter<E>>,
    schedule: Option<BackoffSchedule>,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    RetryExecutor::new()
        .with_shared_filter(filter)
        .with_schedule(BackoffSchedule::resolve(schedule))
        .run_async(operation)
        .await
}
