//! Retry-with-backoff execution.
//!
//! This module provides one retry algorithm for any zero-argument operation,
//! immediate or suspending, with or without a return value.
//!
//! # Key Types
//!
//! - [`RetryExecutor`] - Runs an operation under a filter and a schedule
//! - [`BackoffSchedule`] - Ordered waits between attempts
//! - [`Waiter`] - How a wait is performed (blocking or suspending)
//! - [`ExponentialBackoff`] - Generates a schedule from exponential parameters
//!
//! # Examples
//!
//! ```rust
//! use schemaclip_core::retry::{BackoffSchedule, RetryExecutor};
//!
//! # async fn example() -> Result<(), std::io::Error> {
//! let executor = RetryExecutor::new().with_schedule(BackoffSchedule::from_millis([100, 50]));
//!
//! let text = executor.run_async(|| async {
//!     // Your operation here
//!     Ok::<_, std::io::Error>("generated code".to_string())
//! }).await?;
//! # Ok(())
//! # }
//! ```

mod executor;
mod exponential;
mod schedule;
mod waiter;

pub use executor::{RetryExecutor, TransientFilter, run_async, run_sync};
pub use exponential::{ExponentialBackoff, ExponentialBackoffBuilder};
pub use schedule::{BackoffSchedule, DEFAULT_SCHEDULE};
pub use waiter::{BlockingWaiter, SuspendingWaiter, Waiter};
