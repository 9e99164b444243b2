#![deny(unsafe_code)]
#![warn(missing_docs)]

//! Core building blocks for the schemaclip desktop tool.
//!
//! schemaclip turns a JSON Schema into source code and copies the result to
//! the clipboard. Writing to the clipboard can fail while another process
//! holds it, so the application wraps that write in a retry. This crate
//! provides that retry machinery in a form usable for any operation:
//!
//! - **One retry algorithm** via [`RetryExecutor`](retry::RetryExecutor)
//!   - Immediate (blocking) and suspending (async) operations
//!   - Optional transient-failure filter
//!   - Ordered backoff schedule, default 500/400/200ms
//! - **Injected waiting** via the [`Waiter`](retry::Waiter) trait
//! - **Generated schedules** via [`ExponentialBackoff`](retry::ExponentialBackoff)
//! - **File and environment configuration** via [`RetryConfig`](config::RetryConfig)
//!
//! # Examples
//!
//! Using the prelude for convenient imports:
//!
//! ```rust
//! use schemaclip_core::prelude::*;
//!
//! # fn write_clipboard(_: &str) -> std::io::Result<()> { Ok(()) }
//! # fn example() -> std::io::Result<()> {
//! let code = "pub struct Person { name: String }";
//!
//! // No filter, default schedule: the way the application copies its output.
//! run_sync(|| write_clipboard(code), None, None)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! - `tracing`: emit `debug!`/`trace!` events for retries and fail-fast decisions.

pub mod config;
pub mod error;
pub mod retry;

/// Convenient re-exports of commonly used items.
///
/// Import all core abstractions with:
///
/// ```rust
/// use schemaclip_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::RetryConfig;
    pub use crate::error::{ConfigError, RetryError};
    pub use crate::retry::{
        BackoffSchedule, ExponentialBackoff, RetryExecutor, TransientFilter, Waiter, run_async,
        run_sync,
    };
}
