//! How the executor waits between attempts.

use async_trait::async_trait;
use std::time::Duration;

/// The capability used to wait out a backoff delay.
///
/// The retry loop is written once against this trait. Which implementation
/// is injected decides whether waiting parks the calling thread or only
/// suspends the current task.
///
/// # Examples
///
/// A waiter that records delays instead of sleeping, useful in tests:
///
/// ```rust
/// use schemaclip_core::retry::Waiter;
/// use std::sync::Mutex;
/// use std::time::Duration;
///
/// #[derive(Default)]
/// struct Recorder(Mutex<Vec<Duration>>);
///
/// #[async_trait::async_trait]
/// impl Waiter for Recorder {
///     async fn wait(&self, delay: Duration) {
///         self.0.lock().unwrap().push(delay);
///     }
/// }
/// ```
#[async_trait]
pub trait Waiter: Send + Sync {
    /// Wait for `delay` before the next attempt.
    async fn wait(&self, delay: Duration);
}

/// Parks the calling thread for the whole delay.
///
/// Used for immediate operations; the caller cannot do other work while
/// the wait elapses.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockingWaiter;

#[async_trait]
impl Waiter for BlockingWaiter {
    async fn wait(&self, delay: Duration) {
        std::thread::sleep(delay);
    }
}

/// Suspends the current task using `tokio::time::sleep`.
///
/// Other tasks on the same runtime keep running while the wait elapses.
/// Must be polled from within a Tokio runtime.
#[derive(Debug, Clone, Copy, Default)]
pub struct SuspendingWaiter;

#[async_trait]
impl Waiter for SuspendingWaiter {
    async fn wait(&self, delay: Duration) {
        tokio::time::sleep(delay).await;
    }
}

#[async_trait]
impl<W: Waiter + ?Sized> Waiter for std::sync::Arc<W> {
    async fn wait(&self, delay: Duration) {
        (**self).wait(delay).await;
    }
}
