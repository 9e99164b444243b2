//! Example: retrying a flaky clipboard write
//!
//! This example demonstrates:
//! 1. Immediate retry with the default 500/400/200ms schedule
//! 2. A transient-failure filter that fails fast on permission errors
//! 3. Suspending retry with a schedule generated by `ExponentialBackoff`
//! 4. Loading the schedule from configuration
//!
//! Run with:
//! ```bash
//! cargo run -p schemaclip-core --example clipboard_retry
//! ```

use schemaclip_core::prelude::*;
use std::error::Error;
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{Duration, Instant};

/// A simulated clipboard that is locked by another process for a while
struct LockedClipboard {
    attempts: AtomicU32,
    locked_for: u32,
}

impl LockedClipboard {
    fn new(locked_for: u32) -> Self {
        Self {
            attempts: AtomicU32::new(0),
            locked_for,
        }
    }

    fn set_text(&self, text: &str) -> io::Result<()> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;

        if attempt <= self.locked_for {
            println!("  Attempt {}: clipboard locked", attempt);
            Err(io::Error::new(
                io::ErrorKind::ResourceBusy,
                "clipboard is held by another process",
            ))
        } else {
            println!("  Attempt {}: copied {} bytes", attempt, text.len());
            Ok(())
        }
    }

    fn total_attempts(&self) -> u32 {
        self.attempts.load(Ordering::SeqCst)
    }
}

const GENERATED: &str = "public class Person { public string Name { get; set; } }";

/// Example 1: Default schedule, no filter
fn example_default_schedule() -> Result<(), Box<dyn Error>> {
    println!("\n=== Example 1: Default Schedule ===\n");

    let clipboard = LockedClipboard::new(2);
    let start = Instant::now();

    run_sync(|| clipboard.set_text(GENERATED), None, None)?;

    println!("\nTotal attempts: {}", clipboard.total_attempts());
    println!("Total time: {:?}", start.elapsed());
    println!("Expected delays: 500ms + 400ms = ~900ms");

    Ok(())
}

/// Example 2: Fail fast on errors that will not go away
fn example_filter() -> Result<(), Box<dyn Error>> {
    println!("\n=== Example 2: Transient Filter ===\n");

    let executor = RetryExecutor::new()
        .with_schedule(BackoffSchedule::from_millis([50, 50, 50]))
        .with_filter(|err: &io::Error| err.kind() != io::ErrorKind::PermissionDenied);

    let attempts = AtomicU32::new(0);
    let result: io::Result<()> = executor.run_sync(|| {
        attempts.fetch_add(1, Ordering::SeqCst);
        Err(io::Error::new(
            io::ErrorKind::PermissionDenied,
            "clipboard access denied",
        ))
    });

    println!("Result: {:?}", result.map_err(|e| e.to_string()));
    println!("Total attempts: {} (no retries)", attempts.load(Ordering::SeqCst));

    Ok(())
}

/// Example 3: Async operation with a generated schedule
async fn example_async_exponential() -> Result<(), Box<dyn Error>> {
    println!("\n=== Example 3: Async With Exponential Schedule ===\n");

    let schedule = ExponentialBackoff::builder()
        .max_retries(4)
        .initial_delay(Duration::from_millis(25))
        .jitter(0.2)
        .build()?
        .to_schedule();
    println!("Generated schedule: {:?}", schedule.delays());

    let clipboard = Arc::new(LockedClipboard::new(3));
    let start = Instant::now();

    let executor = RetryExecutor::new().with_schedule(schedule);
    executor
        .run_async(|| {
            let clipboard = Arc::clone(&clipboard);
            async move { clipboard.set_text(GENERATED) }
        })
        .await?;

    println!("\nTotal attempts: {}", clipboard.total_attempts());
    println!("Total time: {:?}", start.elapsed());

    Ok(())
}

/// Example 4: Schedule from configuration
fn example_config() -> Result<(), Box<dyn Error>> {
    println!("\n=== Example 4: Schedule From Config ===\n");

    let config = RetryConfig::from_toml_str("schedule_ms = [20, 10]")?;
    let clipboard = LockedClipboard::new(5);

    let result = config
        .executor::<io::Error>()
        .run_sync(|| clipboard.set_text(GENERATED));

    println!("\nResult: {:?}", result.map_err(|e| e.to_string()));
    println!(
        "Total attempts: {} (schedule allows {})",
        clipboard.total_attempts(),
        config.schedule().max_attempts()
    );

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    println!("==============================================");
    println!("   schemaclip Core: Retry Executor Examples");
    println!("==============================================");

    example_default_schedule()?;
    example_filter()?;
    example_async_exponential().await?;
    example_config()?;

    println!("\n==============================================");
    println!("   All examples completed successfully!");
    println!("==============================================\n");

    Ok(())
}
