//! Sleep capability
//!
//! The poll loop waits through this trait so tests can run without real delays.

use async_trait::async_trait;
use std::time::Duration;

/// Service trait for waiting between polls
#[async_trait]
pub trait Sleeper: Send + Sync {
    /// Suspends the caller for `duration`
    async fn sleep(&self, duration: Duration);
}

/// Sleeper backed by the tokio timer
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
