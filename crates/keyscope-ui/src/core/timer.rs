//! Timer port for UX delays.

use async_trait::async_trait;
use std::time::Duration;

/// Suspends the current task without blocking the event loop.
#[async_trait(?Send)]
pub trait Timer {
    /// Resolve after `duration`.
    async fn sleep(&self, duration: Duration);
}
