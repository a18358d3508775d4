//! `setTimeout`-backed timer.

use crate::core::timer::Timer;
use async_trait::async_trait;
use gloo_timers::future::TimeoutFuture;
use std::time::Duration;

#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct BrowserTimer;

#[async_trait(?Send)]
impl Timer for BrowserTimer {
    async fn sleep(&self, duration: Duration) {
        let millis = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
        TimeoutFuture::new(millis).await;
    }
}
