//! Rate-limited dispatch for all outbound platform calls.
//!
//! Every upstream call in the process, directory resolution included, goes
//! through one dispatcher so the platform sees a single bounded client no
//! matter which account or resource family initiated the call. The cap is
//! two-fold: at most `max_in_flight` calls concurrently, and consecutive
//! admissions spaced by at least `min_interval`. Queued callers are admitted
//! in FIFO order. The dispatcher enforces no timeouts and never interprets
//! response statuses; both are caller concerns.

use crate::metrics_defs::{DISPATCH_INFLIGHT, DISPATCH_WAIT_SECONDS};
use crate::{gauge, histogram};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{AcquireError, Mutex, Semaphore};
use tokio::time::Instant;

#[derive(thiserror::Error, Debug)]
pub enum DispatchError {
    #[error("dispatch queue closed")]
    QueueClosed(#[from] AcquireError),

    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

struct DispatcherInner {
    client: reqwest::Client,
    slots: Semaphore,
    // Admission time of the most recent dispatch; guards the spacing interval.
    pacer: Mutex<Option<Instant>>,
    min_interval: Duration,
}

#[derive(Clone)]
pub struct RateLimitedDispatcher {
    inner: Arc<DispatcherInner>,
}

impl RateLimitedDispatcher {
    pub fn new(max_in_flight: usize, min_interval: Duration) -> Self {
        RateLimitedDispatcher {
            inner: Arc::new(DispatcherInner {
                client: reqwest::Client::new(),
                slots: Semaphore::new(max_in_flight),
                pacer: Mutex::new(None),
                min_interval,
            }),
        }
    }

    /// The client requests must be built with.
    pub fn client(&self) -> &reqwest::Client {
        &self.inner.client
    }

    /// Waits for a free slot and for the spacing interval, then executes the
    /// request. Transport errors are surfaced unchanged.
    pub async fn dispatch(&self, request: reqwest::Request) -> Result<reqwest::Response, DispatchError> {
        let queued_at = Instant::now();
        let _permit = self.inner.slots.acquire().await?;
        self.pace().await;
        histogram!(DISPATCH_WAIT_SECONDS).record(queued_at.elapsed().as_secs_f64());

        gauge!(DISPATCH_INFLIGHT).increment(1.0);
        let result = self.inner.client.execute(request).await;
        gauge!(DISPATCH_INFLIGHT).decrement(1.0);

        Ok(result?)
    }

    async fn pace(&self) {
        if self.inner.min_interval.is_zero() {
            return;
        }
        let mut last = self.inner.pacer.lock().await;
        if let Some(previous) = *last {
            let next = previous + self.inner.min_interval;
            if next > Instant::now() {
                tokio::time::sleep_until(next).await;
            }
        }
        *last = Some(Instant::now());
    }
}
