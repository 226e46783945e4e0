// ── Status coordinator ──
//
// Owns the client for one device and the latest status snapshot. The
// snapshot is swapped atomically (`arc-swap`), so readers are wait-free and
// always see either the previous complete snapshot or the new one.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use arc_swap::ArcSwapOption;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use purifly_api::AirClient;

use crate::error::CoreError;
use crate::status::StatusSnapshot;

/// Consecutive refresh failures before the device is reported unavailable.
const UNAVAILABLE_AFTER_FAILURES: u32 = 3;

/// Holds the most recently observed status for one device and refreshes it.
///
/// Refresh policy: the first refresh is awaited by setup and propagates
/// errors. Steady-state refreshes run on a fixed interval; on failure the
/// stale snapshot keeps being served (the next tick is the retry), each
/// failure is logged, and after [`UNAVAILABLE_AFTER_FAILURES`] consecutive
/// failures the availability channel flips to `false` until a refresh
/// succeeds again.
pub struct Coordinator {
    client: Arc<dyn AirClient>,
    status: ArcSwapOption<StatusSnapshot>,
    refresh_timeout: Duration,
    available: watch::Sender<bool>,
    consecutive_failures: AtomicU32,
}

impl Coordinator {
    pub fn new(client: Arc<dyn AirClient>, refresh_timeout: Duration) -> Self {
        let (available, _) = watch::channel(true);
        Self {
            client,
            status: ArcSwapOption::empty(),
            refresh_timeout,
            available,
            consecutive_failures: AtomicU32::new(0),
        }
    }

    /// The client this coordinator polls. Entity code uses it to forward
    /// control writes.
    pub fn client(&self) -> &Arc<dyn AirClient> {
        &self.client
    }

    /// Query the device and replace the stored snapshot.
    ///
    /// Bounded by the configured refresh timeout. On success the new
    /// snapshot is published atomically and the device is marked available.
    pub async fn refresh(&self) -> Result<Arc<StatusSnapshot>, CoreError> {
        let values = tokio::time::timeout(self.refresh_timeout, self.client.status())
            .await
            .map_err(|_| CoreError::Timeout {
                operation: "status refresh",
                timeout: self.refresh_timeout,
            })??;

        let snapshot = Arc::new(StatusSnapshot::new(values));
        self.status.store(Some(Arc::clone(&snapshot)));

        self.consecutive_failures.store(0, Ordering::Relaxed);
        let _ = self.available.send_replace(true);

        debug!(host = self.client.host(), fields = snapshot.values().len(), "status refreshed");
        Ok(snapshot)
    }

    /// The most recently completed refresh's snapshot, or `None` if no
    /// refresh has succeeded yet. Never blocks.
    pub fn status(&self) -> Option<Arc<StatusSnapshot>> {
        self.status.load_full()
    }

    /// Whether the device is currently considered reachable.
    pub fn is_available(&self) -> bool {
        *self.available.borrow()
    }

    /// Subscribe to availability changes.
    pub fn subscribe_available(&self) -> watch::Receiver<bool> {
        self.available.subscribe()
    }

    /// One steady-state poll tick: refresh, and on failure account for it
    /// instead of propagating.
    pub(crate) async fn poll_once(&self) {
        if let Err(error) = self.refresh().await {
            let failures = self.consecutive_failures.fetch_add(1, Ordering::Relaxed) + 1;
            warn!(
                host = self.client.host(),
                %error,
                failures,
                "status refresh failed; serving stale snapshot"
            );
            if failures >= UNAVAILABLE_AFTER_FAILURES {
                let _ = self.available.send_replace(false);
            }
        }
    }

    /// Periodic refresh loop. Runs until `cancel` fires.
    ///
    /// The first interval tick completes immediately and is consumed up
    /// front — setup already performed the first refresh.
    pub(crate) async fn poll_task(self: Arc<Self>, interval: Duration, cancel: CancellationToken) {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker.tick().await;

        debug!(host = self.client.host(), interval_secs = interval.as_secs(), "poll task started");
        loop {
            tokio::select! {
                biased;
                () = cancel.cancelled() => break,
                _ = ticker.tick() => self.poll_once().await,
            }
        }
        debug!(host = self.client.host(), "poll task stopped");
    }
}
