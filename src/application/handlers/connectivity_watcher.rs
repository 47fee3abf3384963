use std::sync::Arc;
use std::time::Duration;

use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{Instant, MissedTickBehavior},
};
use tracing::{debug, error, info};

use crate::{
    application::{
        handlers::delivery_orchestrator::DeliveryOrchestrator, services::observer::DrainSignal,
    },
    domain::models::Connectivity,
};

pub const DEFAULT_WAKE_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

/// Drains the queue on start when already online, when the host comes back
/// online, on a periodic wake, and whenever a freshly queued message asks for
/// it while online.
pub struct ConnectivityWatcher {
    orchestrator: Arc<DeliveryOrchestrator>,
    connectivity: watch::Receiver<Connectivity>,
    signal: DrainSignal,
    wake_interval: Duration,
}

impl ConnectivityWatcher {
    pub fn new(
        orchestrator: Arc<DeliveryOrchestrator>,
        connectivity: watch::Receiver<Connectivity>,
    ) -> Self {
        let signal = orchestrator.drain_signal();
        Self {
            orchestrator,
            connectivity,
            signal,
            wake_interval: DEFAULT_WAKE_INTERVAL,
        }
    }

    pub fn with_wake_interval(mut self, wake_interval: Duration) -> Self {
        self.wake_interval = wake_interval;
        self
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            self.run().await;
            debug!("connectivity watcher stopped");
        })
    }

    /// Runs until the connectivity sender is dropped.
    pub async fn run(self) {
        let ConnectivityWatcher {
            orchestrator,
            mut connectivity,
            signal,
            wake_interval,
        } = self;

        let mut online = connectivity.borrow_and_update().is_online();
        let mut wake = tokio::time::interval_at(Instant::now() + wake_interval, wake_interval);
        wake.set_missed_tick_behavior(MissedTickBehavior::Delay);

        // Messages persisted by an earlier run go out as soon as we know we are online.
        if online {
            drain(&orchestrator, "startup").await;
        }

        loop {
            let trigger: &'static str = tokio::select! {
                changed = connectivity.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let now_online = connectivity.borrow_and_update().is_online();
                    let came_online = now_online && !online;
                    online = now_online;
                    debug!(online, "connectivity changed");
                    if !came_online {
                        continue;
                    }
                    "online"
                }
                _ = wake.tick() => {
                    if !online {
                        continue;
                    }
                    "periodic"
                }
                _ = signal.requested() => {
                    // Offline requests are covered by the next online transition.
                    if !online {
                        continue;
                    }
                    "queued"
                }
            };

            drain(&orchestrator, trigger).await;
        }
    }
}

async fn drain(orchestrator: &DeliveryOrchestrator, trigger: &'static str) {
    match orchestrator.drain_queue().await {
        Ok(report) => info!(
            trigger,
            delivered = report.delivered,
            still_queued = report.still_queued,
            discarded = report.discarded,
            coalesced = report.coalesced,
            "drain finished"
        ),
        Err(err) => error!(trigger, error = %err, "drain failed"),
    }
}
