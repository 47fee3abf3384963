use std::sync::Arc;

use tokio::sync::Notify;

use crate::domain::events::DeliveryEvent;

/// Receives delivery lifecycle events, e.g. to refresh a pending badge.
pub trait DeliveryObserver: Send + Sync {
    fn on_event(&self, event: &DeliveryEvent);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl DeliveryObserver for NoopObserver {
    fn on_event(&self, _event: &DeliveryEvent) {}
}

/// Asks whoever drives the connectivity watcher for a drain at the next
/// opportunity. Requests made while a drain is already pending are merged.
#[derive(Debug, Default, Clone)]
pub struct DrainSignal {
    notify: Arc<Notify>,
}

impl DrainSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&self) {
        self.notify.notify_one();
    }

    pub async fn requested(&self) {
        self.notify.notified().await;
    }
}
