use std::sync::Arc;

use tracing::info;

use crate::{
    application::services::observer::DeliveryObserver,
    domain::{
        errors::StorageError, events::DeliveryEvent, models::MessageId, repositories::QueueStore,
    },
};

/// Handles an out-of-band confirmation (e.g. a push) that a queued message
/// already reached its recipient, so the next drain must not resend it.
pub struct ConfirmDeliveryUseCase {
    repo: Arc<dyn QueueStore>,
    observer: Arc<dyn DeliveryObserver>,
}

impl ConfirmDeliveryUseCase {
    pub fn new(repo: Arc<dyn QueueStore>, observer: Arc<dyn DeliveryObserver>) -> Self {
        Self { repo, observer }
    }

    pub async fn execute(&self, message_id: MessageId) -> Result<bool, StorageError> {
        let removed = self.repo.remove(&message_id).await?;
        if removed {
            info!(%message_id, "delivery confirmed, message removed from queue");
            self.observer
                .on_event(&DeliveryEvent::Confirmed { message_id });
        }
        Ok(removed)
    }
}
