use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::models::{DeliveryReceipt, MessageId, Network};

/// Lifecycle notifications handed to a `DeliveryObserver`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum DeliveryEvent {
    Delivered {
        message_id: MessageId,
        network: Network,
        attempts: u32,
        receipt: DeliveryReceipt,
    },
    Queued {
        message_id: MessageId,
        network: Network,
        queued_at: DateTime<Utc>,
    },
    RetryFailed {
        message_id: MessageId,
        attempts: u32,
    },
    Discarded {
        message_id: MessageId,
        attempts: u32,
    },
    Confirmed {
        message_id: MessageId,
    },
}

impl DeliveryEvent {
    pub fn message_id(&self) -> MessageId {
        match self {
            DeliveryEvent::Delivered { message_id, .. }
            | DeliveryEvent::Queued { message_id, .. }
            | DeliveryEvent::RetryFailed { message_id, .. }
            | DeliveryEvent::Discarded { message_id, .. }
            | DeliveryEvent::Confirmed { message_id } => *message_id,
        }
    }
}
