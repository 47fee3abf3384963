use crate::domain::errors::{StorageError, ValidationError};

use super::message::MessageId;

/// What the user is told after pressing send.
#[derive(Debug)]
pub enum Outcome {
    /// Accepted by an endpoint right away.
    Delivered {
        message_id: MessageId,
        endpoint: String,
    },
    /// Every endpoint failed; the message is durably queued for a later drain.
    Queued { message_id: MessageId },
    /// Input failed validation; nothing was sent or stored.
    Rejected(ValidationError),
    /// Delivery failed and the message could not be queued either.
    Failed(StorageError),
}

impl Outcome {
    /// Delivered and queued are both reported to the user as success.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Outcome::Delivered { .. } | Outcome::Queued { .. })
    }

    pub fn message_id(&self) -> Option<MessageId> {
        match self {
            Outcome::Delivered { message_id, .. } | Outcome::Queued { message_id } => {
                Some(*message_id)
            }
            Outcome::Rejected(_) | Outcome::Failed(_) => None,
        }
    }
}
