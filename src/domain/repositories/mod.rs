use async_trait::async_trait;

use crate::domain::{
    errors::StorageError,
    models::{Message, MessageId},
};

/// Durable store for messages that could not be delivered immediately.
///
/// Every mutation is scoped to a single record so concurrent retries of
/// different messages never touch each other's state.
#[async_trait]
pub trait QueueStore: Send + Sync {
    async fn enqueue(&self, message: &Message) -> Result<(), StorageError>;

    /// All queued messages. Implementations here return them ordered by id.
    async fn list_all(&self) -> Result<Vec<Message>, StorageError>;

    /// Removes a record. Removing an unknown id is not an error; the return
    /// value says whether a record was actually deleted.
    async fn remove(&self, id: &MessageId) -> Result<bool, StorageError>;

    /// Bumps the attempts counter by one and returns the new value, or `None`
    /// when the record no longer exists.
    async fn increment_attempts(&self, id: &MessageId) -> Result<Option<u32>, StorageError>;
}
