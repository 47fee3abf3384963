use std::collections::{BTreeMap, btree_map::Entry};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{
    errors::StorageError,
    models::{Message, MessageId},
    repositories::QueueStore,
};

/// Non-durable queue for tests and hosts without a writable disk.
#[derive(Default, Clone)]
pub struct InMemoryQueueStore {
    messages: Arc<RwLock<BTreeMap<MessageId, Message>>>,
}

impl InMemoryQueueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, id: &MessageId) -> Option<Message> {
        self.messages.read().await.get(id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.messages.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.messages.read().await.is_empty()
    }
}

#[async_trait]
impl QueueStore for InMemoryQueueStore {
    async fn enqueue(&self, message: &Message) -> Result<(), StorageError> {
        let mut messages = self.messages.write().await;
        match messages.entry(message.id) {
            Entry::Occupied(_) => Err(StorageError::Corrupt(format!(
                "duplicate message id {}",
                message.id
            ))),
            Entry::Vacant(slot) => {
                slot.insert(message.clone());
                Ok(())
            }
        }
    }

    async fn list_all(&self) -> Result<Vec<Message>, StorageError> {
        let messages = self.messages.read().await;
        Ok(messages.values().cloned().collect())
    }

    async fn remove(&self, id: &MessageId) -> Result<bool, StorageError> {
        let mut messages = self.messages.write().await;
        Ok(messages.remove(id).is_some())
    }

    async fn increment_attempts(&self, id: &MessageId) -> Result<Option<u32>, StorageError> {
        let mut messages = self.messages.write().await;
        Ok(messages.get_mut(id).map(|message| {
            message.attempts += 1;
            message.attempts
        }))
    }
}
