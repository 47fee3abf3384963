use std::sync::Arc;

use crate::domain::{errors::StorageError, models::Message, repositories::QueueStore};

pub struct ListQueuedUseCase {
    repo: Arc<dyn QueueStore>,
}

impl ListQueuedUseCase {
    pub fn new(repo: Arc<dyn QueueStore>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self) -> Result<Vec<Message>, StorageError> {
        let mut messages = self.repo.list_all().await?;
        messages.sort_by_key(|message| message.id);
        Ok(messages)
    }
}
