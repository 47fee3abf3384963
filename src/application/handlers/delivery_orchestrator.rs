use std::sync::Arc;

use crate::{
    application::{
        services::{
            observer::{DeliveryObserver, DrainSignal, NoopObserver},
            retry_policy::{RetryIndefinitely, RetryPolicy},
            transport::Transport,
        },
        usecases::{
            confirm_delivery::ConfirmDeliveryUseCase,
            drain_queue::{DrainQueueConfig, DrainQueueUseCase, DrainReport},
            list_queued::ListQueuedUseCase,
            send_message::{SendMessageRequest, SendMessageUseCase},
        },
    },
    domain::{
        errors::StorageError,
        models::{Message, MessageId, Network, Outcome},
        repositories::QueueStore,
        validation::Validator,
    },
};

/// Entry point for the host: submits messages and drains the offline queue.
pub struct DeliveryOrchestrator {
    send_usecase: SendMessageUseCase,
    drain_usecase: DrainQueueUseCase,
    list_usecase: ListQueuedUseCase,
    confirm_usecase: ConfirmDeliveryUseCase,
    drain_signal: DrainSignal,
}

impl DeliveryOrchestrator {
    pub fn builder(transport: Transport, queue: Arc<dyn QueueStore>) -> DeliveryOrchestratorBuilder {
        DeliveryOrchestratorBuilder {
            transport,
            queue,
            validator: Validator::default(),
            policy: Arc::new(RetryIndefinitely),
            observer: Arc::new(NoopObserver),
            drain_config: DrainQueueConfig::default(),
            drain_signal: DrainSignal::new(),
        }
    }

    pub async fn send(&self, recipient: &str, body: &str, network: Network) -> Outcome {
        self.send_usecase
            .execute(SendMessageRequest {
                recipient: recipient.to_string(),
                body: body.to_string(),
                network,
            })
            .await
    }

    pub async fn drain_queue(&self) -> Result<DrainReport, StorageError> {
        self.drain_usecase.execute().await
    }

    pub async fn queued_messages(&self) -> Result<Vec<Message>, StorageError> {
        self.list_usecase.execute().await
    }

    pub async fn confirm_delivery(&self, message_id: MessageId) -> Result<bool, StorageError> {
        self.confirm_usecase.execute(message_id).await
    }

    /// Fires whenever a message gets queued; see `ConnectivityWatcher`.
    pub fn drain_signal(&self) -> DrainSignal {
        self.drain_signal.clone()
    }
}

pub struct DeliveryOrchestratorBuilder {
    transport: Transport,
    queue: Arc<dyn QueueStore>,
    validator: Validator,
    policy: Arc<dyn RetryPolicy>,
    observer: Arc<dyn DeliveryObserver>,
    drain_config: DrainQueueConfig,
    drain_signal: DrainSignal,
}

impl DeliveryOrchestratorBuilder {
    pub fn validator(mut self, validator: Validator) -> Self {
        self.validator = validator;
        self
    }

    pub fn retry_policy(mut self, policy: Arc<dyn RetryPolicy>) -> Self {
        self.policy = policy;
        self
    }

    pub fn observer(mut self, observer: Arc<dyn DeliveryObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn drain_config(mut self, config: DrainQueueConfig) -> Self {
        self.drain_config = config;
        self
    }

    pub fn drain_signal(mut self, signal: DrainSignal) -> Self {
        self.drain_signal = signal;
        self
    }

    pub fn build(self) -> DeliveryOrchestrator {
        DeliveryOrchestrator {
            send_usecase: SendMessageUseCase::new(
                self.validator,
                self.transport.clone(),
                self.queue.clone(),
                self.observer.clone(),
                self.drain_signal.clone(),
            ),
            drain_usecase: DrainQueueUseCase::new(
                self.transport,
                self.queue.clone(),
                self.policy,
                self.observer.clone(),
                self.drain_config,
            ),
            list_usecase: ListQueuedUseCase::new(self.queue.clone()),
            confirm_usecase: ConfirmDeliveryUseCase::new(self.queue, self.observer),
            drain_signal: self.drain_signal,
        }
    }
}
