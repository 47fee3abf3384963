use std::sync::Arc;

use tracing::{debug, error, info};

use crate::{
    application::services::{
        observer::{DeliveryObserver, DrainSignal},
        transport::Transport,
    },
    domain::{
        events::DeliveryEvent,
        models::{DeliveryResult, Message, Network, Outcome},
        repositories::QueueStore,
        validation::Validator,
    },
};

pub struct SendMessageUseCase {
    validator: Validator,
    transport: Transport,
    queue: Arc<dyn QueueStore>,
    observer: Arc<dyn DeliveryObserver>,
    drain_signal: DrainSignal,
}

pub struct SendMessageRequest {
    pub recipient: String,
    pub body: String,
    pub network: Network,
}

impl SendMessageUseCase {
    pub fn new(
        validator: Validator,
        transport: Transport,
        queue: Arc<dyn QueueStore>,
        observer: Arc<dyn DeliveryObserver>,
        drain_signal: DrainSignal,
    ) -> Self {
        Self {
            validator,
            transport,
            queue,
            observer,
            drain_signal,
        }
    }

    pub async fn execute(&self, request: SendMessageRequest) -> Outcome {
        if let Err(reason) = self
            .validator
            .validate(&request.recipient, &request.body, request.network)
        {
            debug!(network = %request.network, %reason, "message rejected");
            return Outcome::Rejected(reason);
        }

        let message = Message::new(request.recipient, request.body, request.network);

        match self.transport.attempt_delivery(&message).await {
            DeliveryResult::Delivered(receipt) => {
                let endpoint = receipt.endpoint.clone();
                self.observer.on_event(&DeliveryEvent::Delivered {
                    message_id: message.id,
                    network: message.network,
                    attempts: message.attempts,
                    receipt,
                });
                Outcome::Delivered {
                    message_id: message.id,
                    endpoint,
                }
            }
            DeliveryResult::Exhausted { failures } => {
                info!(
                    message_id = %message.id,
                    failed_endpoints = failures.len(),
                    "all endpoints failed, queueing message"
                );
                self.queue_for_later(message).await
            }
        }
    }

    async fn queue_for_later(&self, message: Message) -> Outcome {
        if let Err(err) = self.queue.enqueue(&message).await {
            error!(message_id = %message.id, error = %err, "failed to queue message");
            return Outcome::Failed(err);
        }

        self.observer.on_event(&DeliveryEvent::Queued {
            message_id: message.id,
            network: message.network,
            queued_at: message.created_at,
        });
        self.drain_signal.request();

        Outcome::Queued {
            message_id: message.id,
        }
    }
}
