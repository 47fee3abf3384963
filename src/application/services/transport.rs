use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info, warn};

use crate::domain::{
    errors::EndpointError,
    models::{
        DeliveryReceipt, DeliveryRequest, DeliveryResult, EndpointDescriptor, EndpointFailure,
        Message,
    },
    validation::normalize_number,
};

pub const DEFAULT_ATTEMPT_TIMEOUT: Duration = Duration::from_secs(10);

/// Speaks the wire protocol of a single endpoint.
#[async_trait]
pub trait DeliveryClient: Send + Sync {
    async fn deliver(
        &self,
        endpoint: &EndpointDescriptor,
        request: &DeliveryRequest,
    ) -> Result<DeliveryReceipt, EndpointError>;
}

/// Ordered, first-success-wins fallback across the configured endpoints.
#[derive(Clone)]
pub struct Transport {
    client: Arc<dyn DeliveryClient>,
    endpoints: Vec<EndpointDescriptor>,
    attempt_timeout: Duration,
}

impl Transport {
    pub fn new(client: Arc<dyn DeliveryClient>, endpoints: Vec<EndpointDescriptor>) -> Self {
        Self {
            client,
            endpoints,
            attempt_timeout: DEFAULT_ATTEMPT_TIMEOUT,
        }
    }

    pub fn with_attempt_timeout(mut self, attempt_timeout: Duration) -> Self {
        self.attempt_timeout = attempt_timeout;
        self
    }

    pub fn endpoints(&self) -> &[EndpointDescriptor] {
        &self.endpoints
    }

    pub async fn attempt_delivery(&self, message: &Message) -> DeliveryResult {
        self.attempt_delivery_via(message, &self.endpoints).await
    }

    pub async fn attempt_delivery_via(
        &self,
        message: &Message,
        endpoints: &[EndpointDescriptor],
    ) -> DeliveryResult {
        let request = DeliveryRequest {
            to: normalize_number(&message.recipient),
            message: message.body.clone(),
            network: message.network,
            timestamp: Utc::now().timestamp_millis(),
        };

        let mut failures = Vec::with_capacity(endpoints.len());
        for endpoint in endpoints {
            debug!(message_id = %message.id, endpoint = %endpoint.name, "attempting delivery");
            let attempt = tokio::time::timeout(
                self.attempt_timeout,
                self.client.deliver(endpoint, &request),
            )
            .await
            .unwrap_or(Err(EndpointError::Timeout(self.attempt_timeout)));

            match attempt {
                Ok(receipt) => {
                    info!(
                        message_id = %message.id,
                        endpoint = %endpoint.name,
                        network = %message.network,
                        "message accepted"
                    );
                    return DeliveryResult::Delivered(receipt);
                }
                Err(error) => {
                    warn!(
                        message_id = %message.id,
                        endpoint = %endpoint.name,
                        error = %error,
                        "endpoint failed"
                    );
                    failures.push(EndpointFailure {
                        endpoint: endpoint.name.clone(),
                        error,
                    });
                }
            }
        }

        DeliveryResult::Exhausted { failures }
    }
}
