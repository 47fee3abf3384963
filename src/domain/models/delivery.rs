use serde::{Deserialize, Serialize};

use crate::domain::errors::EndpointError;

use super::network::Network;

/// One remote delivery channel. Order in the configured list is the fallback order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EndpointDescriptor {
    pub name: String,
    pub url: String,
}

impl EndpointDescriptor {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    /// Parses `name=url`, or a bare url which then doubles as the name.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        match value.split_once('=') {
            Some((name, url)) if !name.trim().is_empty() && !url.trim().is_empty() => {
                Some(Self::new(name.trim(), url.trim()))
            }
            Some(_) => None,
            None => Some(Self::new(value, value)),
        }
    }
}

/// Wire payload posted to every endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeliveryRequest {
    pub to: String,
    pub message: String,
    pub network: Network,
    /// Unix epoch milliseconds.
    pub timestamp: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeliveryReceipt {
    pub endpoint: String,
    pub message: Option<String>,
    pub provider_message_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct EndpointFailure {
    pub endpoint: String,
    pub error: EndpointError,
}

#[derive(Debug, Clone)]
pub enum DeliveryResult {
    Delivered(DeliveryReceipt),
    Exhausted { failures: Vec<EndpointFailure> },
}

impl DeliveryResult {
    pub fn is_success(&self) -> bool {
        matches!(self, DeliveryResult::Delivered(_))
    }

    pub fn endpoint_used(&self) -> Option<&str> {
        match self {
            DeliveryResult::Delivered(receipt) => Some(receipt.endpoint.as_str()),
            DeliveryResult::Exhausted { .. } => None,
        }
    }
}
