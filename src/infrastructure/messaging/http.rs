use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    application::services::transport::DeliveryClient,
    domain::{
        errors::EndpointError,
        models::{DeliveryReceipt, DeliveryRequest, EndpointDescriptor},
    },
};

pub const DEFAULT_USER_AGENT: &str = concat!("sms-outbox/", env!("CARGO_PKG_VERSION"));
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Credentials and identity sent with every delivery request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_key: String,
    pub user_agent: String,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            user_agent: user_agent.into(),
        }
    }

    pub fn from_fingerprint(fingerprint: &str, user_agent: impl Into<String>) -> Self {
        Self::new(derive_api_key(fingerprint), user_agent)
    }
}

/// 32-bit rolling hash (`h * 31 + unit`) over UTF-16 code units, rendered as
/// lowercase hex of its absolute value.
pub fn derive_api_key(fingerprint: &str) -> String {
    let hash = fingerprint.encode_utf16().fold(0_i32, |hash, unit| {
        hash.wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit))
    });
    format!("{:x}", i64::from(hash).abs())
}

pub struct HttpDeliveryClient {
    http: Client,
    config: ClientConfig,
}

impl HttpDeliveryClient {
    pub fn new(config: ClientConfig) -> Result<Arc<dyn DeliveryClient>, reqwest::Error> {
        let http = Client::builder()
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Arc::new(Self { http, config }) as Arc<dyn DeliveryClient>)
    }
}

#[async_trait]
impl DeliveryClient for HttpDeliveryClient {
    async fn deliver(
        &self,
        endpoint: &EndpointDescriptor,
        request: &DeliveryRequest,
    ) -> Result<DeliveryReceipt, EndpointError> {
        let response = self
            .http
            .post(&endpoint.url)
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(EndpointError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("unknown").to_string(),
            });
        }

        let payload: EndpointResponse = response.json().await?;
        if !payload.success {
            return Err(EndpointError::Rejected(
                payload
                    .message
                    .unwrap_or_else(|| "success flag not set".to_string()),
            ));
        }

        Ok(DeliveryReceipt {
            endpoint: endpoint.name.clone(),
            message: payload.message,
            provider_message_id: payload.message_id.map(|id| match id {
                serde_json::Value::String(id) => id,
                other => other.to_string(),
            }),
        })
    }
}

#[derive(Debug, Deserialize)]
struct EndpointResponse {
    #[serde(default)]
    success: bool,
    message: Option<String>,
    message_id: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_key_matches_rolling_hash() {
        assert_eq!(derive_api_key(""), "0");
        assert_eq!(derive_api_key("a"), "61");
        assert_eq!(derive_api_key("ab"), "c21");
    }

    #[test]
    fn api_key_wraps_like_a_32_bit_integer() {
        let key = derive_api_key(&"Mozilla/5.0 (Linux; Android 14) 1700000000000".repeat(4));
        let value = u64::from_str_radix(&key, 16).unwrap();
        assert!(value <= 1 << 31);
    }

    #[test]
    fn fingerprint_config_keeps_user_agent() {
        let config = ClientConfig::from_fingerprint("a", DEFAULT_USER_AGENT);
        assert_eq!(config.api_key, "61");
        assert!(config.user_agent.starts_with("sms-outbox/"));
    }
}
