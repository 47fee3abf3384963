use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::network::Network;

/// Time-ordered message identifier (UUIDv7), so ids sort in creation order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct MessageId(Uuid);

impl MessageId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    pub fn parse(value: &str) -> Option<Self> {
        Uuid::parse_str(value).ok().map(Self)
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub id: MessageId,
    /// Raw recipient as typed by the user; normalized only on the wire.
    pub recipient: String,
    pub body: String,
    pub network: Network,
    pub created_at: DateTime<Utc>,
    pub attempts: u32,
}

impl Message {
    pub fn new(recipient: impl Into<String>, body: impl Into<String>, network: Network) -> Self {
        Self {
            id: MessageId::new(),
            recipient: recipient.into(),
            body: body.into(),
            network,
            created_at: Utc::now(),
            attempts: 0,
        }
    }
}
