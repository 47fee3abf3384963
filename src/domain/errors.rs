use std::time::Duration;

use thiserror::Error;

use crate::domain::models::Network;

/// Bad user input. Never retried; reported straight back to the caller.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid recipient number for the {network} network")]
    InvalidRecipient { network: Network },
    #[error("Message is empty, longer than 160 characters, or contains control characters")]
    InvalidBody,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown network {0:?}")]
pub struct UnknownNetwork(pub String);

/// One endpoint failed to accept a message. Logged and absorbed by the transport.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EndpointError {
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
    #[error("HTTP {status}: {reason}")]
    Status { status: u16, reason: String },
    #[error("Endpoint did not accept the message: {0}")]
    Rejected(String),
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Malformed endpoint response: {0}")]
    Decode(String),
}

impl EndpointError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, EndpointError::Timeout(_))
    }
}

impl From<reqwest::Error> for EndpointError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            EndpointError::Decode(err.to_string())
        } else {
            EndpointError::Transport(err.to_string())
        }
    }
}

/// The queue could not be opened, read or written. The only user-visible failure.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("Corrupt queue record: {0}")]
    Corrupt(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
