//! Offline-capable SMS submission core.
//!
//! A host UI calls [`DeliveryOrchestrator::send`] to submit a message. The
//! orchestrator validates it, tries every configured endpoint in order and,
//! when all of them fail, stores the message in a durable queue. The
//! [`ConnectivityWatcher`] (or the host directly, via
//! [`DeliveryOrchestrator::drain_queue`]) retries queued messages once the
//! device is back online.

pub mod application;
pub mod bootstrap;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod telemetry;

pub use application::{
    handlers::{
        connectivity_watcher::ConnectivityWatcher,
        delivery_orchestrator::{DeliveryOrchestrator, DeliveryOrchestratorBuilder},
    },
    services::{
        observer::{DeliveryObserver, DrainSignal, NoopObserver},
        retry_policy::{MaxAge, MaxAttempts, RetryDecision, RetryIndefinitely, RetryPolicy},
        transport::{DeliveryClient, Transport},
    },
    usecases::drain_queue::{DrainQueueConfig, DrainReport},
};
pub use config::{Config, ConfigError};
pub use domain::{
    errors::{EndpointError, StorageError, UnknownNetwork, ValidationError},
    events::DeliveryEvent,
    models::{
        Connectivity, DeliveryReceipt, DeliveryRequest, DeliveryResult, EndpointDescriptor,
        Message, MessageId, Network, Outcome,
    },
    repositories::QueueStore,
    validation::{Validator, normalize_number, validate_message, validate_recipient},
};
pub use infrastructure::{
    messaging::http::{ClientConfig, HttpDeliveryClient},
    repositories::{in_memory::InMemoryQueueStore, sqlite::SqliteQueueStore},
};
