#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use sms_outbox::{
    DeliveryClient, DeliveryEvent, DeliveryObserver, DeliveryOrchestrator, DeliveryReceipt,
    DeliveryRequest, EndpointDescriptor, EndpointError, InMemoryQueueStore, Message, MessageId,
    QueueStore, StorageError, Transport,
};
use tokio::sync::Notify;

pub const VALID_GLOBE: &str = "09171234567";

#[derive(Clone)]
pub enum Behavior {
    Accept,
    Fail(EndpointError),
    /// Never answers within any sane timeout.
    Hang,
    /// Waits for the notify, then fails.
    Gated(Arc<Notify>),
}

/// In-process endpoint double keyed by endpoint name.
#[derive(Default)]
pub struct ScriptedClient {
    behaviors: Mutex<HashMap<String, Behavior>>,
    by_recipient: Mutex<HashMap<String, Behavior>>,
    calls: Mutex<Vec<(String, DeliveryRequest)>>,
}

impl ScriptedClient {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set(&self, endpoint: &str, behavior: Behavior) {
        self.behaviors
            .lock()
            .unwrap()
            .insert(endpoint.to_string(), behavior);
    }

    /// Overrides the endpoint behaviour for one normalized recipient.
    pub fn set_for_recipient(&self, to: &str, behavior: Behavior) {
        self.by_recipient
            .lock()
            .unwrap()
            .insert(to.to_string(), behavior);
    }

    pub fn calls(&self) -> Vec<(String, DeliveryRequest)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn endpoints_called(&self) -> Vec<String> {
        self.calls().into_iter().map(|(name, _)| name).collect()
    }
}

#[async_trait]
impl DeliveryClient for ScriptedClient {
    async fn deliver(
        &self,
        endpoint: &EndpointDescriptor,
        request: &DeliveryRequest,
    ) -> Result<DeliveryReceipt, EndpointError> {
        self.calls
            .lock()
            .unwrap()
            .push((endpoint.name.clone(), request.clone()));
        let overridden = self.by_recipient.lock().unwrap().get(&request.to).cloned();
        let behavior = overridden
            .or_else(|| self.behaviors.lock().unwrap().get(&endpoint.name).cloned())
            .unwrap_or(Behavior::Fail(EndpointError::Transport(
                "connection refused".to_string(),
            )));

        match behavior {
            Behavior::Accept => Ok(DeliveryReceipt {
                endpoint: endpoint.name.clone(),
                message: Some("SMS sent successfully".to_string()),
                provider_message_id: Some("prov-1".to_string()),
            }),
            Behavior::Fail(error) => Err(error),
            Behavior::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Err(EndpointError::Transport("hung".to_string()))
            }
            Behavior::Gated(gate) => {
                gate.notified().await;
                Err(EndpointError::Transport("gate released".to_string()))
            }
        }
    }
}

#[derive(Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<DeliveryEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn events(&self) -> Vec<DeliveryEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl DeliveryObserver for RecordingObserver {
    fn on_event(&self, event: &DeliveryEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

/// A store whose disk is always full.
pub struct BrokenQueueStore;

#[async_trait]
impl QueueStore for BrokenQueueStore {
    async fn enqueue(&self, _message: &Message) -> Result<(), StorageError> {
        Err(StorageError::Other(anyhow::anyhow!("disk full")))
    }

    async fn list_all(&self) -> Result<Vec<Message>, StorageError> {
        Err(StorageError::Other(anyhow::anyhow!("store unavailable")))
    }

    async fn remove(&self, _id: &MessageId) -> Result<bool, StorageError> {
        Ok(false)
    }

    async fn increment_attempts(&self, _id: &MessageId) -> Result<Option<u32>, StorageError> {
        Ok(None)
    }
}

pub fn endpoints(names: &[&str]) -> Vec<EndpointDescriptor> {
    names
        .iter()
        .map(|name| EndpointDescriptor::new(*name, format!("https://{name}.example/send")))
        .collect()
}

pub struct Harness {
    pub client: Arc<ScriptedClient>,
    pub store: InMemoryQueueStore,
    pub observer: Arc<RecordingObserver>,
    pub orchestrator: Arc<DeliveryOrchestrator>,
}

pub fn harness(names: &[&str]) -> Harness {
    let client = ScriptedClient::new();
    let store = InMemoryQueueStore::new();
    let observer = RecordingObserver::new();
    let transport = Transport::new(client.clone(), endpoints(names));
    let orchestrator = DeliveryOrchestrator::builder(transport, Arc::new(store.clone()))
        .observer(observer.clone())
        .build();
    Harness {
        client,
        store,
        observer,
        orchestrator: Arc::new(orchestrator),
    }
}
