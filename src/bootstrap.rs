use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;
use tokio::{sync::watch, task::JoinHandle};

use crate::{
    application::{
        handlers::{
            connectivity_watcher::ConnectivityWatcher, delivery_orchestrator::DeliveryOrchestrator,
        },
        services::{
            observer::DeliveryObserver,
            retry_policy::{AllOf, MaxAge, MaxAttempts, RetryIndefinitely, RetryPolicy},
            transport::Transport,
        },
        usecases::drain_queue::DrainQueueConfig,
    },
    config::Config,
    domain::models::Connectivity,
    infrastructure::{
        messaging::http::{ClientConfig, HttpDeliveryClient},
        repositories::sqlite::SqliteQueueStore,
    },
};

pub fn client_config(config: &Config) -> ClientConfig {
    match &config.api_key {
        Some(api_key) => ClientConfig::new(api_key.clone(), config.user_agent.clone()),
        None => {
            let fingerprint = format!("{}{}", config.user_agent, Utc::now().timestamp_millis());
            ClientConfig::from_fingerprint(&fingerprint, config.user_agent.clone())
        }
    }
}

pub fn retry_policy(config: &Config) -> Arc<dyn RetryPolicy> {
    let mut policies: Vec<Box<dyn RetryPolicy>> = Vec::new();
    if let Some(max_attempts) = config.max_attempts {
        policies.push(Box::new(MaxAttempts(max_attempts)));
    }
    if let Some(max_age) = config.max_age {
        policies.push(Box::new(MaxAge(max_age)));
    }
    match policies.len() {
        0 => Arc::new(RetryIndefinitely),
        _ => Arc::new(AllOf(policies)),
    }
}

/// Opens the SQLite queue and wires the HTTP transport into an orchestrator.
pub async fn build_orchestrator(
    config: &Config,
    observer: Option<Arc<dyn DeliveryObserver>>,
) -> anyhow::Result<Arc<DeliveryOrchestrator>> {
    let queue = SqliteQueueStore::connect(&config.database_url)
        .await
        .with_context(|| format!("failed to open queue store at {}", config.database_url))?;
    let client =
        HttpDeliveryClient::new(client_config(config)).context("failed to build HTTP client")?;
    let transport = Transport::new(client, config.endpoints.clone())
        .with_attempt_timeout(config.request_timeout);

    let mut builder = DeliveryOrchestrator::builder(transport, Arc::new(queue))
        .retry_policy(retry_policy(config))
        .drain_config(DrainQueueConfig {
            concurrency: config.drain_concurrency,
        });
    if let Some(observer) = observer {
        builder = builder.observer(observer);
    }
    Ok(Arc::new(builder.build()))
}

pub fn spawn_connectivity_watcher(
    config: &Config,
    orchestrator: Arc<DeliveryOrchestrator>,
    connectivity: watch::Receiver<Connectivity>,
) -> JoinHandle<()> {
    ConnectivityWatcher::new(orchestrator, connectivity)
        .with_wake_interval(config.sync_interval)
        .spawn()
}
