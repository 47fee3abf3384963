use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::{
    application::services::{
        observer::DeliveryObserver,
        retry_policy::{RetryDecision, RetryPolicy},
        transport::Transport,
    },
    domain::{
        errors::StorageError,
        events::DeliveryEvent,
        models::{DeliveryResult, Message},
        repositories::QueueStore,
    },
};

pub const DEFAULT_DRAIN_CONCURRENCY: usize = 4;

pub struct DrainQueueConfig {
    /// Queued messages retried at the same time within one pass.
    pub concurrency: usize,
}

impl Default for DrainQueueConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_DRAIN_CONCURRENCY,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrainReport {
    pub delivered: usize,
    pub still_queued: usize,
    pub deferred: usize,
    pub discarded: usize,
    pub errors: usize,
    pub passes: u32,
    /// Set when this call found another drain running and handed its work over.
    pub coalesced: bool,
}

enum RetryOutcome {
    Delivered,
    StillQueued,
    Deferred,
    Discarded,
    Vanished,
    Error,
}

impl DrainReport {
    fn record(&mut self, outcome: RetryOutcome) {
        match outcome {
            RetryOutcome::Delivered => self.delivered += 1,
            RetryOutcome::StillQueued => self.still_queued += 1,
            RetryOutcome::Deferred => self.deferred += 1,
            RetryOutcome::Discarded => self.discarded += 1,
            RetryOutcome::Error => self.errors += 1,
            RetryOutcome::Vanished => {}
        }
    }
}

pub struct DrainQueueUseCase {
    transport: Transport,
    queue: Arc<dyn QueueStore>,
    policy: Arc<dyn RetryPolicy>,
    observer: Arc<dyn DeliveryObserver>,
    config: DrainQueueConfig,
    gate: Mutex<()>,
    rerun: AtomicBool,
}

impl DrainQueueUseCase {
    pub fn new(
        transport: Transport,
        queue: Arc<dyn QueueStore>,
        policy: Arc<dyn RetryPolicy>,
        observer: Arc<dyn DeliveryObserver>,
        config: DrainQueueConfig,
    ) -> Self {
        Self {
            transport,
            queue,
            policy,
            observer,
            config,
            gate: Mutex::new(()),
            rerun: AtomicBool::new(false),
        }
    }

    /// Runs drain passes until no further drain was requested meanwhile.
    /// At most one drain runs at a time; overlapping calls coalesce into it.
    pub async fn execute(&self) -> Result<DrainReport, StorageError> {
        let mut report = DrainReport::default();
        // Published before the lock attempt, so whoever holds the gate when
        // our attempt fails is bound to observe it.
        self.rerun.store(true, Ordering::SeqCst);
        loop {
            let Ok(guard) = self.gate.try_lock() else {
                debug!("drain already in flight, coalescing");
                report.coalesced = true;
                return Ok(report);
            };
            while self.rerun.swap(false, Ordering::SeqCst) {
                self.drain_pass(&mut report).await?;
            }
            drop(guard);

            // A request that failed its lock attempt after our last swap.
            if !self.rerun.load(Ordering::SeqCst) {
                return Ok(report);
            }
        }
    }

    async fn drain_pass(&self, report: &mut DrainReport) -> Result<(), StorageError> {
        let messages = self.queue.list_all().await?;
        report.passes += 1;
        if messages.is_empty() {
            return Ok(());
        }

        info!(queued = messages.len(), "draining queue");
        let now = Utc::now();
        let outcomes: Vec<RetryOutcome> = stream::iter(messages)
            .map(|message| self.retry_one(message, now))
            .buffer_unordered(self.config.concurrency.max(1))
            .collect()
            .await;

        for outcome in outcomes {
            report.record(outcome);
        }
        Ok(())
    }

    async fn retry_one(&self, mut message: Message, now: DateTime<Utc>) -> RetryOutcome {
        match self.policy.evaluate(&message, now) {
            RetryDecision::Retry => {}
            RetryDecision::Defer => return RetryOutcome::Deferred,
            RetryDecision::Discard => return self.discard(&message).await,
        }

        message.attempts = match self.queue.increment_attempts(&message.id).await {
            Ok(Some(attempts)) => attempts,
            Ok(None) => return RetryOutcome::Vanished,
            Err(err) => {
                error!(message_id = %message.id, error = %err, "failed to record retry attempt");
                return RetryOutcome::Error;
            }
        };

        match self.transport.attempt_delivery(&message).await {
            DeliveryResult::Delivered(receipt) => {
                if let Err(err) = self.queue.remove(&message.id).await {
                    error!(
                        message_id = %message.id,
                        error = %err,
                        "delivered message could not be removed from queue"
                    );
                    return RetryOutcome::Error;
                }
                self.observer.on_event(&DeliveryEvent::Delivered {
                    message_id: message.id,
                    network: message.network,
                    attempts: message.attempts,
                    receipt,
                });
                RetryOutcome::Delivered
            }
            DeliveryResult::Exhausted { .. } => {
                debug!(
                    message_id = %message.id,
                    attempts = message.attempts,
                    "retry failed, keeping message queued"
                );
                self.observer.on_event(&DeliveryEvent::RetryFailed {
                    message_id: message.id,
                    attempts: message.attempts,
                });
                RetryOutcome::StillQueued
            }
        }
    }

    async fn discard(&self, message: &Message) -> RetryOutcome {
        match self.queue.remove(&message.id).await {
            Ok(_) => {
                warn!(
                    message_id = %message.id,
                    attempts = message.attempts,
                    "retry policy discarded queued message"
                );
                self.observer.on_event(&DeliveryEvent::Discarded {
                    message_id: message.id,
                    attempts: message.attempts,
                });
                RetryOutcome::Discarded
            }
            Err(err) => {
                error!(message_id = %message.id, error = %err, "failed to discard queued message");
                RetryOutcome::Error
            }
        }
    }
}
