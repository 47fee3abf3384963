use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::domain::models::Message;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    Retry,
    /// Leave the record alone until a later drain.
    Defer,
    /// Drop the record from the queue for good.
    Discard,
}

/// Decides, per queued message and drain pass, whether to try again.
pub trait RetryPolicy: Send + Sync {
    fn evaluate(&self, message: &Message, now: DateTime<Utc>) -> RetryDecision;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RetryIndefinitely;

impl RetryPolicy for RetryIndefinitely {
    fn evaluate(&self, _message: &Message, _now: DateTime<Utc>) -> RetryDecision {
        RetryDecision::Retry
    }
}

/// Discards a message once its attempts counter reaches the limit.
#[derive(Debug, Clone, Copy)]
pub struct MaxAttempts(pub u32);

impl RetryPolicy for MaxAttempts {
    fn evaluate(&self, message: &Message, _now: DateTime<Utc>) -> RetryDecision {
        if message.attempts >= self.0 {
            RetryDecision::Discard
        } else {
            RetryDecision::Retry
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MaxAge(pub Duration);

impl RetryPolicy for MaxAge {
    fn evaluate(&self, message: &Message, now: DateTime<Utc>) -> RetryDecision {
        let age = now.signed_duration_since(message.created_at);
        match age.to_std() {
            Ok(age) if age >= self.0 => RetryDecision::Discard,
            _ => RetryDecision::Retry,
        }
    }
}

/// Discards as soon as any inner policy discards, otherwise defers if any defers.
pub struct AllOf(pub Vec<Box<dyn RetryPolicy>>);

impl RetryPolicy for AllOf {
    fn evaluate(&self, message: &Message, now: DateTime<Utc>) -> RetryDecision {
        let mut decision = RetryDecision::Retry;
        for policy in &self.0 {
            match policy.evaluate(message, now) {
                RetryDecision::Discard => return RetryDecision::Discard,
                RetryDecision::Defer => decision = RetryDecision::Defer,
                RetryDecision::Retry => {}
            }
        }
        decision
    }
}
