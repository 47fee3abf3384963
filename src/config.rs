use std::env::var;
use std::str::FromStr;
use std::time::Duration;

use dotenvy::dotenv;
use thiserror::Error;

use crate::{
    application::{
        handlers::connectivity_watcher::DEFAULT_WAKE_INTERVAL,
        usecases::drain_queue::DEFAULT_DRAIN_CONCURRENCY,
    },
    domain::models::EndpointDescriptor,
    infrastructure::messaging::http::DEFAULT_USER_AGENT,
};

pub const DEFAULT_DATABASE_URL: &str = "sqlite://sms_outbox.db";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing {0} env param")]
    Missing(&'static str),
    #[error("Invalid {name} env param: {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub endpoints: Vec<EndpointDescriptor>,
    pub api_key: Option<String>,
    pub user_agent: String,
    pub request_timeout: Duration,
    pub sync_interval: Duration,
    pub drain_concurrency: usize,
    pub max_attempts: Option<u32>,
    pub max_age: Option<Duration>,
}

impl Config {
    /// Reads the process environment, after loading `.env` if there is one.
    pub fn try_parse() -> Result<Config, ConfigError> {
        let _ = dotenv();
        Self::from_lookup(|key| var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let endpoints_raw = lookup("SMS_ENDPOINTS").ok_or(ConfigError::Missing("SMS_ENDPOINTS"))?;
        let endpoints = endpoints_raw
            .split(',')
            .filter(|entry| !entry.trim().is_empty())
            .map(|entry| {
                EndpointDescriptor::parse(entry).ok_or_else(|| ConfigError::Invalid {
                    name: "SMS_ENDPOINTS",
                    value: entry.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        if endpoints.is_empty() {
            return Err(ConfigError::Invalid {
                name: "SMS_ENDPOINTS",
                value: endpoints_raw,
            });
        }

        let request_timeout_secs = positive(
            &lookup,
            "SMS_REQUEST_TIMEOUT_SECS",
            DEFAULT_REQUEST_TIMEOUT_SECS,
        )?;
        let sync_interval_secs = positive(
            &lookup,
            "SMS_SYNC_INTERVAL_SECS",
            DEFAULT_WAKE_INTERVAL.as_secs(),
        )?;

        Ok(Config {
            database_url: lookup("SMS_DATABASE_URL")
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            endpoints,
            api_key: lookup("SMS_API_KEY").filter(|key| !key.trim().is_empty()),
            user_agent: lookup("SMS_USER_AGENT").unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            request_timeout: Duration::from_secs(request_timeout_secs),
            sync_interval: Duration::from_secs(sync_interval_secs),
            drain_concurrency: positive(&lookup, "SMS_DRAIN_CONCURRENCY", DEFAULT_DRAIN_CONCURRENCY)?,
            max_attempts: optional(&lookup, "SMS_MAX_ATTEMPTS")?,
            max_age: optional::<u64, _>(&lookup, "SMS_MAX_AGE_SECS")?.map(Duration::from_secs),
        })
    }
}

fn optional<T, F>(lookup: &F, name: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|value| {
            value
                .trim()
                .parse::<T>()
                .map_err(|_| ConfigError::Invalid { name, value })
        })
        .transpose()
}

fn positive<T, F>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr + PartialOrd + Default + ToString,
    F: Fn(&str) -> Option<String>,
{
    let value = optional(lookup, name)?.unwrap_or(default);
    if value <= T::default() {
        return Err(ConfigError::Invalid {
            name,
            value: value.to_string(),
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn parse(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_only_endpoints_are_set() {
        let config = parse(&[("SMS_ENDPOINTS", "primary=https://a.example/send, https://b.example/send")])
            .unwrap();
        assert_eq!(config.endpoints.len(), 2);
        assert_eq!(config.endpoints[0].name, "primary");
        assert_eq!(config.endpoints[1].url, "https://b.example/send");
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.sync_interval, Duration::from_secs(86_400));
        assert_eq!(config.drain_concurrency, DEFAULT_DRAIN_CONCURRENCY);
        assert_eq!(config.api_key, None);
        assert_eq!(config.max_attempts, None);
        assert_eq!(config.max_age, None);
    }

    #[test]
    fn endpoints_are_required() {
        assert_eq!(parse(&[]).unwrap_err(), ConfigError::Missing("SMS_ENDPOINTS"));
        assert!(matches!(
            parse(&[("SMS_ENDPOINTS", " , ")]),
            Err(ConfigError::Invalid {
                name: "SMS_ENDPOINTS",
                ..
            })
        ));
    }

    #[test]
    fn rejects_zero_and_garbage_numbers() {
        let err = parse(&[
            ("SMS_ENDPOINTS", "https://a.example/send"),
            ("SMS_REQUEST_TIMEOUT_SECS", "0"),
        ])
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                name: "SMS_REQUEST_TIMEOUT_SECS",
                ..
            }
        ));

        let err = parse(&[
            ("SMS_ENDPOINTS", "https://a.example/send"),
            ("SMS_MAX_ATTEMPTS", "many"),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                name: "SMS_MAX_ATTEMPTS",
                value: "many".to_string()
            }
        );
    }

    #[test]
    fn reads_retry_limits() {
        let config = parse(&[
            ("SMS_ENDPOINTS", "https://a.example/send"),
            ("SMS_MAX_ATTEMPTS", "5"),
            ("SMS_MAX_AGE_SECS", "3600"),
            ("SMS_API_KEY", "secret"),
        ])
        .unwrap();
        assert_eq!(config.max_attempts, Some(5));
        assert_eq!(config.max_age, Some(Duration::from_secs(3600)));
        assert_eq!(config.api_key.as_deref(), Some("secret"));
    }
}
