//! Application configuration value object

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::upload::{
    RetryPolicy, DEFAULT_BASE_DELAY_MS, DEFAULT_MAX_ATTEMPTS, DEFAULT_MAX_DELAY_MS,
};

/// Default per-request timeout for storage calls
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default log filter when RUST_LOG is unset
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Retry section of the configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RetryConfig {
    pub max_attempts: Option<u32>,
    pub base_delay_ms: Option<u64>,
    pub max_delay_ms: Option<u64>,
}

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub endpoint: Option<String>,
    pub auth_token: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub log_level: Option<String>,
    pub retry: Option<RetryConfig>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            endpoint: None,
            auth_token: None,
            request_timeout_secs: Some(DEFAULT_REQUEST_TIMEOUT_SECS),
            log_level: Some(DEFAULT_LOG_LEVEL.to_string()),
            retry: Some(RetryConfig {
                max_attempts: Some(DEFAULT_MAX_ATTEMPTS),
                base_delay_ms: Some(DEFAULT_BASE_DELAY_MS),
                max_delay_ms: Some(DEFAULT_MAX_DELAY_MS),
            }),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            endpoint: other.endpoint.or(self.endpoint),
            auth_token: other.auth_token.or(self.auth_token),
            request_timeout_secs: other.request_timeout_secs.or(self.request_timeout_secs),
            log_level: other.log_level.or(self.log_level),
            retry: Self::merge_retry_config(self.retry, other.retry),
        }
    }

    fn merge_retry_config(
        base: Option<RetryConfig>,
        other: Option<RetryConfig>,
    ) -> Option<RetryConfig> {
        match (base, other) {
            (None, None) => None,
            (Some(b), None) => Some(b),
            (None, Some(o)) => Some(o),
            (Some(b), Some(o)) => Some(RetryConfig {
                max_attempts: o.max_attempts.or(b.max_attempts),
                base_delay_ms: o.base_delay_ms.or(b.base_delay_ms),
                max_delay_ms: o.max_delay_ms.or(b.max_delay_ms),
            }),
        }
    }

    /// Get the request timeout, or the default if not set or zero
    pub fn request_timeout_or_default(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .filter(|secs| *secs > 0)
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    /// Get the log filter, or "warn" if not set
    pub fn log_level_or_default(&self) -> &str {
        self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    /// Build the retry policy, falling back to defaults for missing or
    /// invalid values
    pub fn retry_policy_or_default(&self) -> RetryPolicy {
        let retry = self.retry.clone().unwrap_or_default();
        RetryPolicy::new(
            retry.max_attempts.unwrap_or(DEFAULT_MAX_ATTEMPTS),
            Duration::from_millis(retry.base_delay_ms.unwrap_or(DEFAULT_BASE_DELAY_MS)),
            Duration::from_millis(retry.max_delay_ms.unwrap_or(DEFAULT_MAX_DELAY_MS)),
        )
        .unwrap_or_default()
    }
}
