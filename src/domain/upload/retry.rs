//! Retry policy for transient upload failures

use std::time::Duration;

use rand::Rng;

use crate::domain::error::ConfigError;

/// Default number of attempts (no retries)
pub const DEFAULT_MAX_ATTEMPTS: u32 = 1;

/// Default delay before the first retry
pub const DEFAULT_BASE_DELAY_MS: u64 = 250;

/// Default cap on a single backoff delay
pub const DEFAULT_MAX_DELAY_MS: u64 = 4000;

/// Bounded exponential backoff with full jitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
    max_delay: Duration,
}

impl RetryPolicy {
    /// Build a policy. `max_attempts` counts the first try, so it must be
    /// at least 1.
    pub fn new(
        max_attempts: u32,
        base_delay: Duration,
        max_delay: Duration,
    ) -> Result<Self, ConfigError> {
        if max_attempts == 0 {
            return Err(ConfigError::ValidationError {
                key: "retry.max_attempts".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(Self {
            max_attempts,
            base_delay,
            max_delay: max_delay.max(base_delay),
        })
    }

    /// A single attempt, never retried.
    pub const fn none() -> Self {
        Self {
            max_attempts: 1,
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
        }
    }

    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Whether another attempt is allowed after `attempt` (1-based) failed.
    pub const fn allows_retry_after(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }

    /// Upper bound of the delay before retry number `retry` (1-based):
    /// `base * 2^(retry - 1)`, capped at the max delay.
    pub fn ceiling(&self, retry: u32) -> Duration {
        let exponent = retry.saturating_sub(1).min(31);
        self.base_delay
            .checked_mul(1u32 << exponent)
            .unwrap_or(self.max_delay)
            .min(self.max_delay)
    }

    /// Jittered delay, uniform in `[0, ceiling(retry)]`.
    pub fn delay<R: Rng + ?Sized>(&self, retry: u32, rng: &mut R) -> Duration {
        let ceiling = self.ceiling(retry).as_millis() as u64;
        if ceiling == 0 {
            return Duration::ZERO;
        }
        Duration::from_millis(rng.gen_range(0..=ceiling))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay: Duration::from_millis(DEFAULT_BASE_DELAY_MS),
            max_delay: Duration::from_millis(DEFAULT_MAX_DELAY_MS),
        }
    }
}
