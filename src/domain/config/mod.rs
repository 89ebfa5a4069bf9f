//! Configuration domain module

mod app_config;

pub use app_config::{AppConfig, RetryConfig, DEFAULT_LOG_LEVEL, DEFAULT_REQUEST_TIMEOUT_SECS};
