//! Configuration port interface

use std::path::PathBuf;

use async_trait::async_trait;

use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

/// Persistent home of the user's [`AppConfig`]
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Read the stored config. A store that holds nothing yet yields
    /// [`AppConfig::empty`], not an error.
    async fn load(&self) -> Result<AppConfig, ConfigError>;

    /// Replace the stored config
    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError>;

    fn path(&self) -> PathBuf;

    fn exists(&self) -> bool;

    /// Store [`AppConfig::defaults`]. Fails with
    /// [`ConfigError::AlreadyExists`] when something is already stored.
    async fn init(&self) -> Result<(), ConfigError>;
}
