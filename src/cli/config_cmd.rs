//! Config command handler

use reqwest::Url;
use tracing_subscriber::EnvFilter;

use crate::application::ports::ConfigStore;
use crate::domain::config::{AppConfig, RetryConfig};
use crate::domain::error::ConfigError;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

const NOT_SET: &str = "(not set)";

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    ensure_known_key(key)?;
    validate_config_value(key, value)?;

    let mut config = store.load().await?;
    apply_value(&mut config, key, value)?;

    store.save(&config).await?;
    let shown = if key == "auth_token" {
        mask_token(value)
    } else {
        value.to_string()
    };
    presenter.success(&format!("{} = {}", key, shown));

    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    ensure_known_key(key)?;

    let config = store.load().await?;
    match display_value(&config, key) {
        Some(v) => presenter.output(&v),
        None => presenter.output(NOT_SET),
    }

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    for key in VALID_CONFIG_KEYS {
        presenter.key_value(
            key,
            &display_value(&config, key).unwrap_or_else(|| NOT_SET.to_string()),
        );
    }

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

fn ensure_known_key(key: &str) -> Result<(), ConfigError> {
    if is_valid_config_key(key) {
        Ok(())
    } else {
        Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
        })
    }
}

fn retry_mut(config: &mut AppConfig) -> &mut RetryConfig {
    config.retry.get_or_insert_with(RetryConfig::default)
}

/// Write a validated value into its field
fn apply_value(config: &mut AppConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
        "endpoint" => config.endpoint = Some(value.to_string()),
        "auth_token" => config.auth_token = Some(value.to_string()),
        "log_level" => config.log_level = Some(value.to_string()),
        "request_timeout_secs" => config.request_timeout_secs = Some(parse_number(key, value)?),
        "retry.max_attempts" => retry_mut(config).max_attempts = Some(parse_number(key, value)?),
        "retry.base_delay_ms" => retry_mut(config).base_delay_ms = Some(parse_number(key, value)?),
        "retry.max_delay_ms" => retry_mut(config).max_delay_ms = Some(parse_number(key, value)?),
        _ => unreachable!(), // Already validated
    }
    Ok(())
}

/// Value as shown by `get` and `list`; the token is masked
fn display_value(config: &AppConfig, key: &str) -> Option<String> {
    let retry = config.retry.as_ref();
    match key {
        "endpoint" => config.endpoint.clone(),
        "auth_token" => config.auth_token.as_deref().map(mask_token),
        "request_timeout_secs" => config.request_timeout_secs.map(|v| v.to_string()),
        "log_level" => config.log_level.clone(),
        "retry.max_attempts" => retry.and_then(|r| r.max_attempts).map(|v| v.to_string()),
        "retry.base_delay_ms" => retry.and_then(|r| r.base_delay_ms).map(|v| v.to_string()),
        "retry.max_delay_ms" => retry.and_then(|r| r.max_delay_ms).map(|v| v.to_string()),
        _ => None,
    }
}

/// Validate a config value based on key type
fn validate_config_value(key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
        "endpoint" => {
            let url = Url::parse(value).map_err(|e| ConfigError::ValidationError {
                key: key.to_string(),
                message: e.to_string(),
            })?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(ConfigError::ValidationError {
                    key: key.to_string(),
                    message: "Endpoint must be an http or https URL".to_string(),
                });
            }
        }
        "log_level" => {
            EnvFilter::try_new(value).map_err(|e| ConfigError::ValidationError {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        }
        "request_timeout_secs" | "retry.base_delay_ms" | "retry.max_delay_ms" => {
            parse_number::<u64>(key, value)?;
        }
        "retry.max_attempts" => {
            if parse_number::<u32>(key, value)? == 0 {
                return Err(ConfigError::ValidationError {
                    key: key.to_string(),
                    message: "Value must be at least 1".to_string(),
                });
            }
        }
        _ => {} // auth_token accepts any string
    }
    Ok(())
}

fn parse_number<N: std::str::FromStr>(key: &str, value: &str) -> Result<N, ConfigError> {
    value.parse().map_err(|_| ConfigError::ValidationError {
        key: key.to_string(),
        message: "Value must be a non-negative integer".to_string(),
    })
}

/// Mask a token for display (show first 4 and last 4 chars)
fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 8 {
        "*".repeat(chars.len())
    } else {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    }
}
