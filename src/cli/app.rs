//! Upload runner, config merging and logging setup

use std::env;
use std::process::ExitCode;

use reqwest::Url;
use tracing_subscriber::EnvFilter;

use crate::application::ports::{ConfigStore, UploadError};
use crate::application::UploadMediaUseCase;
use crate::domain::config::AppConfig;
use crate::domain::media::RecordingPayload;
use crate::infrastructure::{HttpStorageTransport, XdgConfigStore};

use super::args::UploadOptions;
use super::presenter::Presenter;
use super::signals::ShutdownSignal;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Environment variable overriding the endpoint
pub const ENDPOINT_ENV: &str = "MEMO_RELAY_ENDPOINT";
/// Environment variable overriding the auth token
pub const TOKEN_ENV: &str = "MEMO_RELAY_TOKEN";

/// Install the stderr subscriber. RUST_LOG wins over `fallback`.
pub fn init_logging(fallback: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    // A second init (tests) is harmless
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Upload one file and print its public URL
pub async fn run_upload(options: UploadOptions, config: &AppConfig) -> ExitCode {
    let mut presenter = Presenter::new();

    let Some(endpoint) = config.endpoint.as_deref() else {
        presenter.error(&format!(
            "Missing endpoint. Set {} or run 'memo-relay config set endpoint <url>'",
            ENDPOINT_ENV
        ));
        return ExitCode::from(EXIT_ERROR);
    };
    let endpoint = match Url::parse(endpoint) {
        Ok(url) => url,
        Err(e) => {
            presenter.error(&format!("Invalid endpoint '{}': {}", endpoint, e));
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };

    let data = match tokio::fs::read(&options.file).await {
        Ok(data) => data,
        Err(e) => {
            presenter.error(&format!("Cannot read {}: {}", options.file.display(), e));
            return ExitCode::from(EXIT_ERROR);
        }
    };
    let payload = RecordingPayload::new(data, options.kind, options.content_type);
    tracing::debug!(
        file = %options.file.display(),
        kind = %payload.kind(),
        size = payload.size_bytes(),
        "payload read"
    );

    let transport = match HttpStorageTransport::new(
        endpoint,
        config.auth_token.clone(),
        config.request_timeout_or_default(),
    ) {
        Ok(t) => t,
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
    };
    let use_case = UploadMediaUseCase::with_retry(transport, config.retry_policy_or_default());

    let shutdown = ShutdownSignal::new();
    shutdown.setup();

    presenter.start_spinner(&format!(
        "Uploading {} ({})...",
        options.file.display(),
        payload.human_readable_size()
    ));

    match use_case.upload_media(&payload, &shutdown.token()).await {
        Ok(output) => {
            presenter.spinner_success(&format!("Stored as {}", output.file_name));
            if output.attempts > 1 {
                presenter.info(&format!("Succeeded after {} attempts", output.attempts));
            }
            presenter.output(output.public_url.as_str());
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(UploadError::Cancelled) => {
            presenter.spinner_fail("Upload cancelled");
            ExitCode::from(EXIT_ERROR)
        }
        Err(e) => {
            presenter.spinner_fail("Upload failed");
            presenter.error(&e.to_string());
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Read endpoint and token overrides from the environment
pub fn env_config() -> AppConfig {
    AppConfig {
        endpoint: env::var(ENDPOINT_ENV).ok().filter(|s| !s.is_empty()),
        auth_token: env::var(TOKEN_ENV).ok().filter(|s| !s.is_empty()),
        ..Default::default()
    }
}

/// Load and merge configuration from file, env, and CLI
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = match store.load().await {
        Ok(config) => config,
        Err(e) => {
            // Logging is not up yet
            eprintln!("warning: ignoring config file: {}", e);
            AppConfig::empty()
        }
    };

    // Merge: defaults < file < env < cli
    AppConfig::defaults()
        .merge(file_config)
        .merge(env_config())
        .merge(cli_config)
}
