//! MemoRelay CLI entry point

use std::process::ExitCode;

use clap::Parser;

use memo_relay::cli::{
    app::{init_logging, load_merged_config, run_upload, EXIT_ERROR},
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    duration_cmd::handle_duration_command,
    presenter::Presenter,
    run_play, PlayOptions, UploadOptions,
};
use memo_relay::domain::config::{AppConfig, RetryConfig};
use memo_relay::infrastructure::XdgConfigStore;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let presenter = Presenter::new();

    // Build CLI config from args
    let attempts = match &cli.command {
        Commands::Upload { attempts, .. } => *attempts,
        _ => None,
    };
    let cli_config = AppConfig {
        endpoint: cli.endpoint.clone(),
        log_level: cli.log_level.clone(),
        retry: attempts.map(|n| RetryConfig {
            max_attempts: Some(n),
            ..Default::default()
        }),
        ..Default::default()
    };

    // Merge config
    let config = load_merged_config(cli_config).await;
    init_logging(config.log_level_or_default());

    // Route to appropriate handler
    match cli.command {
        Commands::Config { action } => {
            let store = XdgConfigStore::new();
            if let Err(e) = handle_config_command(action, &store, &presenter).await {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            ExitCode::SUCCESS
        }
        Commands::Duration { action } => {
            handle_duration_command(action, &presenter);
            ExitCode::SUCCESS
        }
        Commands::Upload {
            file,
            kind,
            content_type,
            ..
        } => {
            let options = UploadOptions {
                file,
                kind: kind.into(),
                content_type: content_type.unwrap_or_default(),
            };
            run_upload(options, &config).await
        }
        Commands::Play {
            file,
            seek_bar,
            dry_run,
            length,
        } => {
            let options = PlayOptions {
                file,
                seek_bar,
                dry_run_length: dry_run.then_some(length),
            };
            run_play(options).await
        }
    }
}
