//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::domain::media::MediaKind;

/// MemoRelay - upload recordings and play them back
#[derive(Parser, Debug)]
#[command(name = "memo-relay")]
#[command(version)]
#[command(about = "Upload audio/video recordings through presigned storage and play them back")]
#[command(long_about = None)]
pub struct Cli {
    /// Upload-location endpoint (overrides config and MEMO_RELAY_ENDPOINT)
    #[arg(long, global = true, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Log filter, e.g. "debug" or "memo_relay=trace" (RUST_LOG wins)
    #[arg(long, global = true, value_name = "FILTER")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Upload a finished recording and print its public URL
    Upload {
        /// Recorded file to upload
        file: PathBuf,

        /// Declared media kind
        #[arg(short = 'k', long, value_enum, default_value_t = KindArg::Audio)]
        kind: KindArg,

        /// Container MIME type reported by the recorder (e.g. audio/ogg)
        #[arg(short = 't', long, value_name = "MIME")]
        content_type: Option<String>,

        /// Total attempts on network failure (1 = no retry)
        #[arg(long, value_name = "N")]
        attempts: Option<u32>,
    },
    /// Play a local recording with a waveform view
    Play {
        /// Audio file to play
        file: PathBuf,

        /// Start from this waveform bar (0-44)
        #[arg(long, value_name = "BAR")]
        seek_bar: Option<usize>,

        /// Simulate playback without an audio device
        #[arg(long)]
        dry_run: bool,

        /// Simulated length in seconds for --dry-run
        #[arg(long, value_name = "SECS", default_value_t = 10.0, requires = "dry_run")]
        length: f64,
    },
    /// Convert between duration formats
    Duration {
        #[command(subcommand)]
        action: DurationAction,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Duration codec actions
#[derive(Subcommand, Debug, Clone)]
pub enum DurationAction {
    /// Encode whole seconds for the API (65 -> "1m 5s")
    Encode {
        seconds: u64,
    },
    /// Normalize an h/m/s string to HH:MM:SS ("1h2m3s" -> "01:02:03")
    Normalize {
        text: String,
    },
    /// Translate a relative-past phrase ("5 minutes ago" -> "5 minutos atrás")
    Ago {
        text: String,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Media kind argument for clap ValueEnum
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Audio,
    Video,
}

impl From<KindArg> for MediaKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Audio => MediaKind::Audio,
            KindArg::Video => MediaKind::Video,
        }
    }
}

/// Parsed upload options
#[derive(Debug, Clone)]
pub struct UploadOptions {
    pub file: PathBuf,
    pub kind: MediaKind,
    pub content_type: String,
}

/// Parsed play options
#[derive(Debug, Clone)]
pub struct PlayOptions {
    pub file: PathBuf,
    pub seek_bar: Option<usize>,
    /// Simulated length when playing without an audio device
    pub dry_run_length: Option<f64>,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "endpoint",
    "auth_token",
    "request_timeout_secs",
    "log_level",
    "retry.max_attempts",
    "retry.base_delay_ms",
    "retry.max_delay_ms",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_upload_defaults() {
        let cli = Cli::parse_from(["memo-relay", "upload", "memo.webm"]);
        let Commands::Upload {
            file,
            kind,
            content_type,
            attempts,
        } = cli.command
        else {
            panic!("Expected Upload command");
        };
        assert_eq!(file, PathBuf::from("memo.webm"));
        assert_eq!(kind, KindArg::Audio);
        assert!(content_type.is_none());
        assert!(attempts.is_none());
    }

    #[test]
    fn cli_parses_upload_flags() {
        let cli = Cli::parse_from([
            "memo-relay",
            "upload",
            "clip.mp4",
            "-k",
            "video",
            "-t",
            "video/mp4",
            "--attempts",
            "3",
            "--endpoint",
            "https://api.example.com/presign",
        ]);
        assert_eq!(
            cli.endpoint,
            Some("https://api.example.com/presign".to_string())
        );
        let Commands::Upload {
            kind,
            content_type,
            attempts,
            ..
        } = cli.command
        else {
            panic!("Expected Upload command");
        };
        assert_eq!(MediaKind::from(kind), MediaKind::Video);
        assert_eq!(content_type, Some("video/mp4".to_string()));
        assert_eq!(attempts, Some(3));
    }

    #[test]
    fn cli_parses_play() {
        let cli = Cli::parse_from([
            "memo-relay",
            "play",
            "memo.ogg",
            "--seek-bar",
            "44",
            "--dry-run",
            "--length",
            "3.5",
        ]);
        let Commands::Play {
            seek_bar,
            dry_run,
            length,
            ..
        } = cli.command
        else {
            panic!("Expected Play command");
        };
        assert_eq!(seek_bar, Some(44));
        assert!(dry_run);
        assert_eq!(length, 3.5);
    }

    #[test]
    fn cli_rejects_length_without_dry_run() {
        let result = Cli::try_parse_from(["memo-relay", "play", "memo.ogg", "--length", "3"]);
        assert!(result.is_err());
    }

    #[test]
    fn cli_parses_duration_actions() {
        let cli = Cli::parse_from(["memo-relay", "duration", "encode", "65"]);
        assert!(matches!(
            cli.command,
            Commands::Duration {
                action: DurationAction::Encode { seconds: 65 }
            }
        ));

        let cli = Cli::parse_from(["memo-relay", "duration", "ago", "5 minutes ago"]);
        if let Commands::Duration {
            action: DurationAction::Ago { text },
        } = cli.command
        {
            assert_eq!(text, "5 minutes ago");
        } else {
            panic!("Expected Duration Ago command");
        }
    }

    #[test]
    fn cli_parses_config_set() {
        let cli = Cli::parse_from(["memo-relay", "config", "set", "endpoint", "https://x"]);
        if let Commands::Config {
            action: ConfigAction::Set { key, value },
        } = cli.command
        {
            assert_eq!(key, "endpoint");
            assert_eq!(value, "https://x");
        } else {
            panic!("Expected Config Set command");
        }
    }

    #[test]
    fn valid_config_keys() {
        assert!(is_valid_config_key("endpoint"));
        assert!(is_valid_config_key("retry.max_attempts"));
        assert!(!is_valid_config_key("invalid_key"));
    }

    #[test]
    fn verify_cli() {
        // Verify the CLI definition is valid
        Cli::command().debug_assert();
    }
}
