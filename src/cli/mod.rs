//! CLI layer - Command-line interface
//!
//! Contains argument parsing, output formatting, signal handling,
//! and the command runners.

pub mod app;
pub mod args;
pub mod config_cmd;
pub mod duration_cmd;
pub mod play_cmd;
pub mod presenter;
pub mod signals;

// Re-export commonly used types
pub use app::{run_upload, EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE_ERROR};
pub use args::{Cli, Commands, ConfigAction, DurationAction, PlayOptions, UploadOptions};
pub use play_cmd::run_play;
pub use presenter::Presenter;
