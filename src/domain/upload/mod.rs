//! Upload domain module

mod attempt;
mod location;
mod retry;

pub use attempt::{InvalidStateTransition, UploadAttempt, UploadState};
pub use location::UploadLocation;
pub use retry::{RetryPolicy, DEFAULT_BASE_DELAY_MS, DEFAULT_MAX_ATTEMPTS, DEFAULT_MAX_DELAY_MS};
