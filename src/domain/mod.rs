//! Domain layer - Core business logic
//!
//! Contains value objects, state machines, and domain errors.
//! This layer performs no I/O.

pub mod config;
pub mod duration;
pub mod error;
pub mod media;
pub mod playback;
pub mod upload;

// Re-export common types
pub use config::AppConfig;
pub use duration::{ClockTime, ElapsedSeconds, LooseDuration, RelativePast};
pub use error::*;
pub use media::{MediaDescriptor, MediaKind, RecordingPayload};
pub use playback::{PlaybackPhase, PlaybackState, WaveformModel, BAR_COUNT};
pub use upload::{InvalidStateTransition, RetryPolicy, UploadAttempt, UploadLocation, UploadState};
