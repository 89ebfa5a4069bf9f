//! Application layer - Use cases and port interfaces
//!
//! Contains the core operations (upload, playback) and trait definitions
//! for external system interactions.

pub mod playback;
pub mod ports;
pub mod upload;

// Re-export use cases
pub use playback::PlaybackEngine;
pub use upload::{UploadMediaUseCase, UploadOutput};
