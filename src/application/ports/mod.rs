//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod config;
pub mod media_element;
pub mod storage;

// Re-export common types
pub use config::ConfigStore;
pub use media_element::{MediaElement, MediaEvent, MediaListeners, MediaSubscription, PlaybackError};
pub use storage::{LocationGrant, LocationRequest, StorageTransport, UploadError, TRANSPORT_HINT};
