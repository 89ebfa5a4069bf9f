//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with HTTP storage, audio output and the filesystem.

pub mod config;
pub mod playback;
pub mod storage;

// Re-export adapters
pub use config::XdgConfigStore;
pub use playback::{RodioMediaElement, VirtualMediaElement};
pub use storage::HttpStorageTransport;
