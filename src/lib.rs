//! MemoRelay - upload recordings through presigned storage and play them back
//!
//! A recording is described (file name, MIME type), a write location is
//! requested from the backend, and the bytes are written there in one PUT.
//! Local files can be played with a seekable waveform view.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Duration codecs, media descriptors, the upload state machine,
//!   playback state and configuration
//! - **Application**: Use cases and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (HTTP storage, rodio, XDG config)
//! - **CLI**: Command-line interface, argument parsing, and signal handling

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
