//! Media element port interface

use thiserror::Error;
use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender};

/// Signals a media element emits while a source is loaded
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MediaEvent {
    /// Playback position changed
    TimeUpdate { position: f64 },
    /// Duration became known
    MetadataLoaded { duration: f64 },
    /// Playback reached the end of the media
    Ended,
}

/// Playback errors
#[derive(Debug, Clone, Error)]
pub enum PlaybackError {
    #[error("No source attached")]
    NotAttached,

    #[error("Bar {index} is out of range (waveform has {count} bars)")]
    BarOutOfRange { index: usize, count: usize },

    #[error("Failed to load source: {0}")]
    LoadFailed(String),

    #[error("Audio output unavailable: {0}")]
    OutputUnavailable(String),

    #[error("Playback failed: {0}")]
    Element(String),
}

/// Receiving end of a listener registration.
///
/// Dropping it releases the registration: the element stops counting it
/// and never delivers to it again.
#[derive(Debug)]
pub struct MediaSubscription {
    receiver: UnboundedReceiver<MediaEvent>,
}

impl MediaSubscription {
    /// Next event, if one is already queued
    pub fn try_next(&mut self) -> Option<MediaEvent> {
        match self.receiver.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Wait for the next event. `None` once the element drops its side.
    pub async fn next(&mut self) -> Option<MediaEvent> {
        self.receiver.recv().await
    }
}

/// Listener registry shared by element implementations.
#[derive(Debug, Default)]
pub struct MediaListeners {
    senders: Vec<UnboundedSender<MediaEvent>>,
}

impl MediaListeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self) -> MediaSubscription {
        let (sender, receiver) = mpsc::unbounded_channel();
        self.prune();
        self.senders.push(sender);
        MediaSubscription { receiver }
    }

    /// Deliver to every live listener
    pub fn emit(&mut self, event: MediaEvent) {
        self.senders.retain(|sender| sender.send(event).is_ok());
    }

    /// Number of live listeners
    pub fn len(&self) -> usize {
        self.senders.iter().filter(|s| !s.is_closed()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn prune(&mut self) {
        self.senders.retain(|sender| !sender.is_closed());
    }
}

/// Port for a playable media element (an audio output, or a stand-in).
///
/// Elements are driven from a single task; they are not `Send`.
pub trait MediaElement {
    /// Load a source. Emits `MetadataLoaded` once the duration is known.
    fn load(&mut self, source: &str) -> Result<(), PlaybackError>;

    /// Drop the current source and stop output
    fn unload(&mut self);

    fn play(&mut self) -> Result<(), PlaybackError>;

    fn pause(&mut self);

    /// Jump to an absolute position in seconds
    fn seek(&mut self, seconds: f64);

    /// Register a listener for this element's events
    fn subscribe(&mut self) -> MediaSubscription;

    /// Number of registered, unreleased listeners
    fn listener_count(&self) -> usize;

    /// Poll time-based signals (position updates, end of media).
    /// Elements that push events on their own leave this empty.
    fn tick(&mut self) {}
}
