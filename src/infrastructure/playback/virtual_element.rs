//! Clock-driven media element without audio output

use std::time::Instant;

use crate::application::ports::{
    MediaElement, MediaEvent, MediaListeners, MediaSubscription, PlaybackError,
};

/// Plays nothing, but keeps time like a real element: position advances
/// while playing, and end of media fires once the length is reached.
pub struct VirtualMediaElement {
    length: f64,
    position: f64,
    loaded: bool,
    playing: bool,
    last_tick: Option<Instant>,
    listeners: MediaListeners,
}

impl VirtualMediaElement {
    /// `length` is reported as the duration of whatever gets loaded.
    pub fn new(length: f64) -> Self {
        Self {
            length,
            position: 0.0,
            loaded: false,
            playing: false,
            last_tick: None,
            listeners: MediaListeners::new(),
        }
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Move the clock forward by `seconds` of playback.
    pub fn advance(&mut self, seconds: f64) {
        if !self.loaded || !self.playing || seconds <= 0.0 {
            return;
        }

        self.position = (self.position + seconds).min(self.length.max(0.0));
        self.listeners.emit(MediaEvent::TimeUpdate {
            position: self.position,
        });

        if self.position >= self.length {
            self.playing = false;
            self.last_tick = None;
            self.listeners.emit(MediaEvent::Ended);
        }
    }
}

impl MediaElement for VirtualMediaElement {
    fn load(&mut self, _source: &str) -> Result<(), PlaybackError> {
        self.loaded = true;
        self.position = 0.0;
        self.playing = false;
        self.listeners.emit(MediaEvent::MetadataLoaded {
            duration: self.length,
        });
        Ok(())
    }

    fn unload(&mut self) {
        self.loaded = false;
        self.playing = false;
        self.position = 0.0;
        self.last_tick = None;
    }

    fn play(&mut self) -> Result<(), PlaybackError> {
        if !self.loaded {
            return Err(PlaybackError::Element("nothing loaded".to_string()));
        }
        if self.position >= self.length {
            self.position = 0.0;
        }
        self.playing = true;
        self.last_tick = Some(Instant::now());
        Ok(())
    }

    fn pause(&mut self) {
        self.tick();
        self.playing = false;
        self.last_tick = None;
    }

    fn seek(&mut self, seconds: f64) {
        if !self.loaded {
            return;
        }
        self.position = seconds.clamp(0.0, self.length.max(0.0));
        self.listeners.emit(MediaEvent::TimeUpdate {
            position: self.position,
        });
    }

    fn subscribe(&mut self) -> MediaSubscription {
        self.listeners.subscribe()
    }

    fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn tick(&mut self) {
        let Some(last) = self.last_tick else {
            return;
        };
        let now = Instant::now();
        self.last_tick = Some(now);
        self.advance(now.duration_since(last).as_secs_f64());
    }
}
