//! Playback engine
//!
//! Owns one media element and turns its signals into [`PlaybackState`] for
//! a seekable waveform view.
//!
//! State machine:
//!   IDLE -> READY (metadata loaded)
//!   READY | PAUSED -> PLAYING (toggle)
//!   PLAYING -> PAUSED (toggle, end of media)
//!
//! Listeners are tied to the attached source. Re-attaching or detaching
//! drops the previous subscription before anything else happens, so events
//! from an old source never reach the new state.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::domain::duration::ClockTime;
use crate::domain::playback::{PlaybackPhase, PlaybackState, WaveformModel, BAR_COUNT};

use super::ports::{MediaElement, MediaEvent, MediaSubscription, PlaybackError};

/// Everything scoped to the currently attached source
struct Attachment {
    source: String,
    waveform: WaveformModel,
    subscription: MediaSubscription,
}

pub struct PlaybackEngine<E: MediaElement> {
    element: E,
    attachment: Option<Attachment>,
    phase: PlaybackPhase,
    state: PlaybackState,
    rng: StdRng,
}

impl<E: MediaElement> PlaybackEngine<E> {
    pub fn new(element: E) -> Self {
        Self::with_rng(element, StdRng::from_entropy())
    }

    /// Create an engine with a fixed waveform generator
    pub fn with_rng(element: E, rng: StdRng) -> Self {
        Self {
            element,
            attachment: None,
            phase: PlaybackPhase::Idle,
            state: PlaybackState::default(),
            rng,
        }
    }

    /// Bind to a source, releasing any previous one first.
    ///
    /// The waveform is generated here and kept until the next attach or
    /// detach.
    pub fn attach(&mut self, source: &str) -> Result<(), PlaybackError> {
        self.detach();

        let subscription = self.element.subscribe();
        // On failure the subscription is dropped with this frame.
        self.element.load(source)?;

        let waveform = WaveformModel::synthetic(&mut self.rng);
        self.attachment = Some(Attachment {
            source: source.to_string(),
            waveform,
            subscription,
        });
        tracing::debug!(source, "source attached");

        self.pump();
        Ok(())
    }

    /// Release the current source and reset to idle. No-op when nothing is
    /// attached.
    pub fn detach(&mut self) {
        if let Some(attachment) = self.attachment.take() {
            drop(attachment.subscription);
            self.element.unload();
            tracing::debug!(source = %attachment.source, "source detached");
        }
        self.phase = PlaybackPhase::Idle;
        self.state = PlaybackState::default();
    }

    /// Pause when playing, otherwise start or resume.
    pub fn toggle_playback(&mut self) -> Result<PlaybackPhase, PlaybackError> {
        self.ensure_attached()?;

        if self.phase == PlaybackPhase::Playing {
            self.element.pause();
            self.state.is_playing = false;
            self.phase = PlaybackPhase::Paused;
        } else {
            self.element.play()?;
            self.state.is_playing = true;
            self.phase = PlaybackPhase::Playing;
        }
        Ok(self.phase)
    }

    /// Jump back to the start. Returns `false` without touching the element
    /// when already at the start.
    pub fn restart(&mut self) -> Result<bool, PlaybackError> {
        self.ensure_attached()?;

        if !self.can_restart() {
            return Ok(false);
        }
        self.state.elapsed_seconds = 0.0;
        self.element.seek(0.0);
        Ok(true)
    }

    /// Seek to the leading edge of bar `index` and return the target in
    /// seconds. The elapsed time follows with the element's next update.
    pub fn seek_to_bar(&mut self, index: usize) -> Result<f64, PlaybackError> {
        self.ensure_attached()?;

        if index >= BAR_COUNT {
            return Err(PlaybackError::BarOutOfRange {
                index,
                count: BAR_COUNT,
            });
        }

        let target = WaveformModel::seek_target(index, self.state.total_seconds);
        self.element.seek(target);
        Ok(target)
    }

    /// Apply every event already queued. Returns how many were applied.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Some(event) = self
            .attachment
            .as_mut()
            .and_then(|a| a.subscription.try_next())
        {
            self.apply(event);
            applied += 1;
        }
        applied
    }

    /// Let the element poll its clock, then apply what it emitted.
    pub fn tick(&mut self) -> usize {
        self.element.tick();
        self.pump()
    }

    /// Wait for one event and apply it. `None` when nothing is attached or
    /// the element went away.
    pub async fn next_event(&mut self) -> Option<MediaEvent> {
        let event = self.attachment.as_mut()?.subscription.next().await?;
        self.apply(event);
        Some(event)
    }

    fn apply(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::TimeUpdate { position } => {
                if position.is_finite() && position >= 0.0 {
                    self.state.elapsed_seconds = position;
                }
            }
            MediaEvent::MetadataLoaded { duration } => {
                self.state.total_seconds = if duration.is_finite() && duration > 0.0 {
                    duration
                } else {
                    0.0
                };
                if self.phase == PlaybackPhase::Idle {
                    self.phase = PlaybackPhase::Ready;
                }
            }
            MediaEvent::Ended => {
                self.state.is_playing = false;
                if self.phase == PlaybackPhase::Playing {
                    self.phase = PlaybackPhase::Paused;
                }
            }
        }
    }

    fn ensure_attached(&self) -> Result<(), PlaybackError> {
        if self.attachment.is_none() {
            return Err(PlaybackError::NotAttached);
        }
        Ok(())
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn phase(&self) -> PlaybackPhase {
        self.phase
    }

    pub fn source(&self) -> Option<&str> {
        self.attachment.as_ref().map(|a| a.source.as_str())
    }

    pub fn waveform(&self) -> Option<&WaveformModel> {
        self.attachment.as_ref().map(|a| &a.waveform)
    }

    pub fn can_restart(&self) -> bool {
        self.state.elapsed_seconds > 0.0
    }

    pub fn active_bar_count(&self) -> usize {
        WaveformModel::active_bars(self.state.elapsed_seconds, self.state.total_seconds)
    }

    /// Bar `index` is drawn as played
    pub fn is_bar_active(&self, index: usize) -> bool {
        index < self.active_bar_count()
    }

    pub fn elapsed_display(&self) -> ClockTime {
        self.state.elapsed_clock()
    }

    pub fn total_display(&self) -> ClockTime {
        self.state.total_clock()
    }

    pub fn element(&self) -> &E {
        &self.element
    }

    pub fn element_mut(&mut self) -> &mut E {
        &mut self.element
    }
}

impl<E: MediaElement> Drop for PlaybackEngine<E> {
    fn drop(&mut self) {
        self.detach();
    }
}
