//! Playback state value objects

use std::fmt;

use crate::domain::duration::ClockTime;

/// Lifecycle of the attached source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlaybackPhase {
    /// No metadata loaded yet
    #[default]
    Idle,
    /// Duration known, never started
    Ready,
    Playing,
    Paused,
}

impl PlaybackPhase {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Ready => "ready",
            Self::Playing => "playing",
            Self::Paused => "paused",
        }
    }
}

impl fmt::Display for PlaybackPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What the UI shows for the current source
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlaybackState {
    pub elapsed_seconds: f64,
    pub total_seconds: f64,
    pub is_playing: bool,
}

impl PlaybackState {
    pub fn elapsed_clock(&self) -> ClockTime {
        ClockTime::from_seconds(self.elapsed_seconds)
    }

    pub fn total_clock(&self) -> ClockTime {
        ClockTime::from_seconds(self.total_seconds)
    }
}
