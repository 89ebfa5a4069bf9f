//! Playback domain module

mod state;
mod waveform;

pub use state::{PlaybackPhase, PlaybackState};
pub use waveform::{WaveformModel, BAR_COUNT, MAX_BAR_HEIGHT, MIN_BAR_HEIGHT};
