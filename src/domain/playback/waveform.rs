//! Synthetic waveform model
//!
//! The bars are decorative: their heights are random and say nothing about
//! the audio signal. They only exist so playback position has something to
//! fill and to click on. Deriving heights from real amplitude data would
//! replace [`WaveformModel::synthetic`] and nothing else.

use rand::Rng;

/// Number of bars in a waveform
pub const BAR_COUNT: usize = 45;

/// Lowest bar height, in percent of the bar area
pub const MIN_BAR_HEIGHT: u8 = 15;

/// Highest bar height, in percent of the bar area
pub const MAX_BAR_HEIGHT: u8 = 100;

/// Fixed-size bar heights generated once per attached source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaveformModel {
    bar_heights: [u8; BAR_COUNT],
}

impl WaveformModel {
    pub fn synthetic<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut bar_heights = [0u8; BAR_COUNT];
        for height in bar_heights.iter_mut() {
            *height = rng.gen_range(MIN_BAR_HEIGHT..=MAX_BAR_HEIGHT);
        }
        Self { bar_heights }
    }

    pub fn bar_heights(&self) -> &[u8] {
        &self.bar_heights
    }

    pub const fn len(&self) -> usize {
        BAR_COUNT
    }

    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Number of bars drawn as played for the given position: bar `i` is
    /// active iff `i < progress * N`. An unknown or zero duration leaves
    /// every bar inactive.
    pub fn active_bars(elapsed_seconds: f64, total_seconds: f64) -> usize {
        if !total_seconds.is_finite() || total_seconds <= 0.0 || !elapsed_seconds.is_finite() {
            return 0;
        }
        let filled = elapsed_seconds * BAR_COUNT as f64 / total_seconds;
        if filled <= 0.0 {
            0
        } else {
            (filled.ceil() as usize).min(BAR_COUNT)
        }
    }

    /// Position in seconds at the leading edge of bar `index`.
    /// Always finite; zero when the duration is unknown.
    pub fn seek_target(index: usize, total_seconds: f64) -> f64 {
        if !total_seconds.is_finite() || total_seconds <= 0.0 {
            return 0.0;
        }
        index as f64 * total_seconds / BAR_COUNT as f64
    }
}
