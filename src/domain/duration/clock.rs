//! Clock time display value object

use std::fmt;

/// A duration broken down for `HH:MM:SS` display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClockTime {
    hours: u64,
    minutes: u64,
    seconds: u64,
}

impl ClockTime {
    /// Break raw seconds down by floor division: hours, then minutes, then
    /// seconds. NaN, infinite and negative input yield `00:00:00`.
    pub fn from_seconds(raw: f64) -> Self {
        if !raw.is_finite() || raw <= 0.0 {
            return Self::default();
        }

        let total = raw.floor() as u64;
        Self {
            hours: total / 3600,
            minutes: (total % 3600) / 60,
            seconds: total % 60,
        }
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hours, self.minutes, self.seconds
        )
    }
}
