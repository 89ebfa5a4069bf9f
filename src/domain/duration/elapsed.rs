//! Elapsed seconds value object

use std::fmt;

/// Whole seconds elapsed since a recording started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ElapsedSeconds(u64);

impl ElapsedSeconds {
    pub const fn new(seconds: u64) -> Self {
        Self(seconds)
    }

    pub const fn as_secs(&self) -> u64 {
        self.0
    }

    /// Encode for the API: `"<m>m <s>s"` when there is at least one full
    /// minute, otherwise `"<s>s"`. Minutes never roll over into hours.
    pub fn encode_for_api(&self) -> String {
        let minutes = self.0 / 60;
        let seconds = self.0 % 60;

        if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}

impl From<u64> for ElapsedSeconds {
    fn from(seconds: u64) -> Self {
        Self(seconds)
    }
}

impl From<std::time::Duration> for ElapsedSeconds {
    fn from(duration: std::time::Duration) -> Self {
        Self(duration.as_secs())
    }
}

impl fmt::Display for ElapsedSeconds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode_for_api())
    }
}
