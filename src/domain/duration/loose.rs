//! Loosely formatted `h`/`m`/`s` duration strings

use std::fmt;

/// A duration written as optional `<n>h`, `<n>m` and `<n>s` tokens,
/// e.g. `"1h2m3s"`, `"5m"` or `"2h 10s"`.
///
/// Kept as the raw text: the tokens are only ever extracted for display,
/// never added up.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LooseDuration {
    raw: String,
}

impl LooseDuration {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Render as `HH:MM:SS`.
    ///
    /// Each component is looked up independently; a missing one becomes
    /// `00`. Values are not carried, so `"90m"` renders as `00:90:00`.
    pub fn normalize(&self) -> String {
        let hours = pad(component(&self.raw, 'h'));
        let minutes = pad(component(&self.raw, 'm'));
        let seconds = pad(component(&self.raw, 's'));
        format!("{}:{}:{}", hours, minutes, seconds)
    }
}

impl From<&str> for LooseDuration {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl fmt::Display for LooseDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// First run of ASCII digits immediately followed by `unit`.
fn component(input: &str, unit: char) -> Option<&str> {
    let mut start = None;

    for (i, ch) in input.char_indices() {
        if ch.is_ascii_digit() {
            start.get_or_insert(i);
            continue;
        }
        if let Some(s) = start.take() {
            if ch.eq_ignore_ascii_case(&unit) {
                return Some(&input[s..i]);
            }
        }
    }

    // Trailing digits have no unit after them.
    None
}

fn pad(digits: Option<&str>) -> String {
    format!("{:0>2}", digits.unwrap_or("0"))
}
