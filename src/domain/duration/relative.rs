//! Relative-past phrases ("5 minutes ago")

use std::fmt;

/// Time units understood in a relative-past phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum PastUnit {
    Minute,
    Hour,
    Day,
}

impl PastUnit {
    /// Parse an English unit, returning whether it was plural.
    fn parse(word: &str) -> Option<(Self, bool)> {
        match word.to_ascii_lowercase().as_str() {
            "minute" => Some((Self::Minute, false)),
            "minutes" => Some((Self::Minute, true)),
            "hour" => Some((Self::Hour, false)),
            "hours" => Some((Self::Hour, true)),
            "day" => Some((Self::Day, false)),
            "days" => Some((Self::Day, true)),
            _ => None,
        }
    }

    const fn translated(&self, plural: bool) -> &'static str {
        match (self, plural) {
            (Self::Minute, false) => "minuto",
            (Self::Minute, true) => "minutos",
            (Self::Hour, false) => "hora",
            (Self::Hour, true) => "horas",
            (Self::Day, false) => "dia",
            (Self::Day, true) => "dias",
        }
    }
}

/// A phrase of the form `"<N> <unit> ago"` as produced by the API.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RelativePast {
    raw: String,
}

impl RelativePast {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Re-render for display as `"<N> <unidade> atrás"`.
    ///
    /// The unit keeps the number of the source word (`"minutes"` becomes
    /// `"minutos"`). Anything that is not exactly a count, a known unit and
    /// `ago` is returned unchanged.
    pub fn translate(&self) -> String {
        self.parse()
            .map(|(count, unit, plural)| format!("{} {} atrás", count, unit.translated(plural)))
            .unwrap_or_else(|| self.raw.clone())
    }

    fn parse(&self) -> Option<(&str, PastUnit, bool)> {
        let mut words = self.raw.split_whitespace();
        let count = words.next()?;
        let unit = words.next()?;
        let ago = words.next()?;

        if words.next().is_some()
            || count.is_empty()
            || !count.bytes().all(|b| b.is_ascii_digit())
            || !ago.eq_ignore_ascii_case("ago")
        {
            return None;
        }

        let (unit, plural) = PastUnit::parse(unit)?;
        Some((count, unit, plural))
    }
}

impl From<&str> for RelativePast {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl fmt::Display for RelativePast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn translate(input: &str) -> String {
        RelativePast::from(input).translate()
    }

    #[test]
    fn plural_minutes() {
        assert_eq!(translate("5 minutes ago"), "5 minutos atrás");
    }

    #[test]
    fn singular_hour() {
        assert_eq!(translate("1 hour ago"), "1 hora atrás");
    }

    #[test]
    fn days() {
        assert_eq!(translate("3 days ago"), "3 dias atrás");
        assert_eq!(translate("1 day ago"), "1 dia atrás");
    }

    #[test]
    fn extra_whitespace_is_tolerated() {
        assert_eq!(translate("  2   hours ago "), "2 horas atrás");
    }

    #[test]
    fn unrecognized_passes_through() {
        assert_eq!(translate("yesterday"), "yesterday");
        assert_eq!(translate("5 weeks ago"), "5 weeks ago");
        assert_eq!(translate("five minutes ago"), "five minutes ago");
        assert_eq!(translate("5 minutes from now"), "5 minutes from now");
        assert_eq!(translate(""), "");
    }

    #[test]
    fn trailing_words_pass_through() {
        assert_eq!(translate("5 minutes ago today"), "5 minutes ago today");
    }
}
