use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use tracing::debug;

// SxxEyy with an optional separator and an optional second episode (SxxEyy-Ezz).
static MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)s([0-9]+)[-_.]?e([0-9]+)(?:[-_.]?e([0-9]+))?")
        .expect("episode marker pattern is valid")
});

/// Season/episode identifier shared by a video and its subtitle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EpisodeKey {
    pub season: u64,
    pub episode: u64,
    pub second_episode: Option<u64>,
}

impl EpisodeKey {
    /// Finds the leftmost episode marker in `stem`.
    ///
    /// Returns `None` when the stem has no marker, which callers treat as a
    /// normal outcome. A marker whose number does not fit a `u64` also
    /// yields `None`, with a debug line saying so.
    pub fn extract(stem: &str) -> Option<Self> {
        let caps = MARKER.captures(stem)?;
        let key = Self::from_digits(&caps[1], &caps[2], caps.get(3).map(|m| m.as_str()));
        if key.is_none() {
            debug!("Marker {:?} in {:?} has a number out of range", &caps[0], stem);
        }
        key
    }

    fn from_digits(season: &str, episode: &str, second: Option<&str>) -> Option<Self> {
        Some(Self {
            season: season.parse().ok()?,
            episode: episode.parse().ok()?,
            second_episode: match second {
                Some(digits) => Some(digits.parse().ok()?),
                None => None,
            },
        })
    }
}

impl fmt::Display for EpisodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{:02}E{:02}", self.season, self.episode)?;
        if let Some(second) = self.second_episode {
            write!(f, "-E{second:02}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(stem: &str) -> Option<String> {
        EpisodeKey::extract(stem).map(|k| k.to_string())
    }

    #[test]
    fn test_separator_variants_normalize_identically() {
        for stem in ["Show.S05E12", "Show.S05-E12", "Show.S05_E12", "Show.S05.E12"] {
            assert_eq!(key(stem).as_deref(), Some("S05E12"), "stem: {stem}");
        }
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(key("show.s01e01.720p"), key("Show.S01E01.720p"));
        assert_eq!(key("show.s01e01").as_deref(), Some("S01E01"));
    }

    #[test]
    fn test_double_episode() {
        assert_eq!(key("Show.S01E02-E03").as_deref(), Some("S01E02-E03"));
        assert_eq!(key("Show.S01E02E03").as_deref(), Some("S01E02-E03"));
        assert_eq!(key("Show.S01E02_e3").as_deref(), Some("S01E02-E03"));
        assert_eq!(key("Show.S01E02").as_deref(), Some("S01E02"));
    }

    #[test]
    fn test_padding_is_a_minimum_width() {
        assert_eq!(key("S1E2").as_deref(), Some("S01E02"));
        assert_eq!(key("S001E0002").as_deref(), Some("S01E02"));
        assert_eq!(key("S02E100").as_deref(), Some("S02E100"));
    }

    #[test]
    fn test_only_leftmost_marker_is_used() {
        assert_eq!(key("Show.S01E01.Recap.S02E05").as_deref(), Some("S01E01"));
    }

    #[test]
    fn test_second_group_needs_digits() {
        assert_eq!(key("Show.S01E02-Extended").as_deref(), Some("S01E02"));
    }

    #[test]
    fn test_no_marker() {
        assert_eq!(key("Random"), None);
        assert_eq!(key("Season 1 Episode 2"), None);
        assert_eq!(key("S01 E02"), None);
    }

    #[test]
    fn test_overflowing_number_is_no_match() {
        let stem = "S99999999999999999999999E01";
        assert!(MARKER.is_match(stem));
        assert_eq!(key(stem), None);
        assert_eq!(
            EpisodeKey::from_digits("99999999999999999999999", "01", None),
            None
        );
        assert_eq!(
            EpisodeKey::from_digits("01", "02", Some("99999999999999999999999")),
            None
        );
    }

    #[test]
    fn test_keys_compare_by_value() {
        assert_eq!(
            EpisodeKey::extract("a.s1e1"),
            EpisodeKey::extract("b.S01.E01")
        );
    }
}
