//! Match modes for filter rules.

use crate::domain::error::PetdeskError;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// How a rule value is compared against a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    StartsWith,
    Contains,
    NotContains,
    EndsWith,
    Equals,
    NotEquals,
}

impl MatchMode {
    /// Command and config name of the mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StartsWith => "starts_with",
            Self::Contains => "contains",
            Self::NotContains => "not_contains",
            Self::EndsWith => "ends_with",
            Self::Equals => "equals",
            Self::NotEquals => "not_equals",
        }
    }

    /// Tests `value` against a non-empty rule `needle`.
    ///
    /// Empty needles are handled by the caller (an inactive rule matches
    /// everything), so they are never passed here in practice.
    #[must_use]
    pub fn matches(self, value: &str, needle: &str, case_sensitive: bool) -> bool {
        let (value, needle) = fold(value, needle, case_sensitive);
        match self {
            Self::StartsWith => value.starts_with(needle.as_ref()),
            Self::Contains => value.contains(needle.as_ref()),
            Self::NotContains => !value.contains(needle.as_ref()),
            Self::EndsWith => value.ends_with(needle.as_ref()),
            Self::Equals => value == needle,
            Self::NotEquals => value != needle,
        }
    }

    /// Character range of `value` that a positive match covers.
    ///
    /// Negative modes never highlight anything.
    #[must_use]
    pub fn match_range(self, value: &str, needle: &str, case_sensitive: bool) -> Option<(usize, usize)> {
        if needle.is_empty() || !self.matches(value, needle, case_sensitive) {
            return None;
        }
        let (folded, folded_needle) = fold(value, needle, case_sensitive);
        let byte_start = match self {
            Self::StartsWith | Self::Equals => 0,
            Self::Contains => folded.find(folded_needle.as_ref())?,
            Self::EndsWith => folded.len() - folded_needle.len(),
            Self::NotContains | Self::NotEquals => return None,
        };
        let start = folded[..byte_start].chars().count();
        let end = (start + folded_needle.chars().count()).min(value.chars().count());
        Some((start, end))
    }
}

fn fold<'a>(value: &'a str, needle: &'a str, case_sensitive: bool) -> (Cow<'a, str>, Cow<'a, str>) {
    if case_sensitive {
        (Cow::Borrowed(value), Cow::Borrowed(needle))
    } else {
        (Cow::Owned(value.to_lowercase()), Cow::Owned(needle.to_lowercase()))
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchMode {
    type Err = PetdeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "starts_with" | "startswith" => Ok(Self::StartsWith),
            "contains" => Ok(Self::Contains),
            "not_contains" | "notcontains" => Ok(Self::NotContains),
            "ends_with" | "endswith" => Ok(Self::EndsWith),
            "equals" => Ok(Self::Equals),
            "not_equals" | "notequals" => Ok(Self::NotEquals),
            other => Err(PetdeskError::Config(format!("unknown match mode: {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modes_are_case_sensitive_by_default() {
        assert!(MatchMode::Contains.matches("Fido", "id", true));
        assert!(!MatchMode::Contains.matches("Fido", "FI", true));
        assert!(MatchMode::Contains.matches("Fido", "FI", false));
        assert!(MatchMode::StartsWith.matches("Rex", "R", true));
        assert!(!MatchMode::StartsWith.matches("Rex", "r", true));
    }

    #[test]
    fn negative_and_exact_modes() {
        assert!(MatchMode::NotContains.matches("dog", "cat", true));
        assert!(MatchMode::EndsWith.matches("bulldog", "dog", true));
        assert!(MatchMode::Equals.matches("dog", "dog", true));
        assert!(MatchMode::NotEquals.matches("dog", "Dog", true));
        assert!(!MatchMode::NotEquals.matches("dog", "Dog", false));
    }

    #[test]
    fn match_range_counts_characters() {
        assert_eq!(MatchMode::Contains.match_range("Größe", "ße", true), Some((3, 5)));
        assert_eq!(MatchMode::EndsWith.match_range("bulldog", "dog", true), Some((4, 7)));
        assert_eq!(MatchMode::NotContains.match_range("dog", "cat", true), None);
        assert_eq!(MatchMode::Contains.match_range("dog", "cat", true), None);
    }

    #[test]
    fn parses_mode_names() {
        assert_eq!("starts-with".parse::<MatchMode>().unwrap(), MatchMode::StartsWith);
        assert_eq!("Contains".parse::<MatchMode>().unwrap(), MatchMode::Contains);
        assert!("fuzzy".parse::<MatchMode>().is_err());
    }
}
