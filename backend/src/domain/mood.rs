use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the viewer felt while watching. Persisted as its short code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Warm,
    Melancholy,
    Thrilled,
    Reflective,
    Joyful,
    Unsettled,
    Dreamy,
    Profound,
}

impl Mood {
    pub const ALL: [Mood; 8] = [
        Mood::Warm,
        Mood::Melancholy,
        Mood::Thrilled,
        Mood::Reflective,
        Mood::Joyful,
        Mood::Unsettled,
        Mood::Dreamy,
        Mood::Profound,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Warm => "warm",
            Mood::Melancholy => "melancholy",
            Mood::Thrilled => "thrilled",
            Mood::Reflective => "reflective",
            Mood::Joyful => "joyful",
            Mood::Unsettled => "unsettled",
            Mood::Dreamy => "dreamy",
            Mood::Profound => "profound",
        }
    }

    /// Blank input means "no mood recorded".
    pub fn parse_optional(raw: Option<&str>) -> Result<Option<Mood>, UnknownMood> {
        match raw.map(str::trim) {
            None | Some("") => Ok(None),
            Some(code) => code.parse().map(Some),
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown mood: {0}")]
pub struct UnknownMood(pub String);

impl FromStr for Mood {
    type Err = UnknownMood;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mood::ALL
            .into_iter()
            .find(|mood| mood.as_str() == s)
            .ok_or_else(|| UnknownMood(s.to_string()))
    }
}
