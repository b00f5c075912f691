//! Output bar frequency.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Bar frequency of the output table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    /// One bar per UTC calendar day.
    #[default]
    Daily,
    /// One bar per week ending Sunday.
    Weekly,
}

impl Frequency {
    /// Returns the frequency as a string identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
        }
    }

    /// Returns true for weekly bars.
    #[must_use]
    pub const fn is_weekly(&self) -> bool {
        matches!(self, Self::Weekly)
    }

    /// Returns all available frequencies.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Daily, Self::Weekly]
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = FrequencyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" | "day" | "d1" | "1d" => Ok(Self::Daily),
            "weekly" | "week" | "w1" | "1w" => Ok(Self::Weekly),
            _ => Err(FrequencyParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an invalid frequency string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyParseError(String);

impl std::fmt::Display for FrequencyParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid frequency '{}', expected one of: daily, weekly",
            self.0
        )
    }
}

impl std::error::Error for FrequencyParseError {}
