//! # Judgment Scale
//!
//! The five discrete intensities of the fundamental AHP scale. Each level
//! maps directly to its odd numeric value; the reciprocal serves the reverse
//! direction of a comparison.
//!
//! Human-readable labels exist only at the I/O boundary. Inside the crate an
//! `Intensity` is never looked up by string.

use crate::SaatyError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Language used for scale labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Es,
}

impl FromStr for Locale {
    type Err = SaatyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Self::En),
            "es" | "spanish" | "español" => Ok(Self::Es),
            other => Err(SaatyError::UnknownLocale(other.to_string())),
        }
    }
}

/// How much more important one criterion is than another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intensity {
    Equal,
    SlightlyMore,
    ModeratelyMore,
    StronglyMore,
    ExtremelyMore,
}

impl Intensity {
    /// All levels, in ascending order of strength.
    pub const ALL: [Self; 5] = [
        Self::Equal,
        Self::SlightlyMore,
        Self::ModeratelyMore,
        Self::StronglyMore,
        Self::ExtremelyMore,
    ];

    /// The integer scale value (1, 3, 5, 7 or 9).
    #[must_use]
    pub const fn scale(self) -> u8 {
        match self {
            Self::Equal => 1,
            Self::SlightlyMore => 3,
            Self::ModeratelyMore => 5,
            Self::StronglyMore => 7,
            Self::ExtremelyMore => 9,
        }
    }

    /// The matrix entry for the favored direction.
    #[must_use]
    pub fn value(self) -> f64 {
        f64::from(self.scale())
    }

    /// The matrix entry for the reverse direction.
    #[must_use]
    pub fn reciprocal(self) -> f64 {
        1.0 / self.value()
    }

    /// Look up a level by its integer scale value.
    #[must_use]
    pub fn from_scale(scale: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|i| i.scale() == scale)
    }

    /// Stable machine identifier (matches the serde representation).
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Equal => "equal",
            Self::SlightlyMore => "slightly_more",
            Self::ModeratelyMore => "moderately_more",
            Self::StronglyMore => "strongly_more",
            Self::ExtremelyMore => "extremely_more",
        }
    }

    /// Display label in the given language.
    #[must_use]
    pub const fn label(self, locale: Locale) -> &'static str {
        match (locale, self) {
            (Locale::En, Self::Equal) => "Equally important",
            (Locale::En, Self::SlightlyMore) => "Slightly more important",
            (Locale::En, Self::ModeratelyMore) => "Moderately more important",
            (Locale::En, Self::StronglyMore) => "Strongly more important",
            (Locale::En, Self::ExtremelyMore) => "Extremely more important",
            (Locale::Es, Self::Equal) => "Igualmente importante",
            (Locale::Es, Self::SlightlyMore) => "Ligeramente más importante",
            (Locale::Es, Self::ModeratelyMore) => "Bastante más importante",
            (Locale::Es, Self::StronglyMore) => "Considerablemente más importante",
            (Locale::Es, Self::ExtremelyMore) => "Absolutamente más importante",
        }
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Intensity {
    type Err = SaatyError;

    /// Accepts the identifier (`moderately_more`), the scale value (`5`) or a
    /// display label in any supported language.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        if let Ok(scale) = trimmed.parse::<u8>() {
            return Self::from_scale(scale)
                .ok_or_else(|| SaatyError::UnknownIntensity(trimmed.to_string()));
        }

        Self::ALL
            .into_iter()
            .find(|i| {
                i.id().eq_ignore_ascii_case(trimmed)
                    || i.label(Locale::En).eq_ignore_ascii_case(trimmed)
                    || i.label(Locale::Es).eq_ignore_ascii_case(trimmed)
            })
            .ok_or_else(|| SaatyError::UnknownIntensity(trimmed.to_string()))
    }
}

// =============================================================================
// TESTS
// =============================================================================
