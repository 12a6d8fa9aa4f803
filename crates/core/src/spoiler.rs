//! Spoiler ratings and the per-association spoiler gate.
//!
//! A spoiler rating belongs to a character-to-title or trait-to-character
//! association, never to the entity itself: the same character can be
//! harmless in one title and a major reveal in its sequel.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Spoiler ordinal, totally ordered `None < Minor < Major`.
///
/// Doubles as the viewer's threshold. Deserialises from the catalog's
/// integer encoding; values above 2 saturate to [`SpoilerLevel::Major`].
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(from = "u8", into = "u8")]
pub enum SpoilerLevel {
    #[default]
    None = 0,
    Minor = 1,
    Major = 2,
}

impl From<u8> for SpoilerLevel {
    fn from(value: u8) -> Self {
        match value {
            0 => Self::None,
            1 => Self::Minor,
            _ => Self::Major,
        }
    }
}

impl From<SpoilerLevel> for u8 {
    fn from(level: SpoilerLevel) -> Self {
        level as u8
    }
}

impl FromStr for SpoilerLevel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "0" => Ok(Self::None),
            "1" => Ok(Self::Minor),
            "2" => Ok(Self::Major),
            other => Err(CoreError::Validation(format!(
                "spoiler level must be 0, 1 or 2, got '{other}'"
            ))),
        }
    }
}

/// Whether an association rated `rating` is shown to a viewer whose
/// threshold is `threshold`.
pub fn is_revealed(rating: SpoilerLevel, threshold: SpoilerLevel) -> bool {
    rating <= threshold
}
