//! Maturity levels and the per-image maturity gate.
//!
//! The catalog crowd-rates every image on two independent axes, sexual and
//! violence, each scored in `[0, 2]`. A viewer picks a three-tier threshold
//! per axis and each image resolves to show, warn, or block.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::model::ImageAsset;

// ---------------------------------------------------------------------------
// Score cut-offs
// ---------------------------------------------------------------------------

/// Scores strictly above this are blocked unless the axis is at its most
/// permissive tier.
pub const BLOCK_ABOVE: f64 = 1.0;

/// Scores strictly above this warn when the axis is at its most
/// restrictive tier.
pub const WARN_ABOVE: f64 = 0.5;

/// Upper bound of a crowd-rated score.
pub const MAX_SCORE: f64 = 2.0;

// ---------------------------------------------------------------------------
// Levels
// ---------------------------------------------------------------------------

/// Viewer threshold on the sexual axis.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SexualLevel {
    #[default]
    Safe,
    Suggestive,
    Explicit,
}

/// Viewer threshold on the violence axis.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ViolenceLevel {
    #[default]
    Tame,
    Violent,
    Brutal,
}

impl SexualLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Safe => "safe",
            Self::Suggestive => "suggestive",
            Self::Explicit => "explicit",
        }
    }
}

impl ViolenceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tame => "tame",
            Self::Violent => "violent",
            Self::Brutal => "brutal",
        }
    }
}

impl fmt::Display for SexualLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ViolenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SexualLevel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "safe" => Ok(Self::Safe),
            "suggestive" => Ok(Self::Suggestive),
            "explicit" => Ok(Self::Explicit),
            other => Err(CoreError::Validation(format!(
                "Unknown sexual level: '{other}'. Valid levels: safe, suggestive, explicit"
            ))),
        }
    }
}

impl FromStr for ViolenceLevel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tame" => Ok(Self::Tame),
            "violent" => Ok(Self::Violent),
            "brutal" => Ok(Self::Brutal),
            other => Err(CoreError::Validation(format!(
                "Unknown violence level: '{other}'. Valid levels: tame, violent, brutal"
            ))),
        }
    }
}

/// The viewer's thresholds on both axes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MaturitySelection {
    pub sexual: SexualLevel,
    pub violence: ViolenceLevel,
}

impl MaturitySelection {
    pub fn new(sexual: SexualLevel, violence: ViolenceLevel) -> Self {
        Self { sexual, violence }
    }
}

// ---------------------------------------------------------------------------
// Gate
// ---------------------------------------------------------------------------

/// Crowd-rated intensity of one image.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ImageRating {
    pub sexual: f64,
    pub violence: f64,
}

impl ImageRating {
    /// Scores are clamped into `[0, MAX_SCORE]`.
    pub fn new(sexual: f64, violence: f64) -> Self {
        Self {
            sexual: sexual.clamp(0.0, MAX_SCORE),
            violence: violence.clamp(0.0, MAX_SCORE),
        }
    }
}

/// Outcome of the maturity gate for one image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    Show,
    Warn,
    Block,
}

/// Evaluate one image against the viewer's thresholds.
///
/// `Block` takes precedence over `Warn`. The most permissive tier never
/// blocks on its axis; the most restrictive tier only warns on mid-range
/// scores and blocks the top range.
pub fn evaluate(rating: ImageRating, selection: MaturitySelection) -> Verdict {
    let block = (selection.sexual != SexualLevel::Explicit && rating.sexual > BLOCK_ABOVE)
        || (selection.violence != ViolenceLevel::Brutal && rating.violence > BLOCK_ABOVE);
    if block {
        return Verdict::Block;
    }

    let warn = (selection.sexual == SexualLevel::Safe && rating.sexual > WARN_ABOVE)
        || (selection.violence == ViolenceLevel::Tame && rating.violence > WARN_ABOVE);
    if warn {
        Verdict::Warn
    } else {
        Verdict::Show
    }
}

/// What a cover or portrait slot displays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ImageSlot<'a> {
    Blocked,
    Warned,
    Missing,
    Visible(&'a ImageAsset),
}

/// Resolve an optional image to a slot: blocked, then warned, then missing,
/// then visible. An absent image is rated zero on both axes.
pub fn image_slot(image: Option<&ImageAsset>, selection: MaturitySelection) -> ImageSlot<'_> {
    let rating = image.map(ImageAsset::rating).unwrap_or_default();
    match evaluate(rating, selection) {
        Verdict::Block => ImageSlot::Blocked,
        Verdict::Warn => ImageSlot::Warned,
        Verdict::Show => match image {
            Some(img) if img.url.is_some() => ImageSlot::Visible(img),
            _ => ImageSlot::Missing,
        },
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
