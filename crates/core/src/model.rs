//! Catalog records as returned by the search endpoint.
//!
//! Only the fields the browser consumes are modelled; unknown fields are
//! ignored on deserialisation and every optional field defaults to absent.

use serde::{Deserialize, Serialize};

use crate::maturity::ImageRating;
use crate::spoiler::SpoilerLevel;
use crate::types::CatalogId;

/// An image with its crowd-rated maturity scores.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageAsset {
    #[serde(default)]
    pub id: Option<CatalogId>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub dims: Option<[u32; 2]>,
    #[serde(default)]
    pub sexual: f64,
    #[serde(default)]
    pub violence: f64,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub thumbnail_dims: Option<[u32; 2]>,
}

impl ImageAsset {
    pub fn rating(&self) -> ImageRating {
        ImageRating::new(self.sexual, self.violence)
    }
}

/// One row of the release listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleSummary {
    pub id: CatalogId,
    pub title: String,
    /// `YYYY-MM-DD`, `YYYY-MM`, `YYYY`, or a catalog keyword such as `TBA`.
    #[serde(default)]
    pub released: Option<String>,
    #[serde(default)]
    pub image: Option<ImageAsset>,
}

/// Alternative title of a work in one language.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AltTitle {
    pub lang: String,
    pub title: String,
    #[serde(default)]
    pub latin: Option<String>,
    #[serde(default)]
    pub official: bool,
    #[serde(default)]
    pub main: bool,
}

/// Full record of a title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleDetail {
    pub id: CatalogId,
    pub title: String,
    #[serde(default)]
    pub titles: Vec<AltTitle>,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub released: Option<String>,
    /// Length bucket, `1` (very short) to `5` (very long).
    #[serde(default)]
    pub length: Option<u8>,
    #[serde(default)]
    pub length_minutes: Option<u32>,
    #[serde(default)]
    pub length_votes: Option<u32>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<ImageAsset>,
    #[serde(default)]
    pub screenshots: Vec<Screenshot>,
    #[serde(default)]
    pub publishers: Vec<Publisher>,
    #[serde(default)]
    pub staff: Vec<StaffCredit>,
    #[serde(default)]
    pub characters: Vec<Character>,
}

impl TitleDetail {
    /// The official main-language title, used as a subtitle.
    pub fn original_title(&self) -> Option<&str> {
        self.titles
            .iter()
            .find(|t| t.official && t.main)
            .map(|t| t.title.as_str())
    }
}

/// Release a screenshot was taken from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseRef {
    pub id: CatalogId,
    pub title: String,
}

/// A screenshot of a title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Screenshot {
    #[serde(flatten)]
    pub image: ImageAsset,
    #[serde(default)]
    pub release: Option<ReleaseRef>,
}

/// A company or individual publishing a title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Publisher {
    pub id: CatalogId,
    pub name: String,
    #[serde(default)]
    pub original: Option<String>,
    /// Locales the publisher released in; an empty entry means unknown.
    #[serde(default)]
    pub languages: Vec<String>,
}

/// A person credited on a title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffCredit {
    pub id: CatalogId,
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub note: Option<String>,
}

/// A character's link to one title. Role and spoiler belong to this pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleAssociation {
    /// Title id.
    pub id: CatalogId,
    #[serde(default)]
    pub title: Option<String>,
    pub role: String,
    #[serde(default)]
    pub spoiler: SpoilerLevel,
}

/// A trait applied to a character, with the spoiler of that application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterTrait {
    pub id: CatalogId,
    pub name: String,
    #[serde(default)]
    pub group_id: Option<CatalogId>,
    #[serde(default)]
    pub group_name: Option<String>,
    #[serde(default)]
    pub spoiler: SpoilerLevel,
    #[serde(default)]
    pub lie: bool,
}

/// A voice actor credited for a character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceCredit {
    pub id: CatalogId,
    pub name: String,
    /// Name in the original script.
    #[serde(default)]
    pub original: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

impl VoiceCredit {
    /// Original-script name, falling back to the romanised one.
    pub fn original_or_name(&self) -> &str {
        self.original
            .as_deref()
            .filter(|o| !o.is_empty())
            .unwrap_or(&self.name)
    }
}

/// A character record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: CatalogId,
    pub name: String,
    #[serde(default)]
    pub original: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<ImageAsset>,
    #[serde(default)]
    pub blood_type: Option<String>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub weight: Option<u32>,
    #[serde(default)]
    pub bust: Option<u32>,
    #[serde(default)]
    pub waist: Option<u32>,
    #[serde(default)]
    pub hips: Option<u32>,
    #[serde(default)]
    pub cup: Option<String>,
    /// `[month, day]`.
    #[serde(default)]
    pub birthday: Option<[u32; 2]>,
    #[serde(default)]
    pub vns: Vec<TitleAssociation>,
    #[serde(default)]
    pub traits: Vec<CharacterTrait>,
    #[serde(default)]
    pub seiyuu: Vec<VoiceCredit>,
}

impl Character {
    /// This character's association with `title_id`, if any.
    pub fn association(&self, title_id: &str) -> Option<&TitleAssociation> {
        self.vns.iter().find(|a| a.id == title_id)
    }
}
