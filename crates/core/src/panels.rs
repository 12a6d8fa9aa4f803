//! Classification panels of the title and character detail pages.
//!
//! Each function maps catalog records onto [`classify`] candidates: it
//! decides the group key, label, spoiler and rating of every member, and
//! the ordering policy of the panel.

use crate::classifier::{classify, Candidate, ClassifyOptions, Group, GroupKey, GroupOrder};
use crate::maturity::{self, MaturitySelection, SexualLevel, Verdict};
use crate::model::{
    Character, CharacterTrait, Publisher, Screenshot, StaffCredit, TitleAssociation, TitleDetail,
};
use crate::spoiler::SpoilerLevel;
use crate::tables::KeyTable;

/// Group key for publishers whose locale is unknown.
pub const OTHER_LANGUAGE: &str = "other";

/// Group key for screenshots not tied to a release.
pub const UNKNOWN_RELEASE: &str = "";

/// Viewer settings shared by every panel of a detail page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewerSettings {
    pub spoiler: SpoilerLevel,
    pub maturity: MaturitySelection,
}

impl ViewerSettings {
    pub fn new(spoiler: SpoilerLevel, maturity: MaturitySelection) -> Self {
        Self { spoiler, maturity }
    }

    /// Sexual trait groups are only listed for explicit viewers.
    pub fn shows_sexual_traits(&self) -> bool {
        self.maturity.sexual == SexualLevel::Explicit
    }

    fn options<'a>(&self, order: GroupOrder<'a>) -> ClassifyOptions<'a> {
        ClassifyOptions::new(order)
            .with_spoiler_threshold(self.spoiler)
            .with_maturity(self.maturity)
            .with_sexual(self.shows_sexual_traits())
    }
}

/// Whether a trait group label names a sexual category.
pub fn is_sexual_group(label: &str) -> bool {
    label.to_lowercase().contains("sexual")
}

// ---------------------------------------------------------------------------
// Title page
// ---------------------------------------------------------------------------

/// Characters of `title` grouped by their role in it.
///
/// Role and spoiler come from each character's association with this title;
/// characters without one are dropped.
pub fn title_characters<'a>(
    title: &'a TitleDetail,
    roles: &KeyTable,
    settings: &ViewerSettings,
) -> Vec<Group<&'a Character>> {
    let candidates = title.characters.iter().filter_map(|character| {
        let assoc = character.association(&title.id)?;
        let group = GroupKey::new(assoc.role.as_str(), roles.label_or_key(&assoc.role));
        Some(Candidate::new(group, character.name.as_str(), character).with_spoiler(assoc.spoiler))
    });
    classify(candidates, &settings.options(GroupOrder::Priority(roles)))
}

/// Staff of `title` grouped by credit role.
pub fn title_staff<'a>(title: &'a TitleDetail, roles: &KeyTable) -> Vec<Group<&'a StaffCredit>> {
    let candidates = title.staff.iter().map(|credit| {
        let group = GroupKey::new(credit.role.as_str(), roles.label_or_key(&credit.role));
        Candidate::new(group, credit.name.as_str(), credit)
    });
    classify(candidates, &ClassifyOptions::new(GroupOrder::Priority(roles)))
}

/// Publishers grouped by locale, ordered by language name.
///
/// A publisher is listed once per language it released in; an empty
/// language entry falls into [`OTHER_LANGUAGE`].
pub fn publishers_by_language<'a>(
    publishers: &'a [Publisher],
    languages: &KeyTable,
) -> Vec<Group<&'a Publisher>> {
    let candidates = publishers.iter().flat_map(|publisher| {
        publisher.languages.iter().map(move |lang| {
            let key = if lang.is_empty() {
                OTHER_LANGUAGE
            } else {
                lang.as_str()
            };
            let group = GroupKey::new(key, languages.label_or_key(key));
            Candidate::new(group, publisher.name.as_str(), publisher)
        })
    });
    classify(candidates, &ClassifyOptions::new(GroupOrder::Alphabetical))
}

/// A screenshot that passed the maturity gate, with its verdict.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GatedScreenshot<'a> {
    pub screenshot: &'a Screenshot,
    /// `Show` or `Warn`; blocked screenshots never reach a group.
    pub verdict: Verdict,
}

/// Screenshots grouped by release title. Blocked images are removed.
pub fn title_screenshots<'a>(
    title: &'a TitleDetail,
    settings: &ViewerSettings,
) -> Vec<Group<GatedScreenshot<'a>>> {
    let candidates = title.screenshots.iter().map(|screenshot| {
        let (key, label) = match &screenshot.release {
            Some(release) => (release.id.as_str(), release.title.as_str()),
            None => (UNKNOWN_RELEASE, UNKNOWN_RELEASE),
        };
        let rating = screenshot.image.rating();
        let gated = GatedScreenshot {
            screenshot,
            verdict: maturity::evaluate(rating, settings.maturity),
        };
        // Screenshots have no name; the url keeps member order reproducible.
        let name = screenshot.image.url.as_deref().unwrap_or_default();
        Candidate::new(GroupKey::new(key, label), name, gated).with_rating(rating)
    });
    classify(candidates, &settings.options(GroupOrder::Alphabetical))
}

// ---------------------------------------------------------------------------
// Character page
// ---------------------------------------------------------------------------

/// Traits of `character` grouped by trait group, ordered by group name.
///
/// Traits without a group are dropped. Groups whose name marks them sexual
/// are only listed for explicit viewers.
pub fn character_traits<'a>(
    character: &'a Character,
    settings: &ViewerSettings,
) -> Vec<Group<&'a CharacterTrait>> {
    let candidates = character.traits.iter().filter_map(|t| {
        let (group_id, group_name) = (t.group_id.as_deref()?, t.group_name.as_deref()?);
        let group = GroupKey::new(group_id, group_name).sexual(is_sexual_group(group_name));
        Some(Candidate::new(group, t.name.as_str(), t).with_spoiler(t.spoiler))
    });
    classify(candidates, &settings.options(GroupOrder::Alphabetical))
}

/// Titles `character` appears in, grouped by title name.
///
/// Each appearance is gated by the spoiler of that association.
pub fn character_titles<'a>(
    character: &'a Character,
    settings: &ViewerSettings,
) -> Vec<Group<&'a TitleAssociation>> {
    let candidates = character.vns.iter().map(|assoc| {
        let name = assoc.title.as_deref().unwrap_or(assoc.id.as_str());
        Candidate::new(GroupKey::new(name, name), name, assoc).with_spoiler(assoc.spoiler)
    });
    classify(candidates, &settings.options(GroupOrder::Alphabetical))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maturity::ViolenceLevel;

    fn title() -> TitleDetail {
        serde_json::from_value(serde_json::json!({
            "id": "v10",
            "title": "Winter Lights",
            "characters": [
                { "id": "c1", "name": "Saki", "vns": [
                    { "id": "v10", "role": "side", "spoiler": 0 }
                ]},
                { "id": "c2", "name": "Rin", "vns": [
                    { "id": "v10", "role": "main", "spoiler": 0 },
                    { "id": "v11", "role": "side", "spoiler": 2 }
                ]},
                { "id": "c3", "name": "Ayu", "vns": [
                    { "id": "v10", "role": "appears", "spoiler": 0 }
                ]},
                { "id": "c4", "name": "Mystery", "vns": [
                    { "id": "v10", "role": "primary", "spoiler": 2 }
                ]},
                { "id": "c5", "name": "Stranger", "vns": [
                    { "id": "v99", "role": "main", "spoiler": 0 }
                ]}
            ],
            "staff": [
                { "id": "s1", "name": "Tanaka", "role": "music" },
                { "id": "s2", "name": "Ito", "role": "scenario" },
                { "id": "s3", "name": "Abe", "role": "scenario" }
            ],
            "publishers": [
                { "id": "p1", "name": "Northlight", "languages": ["ja", "en"] },
                { "id": "p2", "name": "Aurora Games", "languages": ["en"] },
                { "id": "p3", "name": "Doujin Circle", "languages": [""] }
            ],
            "screenshots": [
                { "url": "https://img/b.jpg", "sexual": 0.0, "violence": 0.0,
                  "release": { "id": "r1", "title": "Standard" } },
                { "url": "https://img/a.jpg", "sexual": 0.8, "violence": 0.0,
                  "release": { "id": "r1", "title": "Standard" } },
                { "url": "https://img/c.jpg", "sexual": 1.6, "violence": 0.0,
                  "release": { "id": "r2", "title": "Deluxe" } }
            ]
        }))
        .expect("fixture should deserialise")
    }

    fn names<T>(group: &Group<T>, f: impl Fn(&T) -> &str) -> Vec<String> {
        group.members.iter().map(|m| f(m).to_string()).collect()
    }

    // -- title_characters ----------------------------------------------------

    #[test]
    fn characters_grouped_by_role_priority() {
        let t = title();
        let groups = title_characters(&t, &KeyTable::character_roles(), &ViewerSettings::default());
        let keys: Vec<&str> = groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["main", "side", "appears"]);
        assert_eq!(names(&groups[0], |c| c.name.as_str()), vec!["Rin"]);
    }

    #[test]
    fn character_spoiler_is_per_title() {
        let t = title();
        let spoil_all = ViewerSettings::new(SpoilerLevel::Major, MaturitySelection::default());
        let groups = title_characters(&t, &KeyTable::character_roles(), &spoil_all);
        let keys: Vec<&str> = groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["main", "primary", "side", "appears"]);
        // Rin is a major spoiler in v11 but not here.
        assert_eq!(names(&groups[0], |c| c.name.as_str()), vec!["Rin"]);
    }

    #[test]
    fn unassociated_characters_dropped() {
        let t = title();
        let spoil_all = ViewerSettings::new(SpoilerLevel::Major, MaturitySelection::default());
        let groups = title_characters(&t, &KeyTable::character_roles(), &spoil_all);
        assert!(groups
            .iter()
            .flat_map(|g| g.members.iter())
            .all(|c| c.name != "Stranger"));
    }

    // -- title_staff ---------------------------------------------------------

    #[test]
    fn staff_follows_credit_order() {
        let t = title();
        let groups = title_staff(&t, &KeyTable::staff_roles());
        let labels: Vec<&str> = groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["Scenario", "Composer"]);
        assert_eq!(names(&groups[0], |s| s.name.as_str()), vec!["Abe", "Ito"]);
    }

    // -- publishers_by_language ----------------------------------------------

    #[test]
    fn publishers_listed_per_language_by_label() {
        let t = title();
        let groups = publishers_by_language(&t.publishers, &KeyTable::languages());
        let labels: Vec<&str> = groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["English", "Japanese", "Other"]);
        assert_eq!(names(&groups[0], |p| p.name.as_str()), vec!["Aurora Games", "Northlight"]);
        assert_eq!(names(&groups[1], |p| p.name.as_str()), vec!["Northlight"]);
    }

    // -- title_screenshots ---------------------------------------------------

    #[test]
    fn screenshots_gated_and_grouped_by_release() {
        let t = title();
        let groups = title_screenshots(&t, &ViewerSettings::default());
        assert_eq!(groups.len(), 1, "deluxe only had a blocked screenshot");
        assert_eq!(groups[0].label, "Standard");
        let verdicts: Vec<Verdict> = groups[0].members.iter().map(|m| m.verdict).collect();
        assert_eq!(verdicts, vec![Verdict::Warn, Verdict::Show]);
    }

    #[test]
    fn explicit_viewer_sees_every_screenshot() {
        let t = title();
        let settings = ViewerSettings::new(
            SpoilerLevel::None,
            MaturitySelection::new(SexualLevel::Explicit, ViolenceLevel::Brutal),
        );
        let groups = title_screenshots(&t, &settings);
        let labels: Vec<&str> = groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["Deluxe", "Standard"]);
    }

    // -- character_traits ----------------------------------------------------

    fn character() -> Character {
        serde_json::from_value(serde_json::json!({
            "id": "c2",
            "name": "Rin",
            "traits": [
                { "id": "i1", "name": "Twin Tails", "group_id": "i0", "group_name": "Hair", "spoiler": 0 },
                { "id": "i2", "name": "Black", "group_id": "i0", "group_name": "Hair", "spoiler": 0 },
                { "id": "i3", "name": "Secretly Royal", "group_id": "i5", "group_name": "Role", "spoiler": 2 },
                { "id": "i4", "name": "Virgin", "group_id": "i9", "group_name": "Engages in (Sexual)", "spoiler": 0 },
                { "id": "i6", "name": "Ungrouped", "spoiler": 0 }
            ],
            "vns": [
                { "id": "v10", "title": "Winter Lights", "role": "main", "spoiler": 0 },
                { "id": "v11", "title": "Winter Lights After", "role": "side", "spoiler": 2 }
            ]
        }))
        .expect("fixture should deserialise")
    }

    #[test]
    fn traits_grouped_with_spoilers_and_sexual_hidden() {
        let c = character();
        let groups = character_traits(&c, &ViewerSettings::default());
        let labels: Vec<&str> = groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["Hair"]);
        assert_eq!(names(&groups[0], |t| t.name.as_str()), vec!["Black", "Twin Tails"]);
    }

    #[test]
    fn explicit_viewer_sees_sexual_traits() {
        let c = character();
        let settings = ViewerSettings::new(
            SpoilerLevel::Major,
            MaturitySelection::new(SexualLevel::Explicit, ViolenceLevel::Tame),
        );
        let groups = character_traits(&c, &settings);
        let labels: Vec<&str> = groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["Engages in (Sexual)", "Hair", "Role"]);
    }

    #[test]
    fn sexual_group_detection_ignores_case() {
        assert!(is_sexual_group("Engages in (Sexual)"));
        assert!(is_sexual_group("SEXUAL"));
        assert!(!is_sexual_group("Personality"));
    }

    // -- character_titles ----------------------------------------------------

    #[test]
    fn character_titles_gated_per_association() {
        let c = character();
        let groups = character_titles(&c, &ViewerSettings::default());
        let labels: Vec<&str> = groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["Winter Lights"]);

        let spoil = ViewerSettings::new(SpoilerLevel::Major, MaturitySelection::default());
        assert_eq!(character_titles(&c, &spoil).len(), 2);
    }
}
