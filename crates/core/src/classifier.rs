//! Grouping and ordering of associated-entity lists for presentation.
//!
//! [`classify`] turns a flat list of candidates (characters of a title,
//! traits of a character, publishers of a release, ...) into an ordered list
//! of labelled groups. Filtering only ever removes members; ordering is
//! decided by group keys and member names, never by catalog identifiers.

use std::cmp::Ordering;
use std::collections::HashMap;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::maturity::{self, ImageRating, MaturitySelection, Verdict};
use crate::spoiler::{self, SpoilerLevel};
use crate::tables::KeyTable;

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Classification bucket a candidate belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupKey {
    pub key: String,
    /// Human-readable heading, also the sort key for open key sets.
    pub label: String,
    /// Groups flagged sexual are dropped wholesale unless explicitly shown.
    pub sexual: bool,
}

impl GroupKey {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            sexual: false,
        }
    }

    pub fn sexual(mut self, sexual: bool) -> Self {
        self.sexual = sexual;
        self
    }
}

/// One entity offered for classification.
#[derive(Debug, Clone)]
pub struct Candidate<T> {
    pub group: GroupKey,
    pub name: String,
    /// Spoiler of this association; `None` where spoilers do not apply.
    pub spoiler: Option<SpoilerLevel>,
    /// Maturity rating of an image member; `None` for non-image members.
    pub rating: Option<ImageRating>,
    pub item: T,
}

impl<T> Candidate<T> {
    pub fn new(group: GroupKey, name: impl Into<String>, item: T) -> Self {
        Self {
            group,
            name: name.into(),
            spoiler: None,
            rating: None,
            item,
        }
    }

    pub fn with_spoiler(mut self, spoiler: SpoilerLevel) -> Self {
        self.spoiler = Some(spoiler);
        self
    }

    pub fn with_rating(mut self, rating: ImageRating) -> Self {
        self.rating = Some(rating);
        self
    }
}

/// How groups are ordered.
#[derive(Debug, Clone, Copy)]
pub enum GroupOrder<'a> {
    /// Closed key set in the table's priority order. Keys missing from the
    /// table are not part of the domain and are dropped.
    Priority(&'a KeyTable),
    /// Open key set ordered by group label.
    Alphabetical,
}

/// Viewer settings and ordering policy for one classification.
#[derive(Debug, Clone, Copy)]
pub struct ClassifyOptions<'a> {
    pub order: GroupOrder<'a>,
    pub spoiler_threshold: SpoilerLevel,
    pub maturity: MaturitySelection,
    pub show_sexual: bool,
}

impl<'a> ClassifyOptions<'a> {
    pub fn new(order: GroupOrder<'a>) -> Self {
        Self {
            order,
            spoiler_threshold: SpoilerLevel::None,
            maturity: MaturitySelection::default(),
            show_sexual: false,
        }
    }

    pub fn with_spoiler_threshold(mut self, threshold: SpoilerLevel) -> Self {
        self.spoiler_threshold = threshold;
        self
    }

    pub fn with_maturity(mut self, maturity: MaturitySelection) -> Self {
        self.maturity = maturity;
        self
    }

    pub fn with_sexual(mut self, show_sexual: bool) -> Self {
        self.show_sexual = show_sexual;
        self
    }

    fn admits<T>(&self, candidate: &Candidate<T>) -> bool {
        if candidate.group.sexual && !self.show_sexual {
            return false;
        }
        if let GroupOrder::Priority(table) = self.order {
            if table.position(&candidate.group.key).is_none() {
                return false;
            }
        }
        let spoiler_ok = candidate
            .spoiler
            .map_or(true, |s| spoiler::is_revealed(s, self.spoiler_threshold));
        let maturity_ok = candidate
            .rating
            .map_or(true, |r| maturity::evaluate(r, self.maturity) != Verdict::Block);
        spoiler_ok && maturity_ok
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// A labelled, ordered, non-empty group of members.
#[derive(Debug, Clone, PartialEq)]
pub struct Group<T> {
    pub key: String,
    pub label: String,
    pub members: Vec<T>,
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Locale-style name ordering.
///
/// Names are compared first with accents and case removed (`Émile` sorts
/// with `Emile`), then with accents kept (unaccented first), then by case
/// (lowercase first). Fully equal names compare `Equal` so a stable sort
/// keeps input order.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| accented_letters(a).cmp(accented_letters(b)))
        .then_with(|| b.cmp(a))
}

fn base_letters(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

fn accented_letters(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd().flat_map(char::to_lowercase)
}

/// Filter, group and order `candidates`.
///
/// Sexual groups are dropped when not shown, then each association is
/// checked against the spoiler threshold and each image against the
/// maturity gate (`Block` removes the member). Groups follow
/// [`ClassifyOptions::order`]; members are sorted by name with input order
/// breaking ties. Groups left without members are omitted.
pub fn classify<T, I>(candidates: I, options: &ClassifyOptions<'_>) -> Vec<Group<T>>
where
    I: IntoIterator<Item = Candidate<T>>,
{
    let mut groups: Vec<(GroupKey, Vec<(String, T)>)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for candidate in candidates {
        if !options.admits(&candidate) {
            continue;
        }
        let slot = match index.get(&candidate.group.key) {
            Some(&slot) => slot,
            None => {
                index.insert(candidate.group.key.clone(), groups.len());
                groups.push((candidate.group.clone(), Vec::new()));
                groups.len() - 1
            }
        };
        groups[slot].1.push((candidate.name, candidate.item));
    }

    match options.order {
        GroupOrder::Priority(table) => {
            groups.sort_by_key(|(g, _)| table.position(&g.key).unwrap_or(usize::MAX));
        }
        GroupOrder::Alphabetical => {
            groups.sort_by(|(a, _), (b, _)| compare_names(&a.label, &b.label));
        }
    }

    groups
        .into_iter()
        .filter(|(_, members)| !members.is_empty())
        .map(|(group, mut members)| {
            members.sort_by(|(a, _), (b, _)| compare_names(a, b));
            Group {
                key: group.key,
                label: group.label,
                members: members.into_iter().map(|(_, item)| item).collect(),
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn role(key: &str) -> GroupKey {
        let roles = KeyTable::character_roles();
        GroupKey::new(key, roles.label_or_key(key))
    }

    fn member(key: &str, name: &str, spoiler: SpoilerLevel) -> Candidate<String> {
        Candidate::new(role(key), name, name.to_string()).with_spoiler(spoiler)
    }

    fn keys<T>(groups: &[Group<T>]) -> Vec<&str> {
        groups.iter().map(|g| g.key.as_str()).collect()
    }

    // -- group ordering ------------------------------------------------------

    #[test]
    fn closed_keys_follow_priority_order() {
        let roles = KeyTable::character_roles();
        let groups = classify(
            vec![
                member("side", "Kei", SpoilerLevel::None),
                member("main", "Haru", SpoilerLevel::None),
                member("appears", "Mio", SpoilerLevel::None),
            ],
            &ClassifyOptions::new(GroupOrder::Priority(&roles)),
        );
        assert_eq!(keys(&groups), vec!["main", "side", "appears"]);
        assert_eq!(groups[0].label, "Protagonist");
    }

    #[test]
    fn role_without_qualifying_members_is_omitted() {
        let roles = KeyTable::character_roles();
        let groups = classify(
            vec![
                member("main", "Haru", SpoilerLevel::None),
                member("primary", "Yuki", SpoilerLevel::Major),
                member("side", "Kei", SpoilerLevel::None),
            ],
            &ClassifyOptions::new(GroupOrder::Priority(&roles)),
        );
        assert_eq!(keys(&groups), vec!["main", "side"]);
    }

    #[test]
    fn unknown_closed_key_is_dropped() {
        let roles = KeyTable::character_roles();
        let groups = classify(
            vec![member("cameo", "Ghost", SpoilerLevel::None)],
            &ClassifyOptions::new(GroupOrder::Priority(&roles)),
        );
        assert!(groups.is_empty());
    }

    #[test]
    fn open_keys_sort_by_label_case_insensitively() {
        let groups = classify(
            vec![
                Candidate::new(GroupKey::new("g3", "personality"), "Kind", 1),
                Candidate::new(GroupKey::new("g1", "Hair"), "Blond", 2),
                Candidate::new(GroupKey::new("g2", "Body"), "Pale", 3),
            ],
            &ClassifyOptions::new(GroupOrder::Alphabetical),
        );
        let labels: Vec<&str> = groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["Body", "Hair", "personality"]);
    }

    // -- member ordering -----------------------------------------------------

    #[test]
    fn members_sort_by_name_with_stable_ties() {
        let g = GroupKey::new("x", "X");
        let groups = classify(
            vec![
                Candidate::new(g.clone(), "beta", "first-beta"),
                Candidate::new(g.clone(), "Alpha", "alpha"),
                Candidate::new(g.clone(), "beta", "second-beta"),
            ],
            &ClassifyOptions::new(GroupOrder::Alphabetical),
        );
        assert_eq!(groups[0].members, vec!["alpha", "first-beta", "second-beta"]);
    }

    #[test]
    fn compare_names_folds_case() {
        assert_eq!(compare_names("apple", "Banana"), Ordering::Less);
        assert_eq!(compare_names("a", "A"), Ordering::Less);
        assert_eq!(compare_names("same", "same"), Ordering::Equal);
    }

    #[test]
    fn accented_names_sort_with_their_base_letter() {
        let g = GroupKey::new("x", "X");
        let groups = classify(
            ["Zoe", "\u{c9}mile", "Eve"]
                .into_iter()
                .map(|name| Candidate::new(g.clone(), name, name)),
            &ClassifyOptions::new(GroupOrder::Alphabetical),
        );
        assert_eq!(groups[0].members, vec!["\u{c9}mile", "Eve", "Zoe"]);
    }

    #[test]
    fn unaccented_form_precedes_accented() {
        assert_eq!(compare_names("resume", "r\u{e9}sum\u{e9}"), Ordering::Less);
        assert_eq!(compare_names("r\u{e9}sum\u{e9}", "rf"), Ordering::Less);
    }

    #[test]
    fn accented_labels_order_open_groups() {
        let groups = classify(
            vec![
                Candidate::new(GroupKey::new("fr", "Fran\u{e7}ais"), "A", 1),
                Candidate::new(GroupKey::new("cs", "\u{c8}e\u{161}tina"), "B", 2),
                Candidate::new(GroupKey::new("de", "Deutsch"), "C", 3),
            ],
            &ClassifyOptions::new(GroupOrder::Alphabetical),
        );
        let keys: Vec<&str> = groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["cs", "de", "fr"]);
    }

    // -- filtering -----------------------------------------------------------

    #[test]
    fn spoiler_threshold_reduces_membership() {
        let roles = KeyTable::character_roles();
        let candidates = || {
            vec![
                member("main", "Haru", SpoilerLevel::None),
                member("main", "Akane", SpoilerLevel::Minor),
                member("main", "Shin", SpoilerLevel::Major),
            ]
        };

        let hidden = classify(candidates(), &ClassifyOptions::new(GroupOrder::Priority(&roles)));
        assert_eq!(hidden[0].members, vec!["Haru"]);

        let minor = classify(
            candidates(),
            &ClassifyOptions::new(GroupOrder::Priority(&roles))
                .with_spoiler_threshold(SpoilerLevel::Minor),
        );
        assert_eq!(minor[0].members, vec!["Akane", "Haru"]);
    }

    #[test]
    fn sexual_group_dropped_unless_shown() {
        let candidates = || {
            vec![
                Candidate::new(GroupKey::new("g1", "Hair"), "Blond", "blond"),
                Candidate::new(GroupKey::new("g9", "Engages in (Sexual)").sexual(true), "x", "x"),
            ]
        };

        let hidden = classify(candidates(), &ClassifyOptions::new(GroupOrder::Alphabetical));
        assert_eq!(keys(&hidden), vec!["g1"]);

        let shown = classify(
            candidates(),
            &ClassifyOptions::new(GroupOrder::Alphabetical).with_sexual(true),
        );
        assert_eq!(keys(&shown), vec!["g9", "g1"]);
    }

    #[test]
    fn blocked_images_removed_warned_kept() {
        let g = GroupKey::new("r1", "Release");
        let groups = classify(
            vec![
                Candidate::new(g.clone(), "a", "clean").with_rating(ImageRating::new(0.0, 0.0)),
                Candidate::new(g.clone(), "b", "warn").with_rating(ImageRating::new(0.7, 0.0)),
                Candidate::new(g.clone(), "c", "block").with_rating(ImageRating::new(1.9, 0.0)),
            ],
            &ClassifyOptions::new(GroupOrder::Alphabetical),
        );
        assert_eq!(groups[0].members, vec!["clean", "warn"]);
    }

    #[test]
    fn empty_input_yields_no_groups() {
        let groups: Vec<Group<u8>> =
            classify(Vec::new(), &ClassifyOptions::new(GroupOrder::Alphabetical));
        assert!(groups.is_empty());
    }

    #[test]
    fn classify_is_deterministic() {
        let roles = KeyTable::character_roles();
        let run = || {
            classify(
                vec![
                    member("side", "Kei", SpoilerLevel::None),
                    member("main", "Haru", SpoilerLevel::None),
                    member("side", "Aki", SpoilerLevel::Minor),
                ],
                &ClassifyOptions::new(GroupOrder::Priority(&roles))
                    .with_spoiler_threshold(SpoilerLevel::Major),
            )
        };
        let first = run();
        for _ in 0..10 {
            assert_eq!(run(), first);
        }
    }
}
