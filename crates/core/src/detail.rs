//! Single-line detail rows for the title and character pages.
//!
//! Every row is optional: a record missing the underlying fields yields
//! `None` and the row is left out.

use chrono::Month;

use crate::model::{Character, TitleDetail};
use crate::tables::KeyTable;
use crate::temporal::last_day_of_month;

/// Birthdays carry no year; validate days against a leap year.
const BIRTHDAY_YEAR: i32 = 2000;

/// `Height: 160cm, Weight: 48kg, Bust-Waist-Hips: 82-58-84cm, C cup, Blood Type: A`.
///
/// The bust-waist-hips segment is only shown when all three are known.
pub fn measurements(character: &Character) -> Option<String> {
    let mut parts = Vec::new();
    if let Some(h) = character.height {
        parts.push(format!("Height: {h}cm"));
    }
    if let Some(w) = character.weight {
        parts.push(format!("Weight: {w}kg"));
    }
    if let (Some(b), Some(w), Some(h)) = (character.bust, character.waist, character.hips) {
        parts.push(format!("Bust-Waist-Hips: {b}-{w}-{h}cm"));
    }
    if let Some(cup) = character.cup.as_deref().filter(|c| !c.is_empty()) {
        parts.push(format!("{cup} cup"));
    }
    if let Some(blood) = character.blood_type.as_deref().filter(|b| !b.is_empty()) {
        parts.push(format!("Blood Type: {}", blood.to_uppercase()));
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}

/// `March 5`. Invalid months and days are treated as missing; February 29
/// is accepted.
pub fn birthday(character: &Character) -> Option<String> {
    let [month_number, day] = character.birthday?;
    let month = u8::try_from(month_number)
        .ok()
        .and_then(|m| Month::try_from(m).ok())?;
    if day == 0 || day > last_day_of_month(BIRTHDAY_YEAR, month_number) {
        return None;
    }
    Some(format!("{} {day}", month.name()))
}

/// `Kana Aoi [葵井かな] (young), Rei Kudo [Rei Kudo]`.
///
/// The bracketed name is the original-script name, or the romanised one
/// when the catalog has none. Omitted when no voice actor is credited.
pub fn seiyuu(character: &Character) -> Option<String> {
    if character.seiyuu.is_empty() {
        return None;
    }
    let credits: Vec<String> = character
        .seiyuu
        .iter()
        .map(|va| {
            let mut s = format!("{} [{}]", va.name, va.original_or_name());
            if let Some(note) = va.note.as_deref().filter(|n| !n.is_empty()) {
                s.push_str(&format!(" ({note})"));
            }
            s
        })
        .collect();
    Some(credits.join(", "))
}

/// `Long (12h30m from 40 votes)`.
///
/// The length bucket label and the voted duration are each optional; the
/// row is omitted only when both are.
pub fn play_time(title: &TitleDetail, lengths: &KeyTable) -> Option<String> {
    let label = title
        .length
        .and_then(|code| lengths.label(&code.to_string()).map(str::to_string));

    let duration = title.length_minutes.filter(|&m| m > 0).map(|minutes| {
        let (h, m) = (minutes / 60, minutes % 60);
        let mut s = String::new();
        if h > 0 {
            s.push_str(&format!("{h}h"));
        }
        if m > 0 {
            s.push_str(&format!("{m}m"));
        }
        match title.length_votes {
            Some(votes) => format!("({s} from {votes} votes)"),
            None => format!("({s})"),
        }
    });

    match (label, duration) {
        (None, None) => None,
        (Some(l), None) => Some(l),
        (None, Some(d)) => Some(d),
        (Some(l), Some(d)) => Some(format!("{l} {d}")),
    }
}
