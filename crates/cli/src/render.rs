//! Plain-text rendering of listings and detail pages.
//!
//! Every optional row is left out when its data is absent.

use vnshelf_core::classifier::Group;
use vnshelf_core::detail;
use vnshelf_core::maturity::{image_slot, ImageSlot, MaturitySelection, Verdict};
use vnshelf_core::model::{Character, ImageAsset, TitleDetail};
use vnshelf_core::panels::{self, ViewerSettings};
use vnshelf_core::tables::KeyTable;
use vnshelf_core::temporal::{DateSelection, MonthSelection, YearSelection};
use vnshelf_listing::{ListingSnapshot, ListingState};

const INDENT: &str = "  ";

/// `2024-02`, `2024` or `All years`.
pub fn date_label(date: &DateSelection) -> String {
    match (date.year, date.month) {
        (YearSelection::All, _) => "All years".to_string(),
        (YearSelection::Year(y), MonthSelection::All) => format!("{y:04}"),
        (YearSelection::Year(y), MonthSelection::Month(m)) => format!("{y:04}-{m:02}"),
    }
}

pub fn slot_label(slot: &ImageSlot<'_>) -> String {
    match slot {
        ImageSlot::Blocked => "[image blocked]".to_string(),
        ImageSlot::Warned => "[mature image hidden]".to_string(),
        ImageSlot::Missing => "[no image]".to_string(),
        ImageSlot::Visible(image) => image.url.clone().unwrap_or_default(),
    }
}

fn image_line(image: Option<&ImageAsset>, maturity: MaturitySelection) -> String {
    slot_label(&image_slot(image, maturity))
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

pub fn listing(snapshot: &ListingSnapshot) -> String {
    let query = &snapshot.query;
    let mut lines = Vec::new();

    match &snapshot.state {
        ListingState::Idle => lines.push("Nothing requested.".to_string()),
        ListingState::Loading => lines.push("Loading...".to_string()),
        ListingState::Empty => {
            lines.push(format!("Releases {}", date_label(&query.date)));
            lines.push("No titles found.".to_string());
        }
        ListingState::Error { message } => lines.push(message.clone()),
        ListingState::Ready {
            total_pages, count, ..
        } => {
            lines.push(format!(
                "Releases {} (page {} of {}, {} titles)",
                date_label(&query.date),
                query.page,
                total_pages,
                count
            ));
            for entry in snapshot.visible_results() {
                let released = entry.title.released.as_deref().unwrap_or("TBA");
                lines.push(format!(
                    "{INDENT}{:<8} {:<10} {}",
                    entry.title.id, released, entry.title.title
                ));
                lines.push(format!("{INDENT}{INDENT}{}", slot_label(&entry.cover)));
            }
            if !snapshot.can_navigate_months {
                lines.push("Month navigation unavailable for this selection.".to_string());
            }
        }
    }
    lines.join("\n")
}

// ---------------------------------------------------------------------------
// Detail pages
// ---------------------------------------------------------------------------

fn push_groups<T>(
    lines: &mut Vec<String>,
    heading: &str,
    groups: &[Group<T>],
    member: impl Fn(&T) -> String,
) {
    if groups.is_empty() {
        return;
    }
    lines.push(String::new());
    lines.push(heading.to_string());
    for group in groups {
        let label = if group.label.is_empty() {
            "Unknown"
        } else {
            group.label.as_str()
        };
        lines.push(format!("{INDENT}{label}"));
        for m in &group.members {
            lines.push(format!("{INDENT}{INDENT}{}", member(m)));
        }
    }
}

pub fn title(detail_record: &TitleDetail, viewer: &ViewerSettings) -> String {
    let mut lines = vec![format!("{} ({})", detail_record.title, detail_record.id)];
    if let Some(original) = detail_record.original_title() {
        lines.push(original.to_string());
    }
    if !detail_record.aliases.is_empty() {
        lines.push(format!("Aliases: {}", detail_record.aliases.join(", ")));
    }
    if let Some(released) = &detail_record.released {
        lines.push(format!("Released: {released}"));
    }
    if let Some(play_time) = detail::play_time(detail_record, &KeyTable::lengths()) {
        lines.push(format!("Play time: {play_time}"));
    }
    lines.push(format!(
        "Cover: {}",
        image_line(detail_record.image.as_ref(), viewer.maturity)
    ));
    if let Some(description) = &detail_record.description {
        lines.push(String::new());
        lines.push(description.clone());
    }

    let publishers =
        panels::publishers_by_language(&detail_record.publishers, &KeyTable::languages());
    push_groups(&mut lines, "Publishers", &publishers, |p| p.name.clone());

    let staff = panels::title_staff(detail_record, &KeyTable::staff_roles());
    push_groups(&mut lines, "Staff", &staff, |s| match &s.note {
        Some(note) if !note.is_empty() => format!("{} ({note})", s.name),
        _ => s.name.clone(),
    });

    let characters =
        panels::title_characters(detail_record, &KeyTable::character_roles(), viewer);
    push_groups(&mut lines, "Characters", &characters, |c| {
        format!(
            "{} {}",
            c.name,
            image_line(c.image.as_ref(), viewer.maturity)
        )
    });

    let screenshots = panels::title_screenshots(detail_record, viewer);
    push_groups(&mut lines, "Screenshots", &screenshots, |s| match s.verdict {
        Verdict::Warn => "[mature image hidden]".to_string(),
        _ => s.screenshot.image.url.clone().unwrap_or_default(),
    });

    lines.join("\n")
}

pub fn character(record: &Character, viewer: &ViewerSettings) -> String {
    let mut lines = vec![format!("{} ({})", record.name, record.id)];
    if let Some(original) = &record.original {
        lines.push(original.clone());
    }
    if let Some(measurements) = detail::measurements(record) {
        lines.push(measurements);
    }
    if let Some(birthday) = detail::birthday(record) {
        lines.push(format!("Birthday: {birthday}"));
    }
    if let Some(seiyuu) = detail::seiyuu(record) {
        lines.push(format!("Seiyuu: {seiyuu}"));
    }
    lines.push(format!(
        "Portrait: {}",
        image_line(record.image.as_ref(), viewer.maturity)
    ));
    if let Some(description) = &record.description {
        lines.push(String::new());
        lines.push(description.clone());
    }

    let traits = panels::character_traits(record, viewer);
    push_groups(&mut lines, "Traits", &traits, |t| t.name.clone());

    let roles = KeyTable::character_roles();
    let titles = panels::character_titles(record, viewer);
    push_groups(&mut lines, "Appears in", &titles, |a| {
        roles.label_or_key(&a.role).to_string()
    });

    lines.join("\n")
}
