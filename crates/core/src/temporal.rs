//! Release-date selection, catalog date filters, and month navigation.
//!
//! The catalog stores release dates at day, month, or year precision. A
//! whole-month or whole-year query therefore matches a day-level range OR the
//! bare partial date, since `2024` never falls inside `2024-01-01..2024-12-31`.

use std::fmt;

use chrono::{Datelike, NaiveDate};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Address-parameter sentinel meaning "no constraint on this field".
pub const SENTINEL: &str = "00";

/// Earliest catalog year reachable through month navigation.
pub const DEFAULT_FLOOR_YEAR: i32 = 1985;

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// Year part of a date selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum YearSelection {
    /// Sentinel `"00"`: every year.
    All,
    Year(i32),
}

/// Month part of a date selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MonthSelection {
    /// Sentinel `"00"`: every month of the selected year.
    All,
    /// Calendar month, `1..=12`.
    Month(u32),
}

/// A viewer's year/month choice for the release listing.
///
/// When the year is [`YearSelection::All`] the month is ignored; the
/// constructors and [`DateSelection::parse`] normalise it to
/// [`MonthSelection::All`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateSelection {
    pub year: YearSelection,
    pub month: MonthSelection,
}

impl DateSelection {
    /// No date constraint at all.
    pub fn all() -> Self {
        Self {
            year: YearSelection::All,
            month: MonthSelection::All,
        }
    }

    /// A whole calendar year.
    pub fn year(year: i32) -> Self {
        Self {
            year: YearSelection::Year(year),
            month: MonthSelection::All,
        }
    }

    /// A single month of a year.
    pub fn month(year: i32, month: u32) -> Self {
        Self {
            year: YearSelection::Year(year),
            month: MonthSelection::Month(month),
        }
    }

    /// The month of `date`.
    pub fn containing(date: NaiveDate) -> Self {
        Self::month(date.year(), date.month())
    }

    /// Parse the `year` / `month` address parameters.
    ///
    /// `year` is four ASCII digits or `"00"`; `month` is `"01"`..`"12"` or
    /// `"00"`. Range checks against the catalog bounds are not done here.
    pub fn parse(year: &str, month: &str) -> Result<Self, CoreError> {
        if year == SENTINEL {
            return Ok(Self::all());
        }
        if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CoreError::Validation(format!(
                "year must be four digits or '{SENTINEL}', got '{year}'"
            )));
        }
        let y: i32 = year
            .parse()
            .map_err(|_| CoreError::Validation(format!("invalid year '{year}'")))?;

        if month == SENTINEL {
            return Ok(Self::year(y));
        }
        let m: u32 = match (month.len(), month.parse::<u32>()) {
            (2, Ok(m)) if (1..=12).contains(&m) => m,
            _ => {
                return Err(CoreError::Validation(format!(
                    "month must be '01'..'12' or '{SENTINEL}', got '{month}'"
                )))
            }
        };
        Ok(Self::month(y, m))
    }

    /// Value for the `year` address parameter.
    pub fn year_param(&self) -> String {
        match self.year {
            YearSelection::All => SENTINEL.to_string(),
            YearSelection::Year(y) => format!("{y:04}"),
        }
    }

    /// Value for the `month` address parameter. Always the sentinel when
    /// the year is unconstrained.
    pub fn month_param(&self) -> String {
        match (self.year, self.month) {
            (YearSelection::All, _) | (_, MonthSelection::All) => SENTINEL.to_string(),
            (_, MonthSelection::Month(m)) => format!("{m:02}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Bounds
// ---------------------------------------------------------------------------

/// Inclusive year range the listing may navigate to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogBounds {
    pub floor_year: i32,
    pub ceiling_year: i32,
}

impl CatalogBounds {
    pub fn new(floor_year: i32, ceiling_year: i32) -> Self {
        Self {
            floor_year,
            ceiling_year: ceiling_year.max(floor_year),
        }
    }

    /// Bounds with the ceiling at the year after `today` (announced titles).
    pub fn for_date(floor_year: i32, today: NaiveDate) -> Self {
        Self::new(floor_year, today.year() + 1)
    }

    /// Bounds relative to the local calendar date.
    pub fn current(floor_year: i32) -> Self {
        Self::for_date(floor_year, chrono::Local::now().date_naive())
    }

    pub fn clamp_year(&self, year: i32) -> i32 {
        year.clamp(self.floor_year, self.ceiling_year)
    }
}

// ---------------------------------------------------------------------------
// Filter
// ---------------------------------------------------------------------------

/// A catalog release date stored below day precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartialDate {
    Year(i32),
    YearMonth(i32, u32),
}

impl fmt::Display for PartialDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Year(y) => write!(f, "{y:04}"),
            Self::YearMonth(y, m) => write!(f, "{y:04}-{m:02}"),
        }
    }
}

/// Release-date constraint handed to the catalog search.
///
/// Renders in the catalog filter grammar: `>=`/`<=`/`=` comparators, `+`
/// for conjunction and `,` for disjunction. [`DateFilter::Unbounded`]
/// renders as the empty string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFilter {
    Unbounded,
    Window {
        start: NaiveDate,
        end: NaiveDate,
        partial: PartialDate,
    },
}

impl DateFilter {
    pub fn is_unbounded(&self) -> bool {
        matches!(self, Self::Unbounded)
    }
}

impl fmt::Display for DateFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unbounded => Ok(()),
            Self::Window {
                start,
                end,
                partial,
            } => write!(
                f,
                "(>={}+<={}),(={partial})",
                start.format("%Y-%m-%d"),
                end.format("%Y-%m-%d"),
            ),
        }
    }
}

/// Number of days in `month` of `year` under Gregorian leap-year rules.
///
/// `month` is clamped to `1..=12`.
pub fn last_day_of_month(year: i32, month: u32) -> u32 {
    let month = month.clamp(1, 12);
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map_or(31, |d| d.day())
}

/// Build the release-date filter for a selection.
///
/// Years outside `bounds` and months outside `1..=12` are clamped to the
/// nearest valid value.
pub fn build_date_filter(selection: &DateSelection, bounds: &CatalogBounds) -> DateFilter {
    let year = match selection.year {
        YearSelection::All => return DateFilter::Unbounded,
        YearSelection::Year(y) => bounds.clamp_year(y),
    };

    let window = match selection.month {
        MonthSelection::All => (
            NaiveDate::from_ymd_opt(year, 1, 1),
            NaiveDate::from_ymd_opt(year, 12, 31),
            PartialDate::Year(year),
        ),
        MonthSelection::Month(m) => {
            let m = m.clamp(1, 12);
            (
                NaiveDate::from_ymd_opt(year, m, 1),
                NaiveDate::from_ymd_opt(year, m, last_day_of_month(year, m)),
                PartialDate::YearMonth(year, m),
            )
        }
    };

    match window {
        (Some(start), Some(end), partial) => DateFilter::Window {
            start,
            end,
            partial,
        },
        // Only reachable for years outside chrono's range.
        _ => DateFilter::Unbounded,
    }
}

// ---------------------------------------------------------------------------
// Month navigation
// ---------------------------------------------------------------------------

/// Resolve a selection to a concrete in-bounds `(year, month)` pair, or
/// `None` when either part is a sentinel.
fn concrete_month(selection: &DateSelection, bounds: &CatalogBounds) -> Option<(i32, u32)> {
    match (selection.year, selection.month) {
        (YearSelection::Year(y), MonthSelection::Month(m)) => {
            Some((bounds.clamp_year(y), m.clamp(1, 12)))
        }
        _ => None,
    }
}

/// The month after `selection`, or `None` if navigation is unavailable
/// (sentinel selection) or the ceiling's December has been reached.
pub fn next_month(selection: &DateSelection, bounds: &CatalogBounds) -> Option<DateSelection> {
    let (year, month) = concrete_month(selection, bounds)?;
    if month == 12 {
        if year >= bounds.ceiling_year {
            return None;
        }
        Some(DateSelection::month(year + 1, 1))
    } else {
        Some(DateSelection::month(year, month + 1))
    }
}

/// The month before `selection`, or `None` if navigation is unavailable
/// (sentinel selection) or the floor's January has been reached.
pub fn previous_month(selection: &DateSelection, bounds: &CatalogBounds) -> Option<DateSelection> {
    let (year, month) = concrete_month(selection, bounds)?;
    if month == 1 {
        if year <= bounds.floor_year {
            return None;
        }
        Some(DateSelection::month(year - 1, 12))
    } else {
        Some(DateSelection::month(year, month - 1))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> CatalogBounds {
        CatalogBounds::new(DEFAULT_FLOOR_YEAR, 2026)
    }

    fn filter(year: &str, month: &str) -> String {
        let selection = DateSelection::parse(year, month).unwrap();
        build_date_filter(&selection, &bounds()).to_string()
    }

    // -- build_date_filter ---------------------------------------------------

    #[test]
    fn all_years_has_no_constraint() {
        assert_eq!(filter("00", "00"), "");
        let selection = DateSelection::parse("00", "00").unwrap();
        assert!(build_date_filter(&selection, &bounds()).is_unbounded());
    }

    #[test]
    fn sentinel_year_ignores_month() {
        assert_eq!(filter("00", "05"), "");
    }

    #[test]
    fn whole_year_matches_range_or_bare_year() {
        assert_eq!(filter("2024", "00"), "(>=2024-01-01+<=2024-12-31),(=2024)");
    }

    #[test]
    fn single_month_matches_range_or_year_month() {
        assert_eq!(filter("2023", "07"), "(>=2023-07-01+<=2023-07-31),(=2023-07)");
        assert_eq!(filter("2023", "04"), "(>=2023-04-01+<=2023-04-30),(=2023-04)");
    }

    #[test]
    fn february_follows_leap_years() {
        assert_eq!(filter("2024", "02"), "(>=2024-02-01+<=2024-02-29),(=2024-02)");
        assert_eq!(filter("2023", "02"), "(>=2023-02-01+<=2023-02-28),(=2023-02)");
    }

    #[test]
    fn out_of_range_year_is_clamped() {
        let early = build_date_filter(&DateSelection::year(1900), &bounds());
        assert_eq!(early.to_string(), "(>=1985-01-01+<=1985-12-31),(=1985)");

        let late = build_date_filter(&DateSelection::month(2099, 3), &bounds());
        assert_eq!(late.to_string(), "(>=2026-03-01+<=2026-03-31),(=2026-03)");
    }

    #[test]
    fn out_of_range_month_is_clamped() {
        let f = build_date_filter(&DateSelection::month(2020, 14), &bounds());
        assert_eq!(f.to_string(), "(>=2020-12-01+<=2020-12-31),(=2020-12)");
    }

    #[test]
    fn filter_is_deterministic() {
        let selection = DateSelection::month(2024, 2);
        let first = build_date_filter(&selection, &bounds());
        for _ in 0..10 {
            assert_eq!(build_date_filter(&selection, &bounds()), first);
        }
    }

    // -- last_day_of_month ---------------------------------------------------

    #[test]
    fn last_day_uses_calendar_rules() {
        assert_eq!(last_day_of_month(2024, 2), 29);
        assert_eq!(last_day_of_month(2023, 2), 28);
        assert_eq!(last_day_of_month(1900, 2), 28);
        assert_eq!(last_day_of_month(2000, 2), 29);
        assert_eq!(last_day_of_month(2023, 12), 31);
        assert_eq!(last_day_of_month(2023, 11), 30);
    }

    // -- parse ---------------------------------------------------------------

    #[test]
    fn parse_accepts_sentinels_and_digits() {
        assert_eq!(DateSelection::parse("00", "00").unwrap(), DateSelection::all());
        assert_eq!(DateSelection::parse("2024", "00").unwrap(), DateSelection::year(2024));
        assert_eq!(DateSelection::parse("2024", "09").unwrap(), DateSelection::month(2024, 9));
    }

    #[test]
    fn parse_rejects_malformed_values() {
        assert!(DateSelection::parse("24", "01").is_err());
        assert!(DateSelection::parse("20x4", "01").is_err());
        assert!(DateSelection::parse("2024", "13").is_err());
        assert!(DateSelection::parse("2024", "1").is_err());
        assert!(DateSelection::parse("2024", "").is_err());
    }

    #[test]
    fn params_round_trip_through_strings() {
        let selection = DateSelection::month(2024, 3);
        assert_eq!(selection.year_param(), "2024");
        assert_eq!(selection.month_param(), "03");
        assert_eq!(DateSelection::all().month_param(), "00");
    }

    // -- navigation ----------------------------------------------------------

    #[test]
    fn next_month_rolls_over_year() {
        let next = next_month(&DateSelection::month(2024, 12), &bounds());
        assert_eq!(next, Some(DateSelection::month(2025, 1)));
    }

    #[test]
    fn previous_month_rolls_back_year() {
        let prev = previous_month(&DateSelection::month(2024, 1), &bounds());
        assert_eq!(prev, Some(DateSelection::month(2023, 12)));
    }

    #[test]
    fn previous_month_refused_at_floor() {
        assert_eq!(previous_month(&DateSelection::month(1985, 1), &bounds()), None);
        assert_eq!(
            previous_month(&DateSelection::month(1985, 2), &bounds()),
            Some(DateSelection::month(1985, 1))
        );
    }

    #[test]
    fn next_month_refused_at_ceiling() {
        assert_eq!(next_month(&DateSelection::month(2026, 12), &bounds()), None);
        assert_eq!(
            next_month(&DateSelection::month(2026, 11), &bounds()),
            Some(DateSelection::month(2026, 12))
        );
    }

    #[test]
    fn navigation_unavailable_for_sentinels() {
        assert_eq!(next_month(&DateSelection::year(2024), &bounds()), None);
        assert_eq!(previous_month(&DateSelection::all(), &bounds()), None);
    }

    #[test]
    fn navigation_clamps_out_of_range_start() {
        assert_eq!(next_month(&DateSelection::month(2090, 12), &bounds()), None);
        assert_eq!(
            previous_month(&DateSelection::month(1900, 6), &bounds()),
            Some(DateSelection::month(1985, 5))
        );
    }

    #[test]
    fn ceiling_is_year_after_today() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let b = CatalogBounds::for_date(DEFAULT_FLOOR_YEAR, today);
        assert_eq!(b.ceiling_year, 2027);
        assert_eq!(b.floor_year, 1985);
    }
}
