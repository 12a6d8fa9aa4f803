//! Release-listing state machine.
//!
//! [`ListingController`] owns the viewer's selection (date, page, page
//! size, maturity thresholds), the observable [`ListingState`] and the
//! generation counter that decides which fetch completion is accepted.
//! It performs no I/O: every fetch-triggering transition returns a
//! [`FetchTicket`] the caller executes, and the result is handed back
//! through [`ListingController::complete`].
//!
//! A completion is applied only if its generation is the one most
//! recently issued and still outstanding. Arrival order is irrelevant,
//! and cancelling the superseded ticket is advisory.

use tokio_util::sync::CancellationToken;
use vnshelf_catalog::{CatalogError, SearchPage, SearchRequest};
use vnshelf_core::maturity::{image_slot, ImageSlot, MaturitySelection};
use vnshelf_core::model::TitleSummary;
use vnshelf_core::temporal::{
    build_date_filter, next_month, previous_month, CatalogBounds, DateSelection, MonthSelection,
    YearSelection,
};

/// User-facing message for any failed fetch.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch titles. Please try again.";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Monotonic fetch token. Larger is newer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    pub fn value(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for Generation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Observable state of the listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ListingState {
    /// Nothing requested yet.
    #[default]
    Idle,
    Loading,
    Ready {
        results: Vec<TitleSummary>,
        /// `ceil(count / page_size)`, at least 1.
        total_pages: u32,
        count: u64,
    },
    /// The query matched nothing. Never used for failures.
    Empty,
    Error {
        message: String,
    },
}

impl ListingState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// True once a fetch has settled (`Ready`, `Empty` or `Error`).
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Ready { .. } | Self::Empty | Self::Error { .. })
    }
}

/// The fetch-relevant part of the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingQuery {
    pub date: DateSelection,
    /// 1-based.
    pub page: u32,
    pub page_size: u32,
}

/// Static parameters of a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingSettings {
    pub bounds: CatalogBounds,
    pub origin_language: String,
    pub page_size: u32,
}

/// A fetch the caller must run on the controller's behalf.
#[derive(Debug, Clone)]
pub struct FetchTicket {
    pub generation: Generation,
    pub request: SearchRequest,
    /// Cancelled when a newer ticket supersedes this one.
    pub cancel: CancellationToken,
}

/// Whether a completion changed the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// Superseded or already settled; state untouched.
    Discarded,
}

/// A listing row paired with what its cover slot shows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ListingEntry<'a> {
    pub title: &'a TitleSummary,
    pub cover: ImageSlot<'a>,
}

/// Apply the maturity gate to every row's cover image.
pub fn gate_results(results: &[TitleSummary], maturity: MaturitySelection) -> Vec<ListingEntry<'_>> {
    results
        .iter()
        .map(|title| ListingEntry {
            title,
            cover: image_slot(title.image.as_ref(), maturity),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct ListingController {
    settings: ListingSettings,
    query: ListingQuery,
    maturity: MaturitySelection,
    state: ListingState,
    last_issued: u64,
    /// Generation awaiting completion, if any.
    outstanding: Option<Generation>,
    in_flight: Option<CancellationToken>,
}

impl ListingController {
    /// Create an idle controller. Nothing is fetched until one of the
    /// fetch-triggering methods is called; use [`refresh`](Self::refresh)
    /// for the initial load.
    pub fn new(settings: ListingSettings, date: DateSelection, page: u32) -> Self {
        let page_size = settings.page_size.max(1);
        let date = clamp_selection(date, &settings.bounds);
        Self {
            settings,
            query: ListingQuery {
                date,
                page: page.max(1),
                page_size,
            },
            maturity: MaturitySelection::default(),
            state: ListingState::Idle,
            last_issued: 0,
            outstanding: None,
            in_flight: None,
        }
    }

    pub fn state(&self) -> &ListingState {
        &self.state
    }

    pub fn query(&self) -> ListingQuery {
        self.query
    }

    pub fn maturity(&self) -> MaturitySelection {
        self.maturity
    }

    pub fn settings(&self) -> &ListingSettings {
        &self.settings
    }

    /// The generation a completion must carry to be accepted.
    pub fn outstanding(&self) -> Option<Generation> {
        self.outstanding
    }

    /// Re-fetch the current selection.
    pub fn refresh(&mut self) -> FetchTicket {
        self.issue()
    }

    /// Move to `page`, keeping the date selection.
    pub fn select_page(&mut self, page: u32) -> FetchTicket {
        self.query.page = page.max(1);
        self.issue()
    }

    /// Change the date selection. Always returns to page 1.
    pub fn select_date(&mut self, date: DateSelection) -> FetchTicket {
        self.query.date = clamp_selection(date, &self.settings.bounds);
        self.query.page = 1;
        self.issue()
    }

    /// Change the page size. Returns to page 1 since page boundaries move.
    pub fn set_page_size(&mut self, page_size: u32) -> FetchTicket {
        self.query.page_size = page_size.max(1);
        self.query.page = 1;
        self.issue()
    }

    /// Month navigation is only offered for a concrete year and month.
    pub fn can_navigate_months(&self) -> bool {
        matches!(
            (self.query.date.year, self.query.date.month),
            (YearSelection::Year(_), MonthSelection::Month(_))
        )
    }

    /// Select the following month, or `None` at the ceiling or when the
    /// selection has no concrete month.
    pub fn next_month(&mut self) -> Option<FetchTicket> {
        let date = next_month(&self.query.date, &self.settings.bounds)?;
        Some(self.select_date(date))
    }

    /// Select the preceding month, or `None` at the floor or when the
    /// selection has no concrete month.
    pub fn previous_month(&mut self) -> Option<FetchTicket> {
        let date = previous_month(&self.query.date, &self.settings.bounds)?;
        Some(self.select_date(date))
    }

    /// Change the viewer's maturity thresholds. Never fetches: gating is
    /// applied to the rows already held.
    pub fn set_maturity(&mut self, maturity: MaturitySelection) {
        self.maturity = maturity;
    }

    /// Rows of the current page with their gated cover slots. Empty
    /// unless the state is `Ready`.
    pub fn visible_results(&self) -> Vec<ListingEntry<'_>> {
        match &self.state {
            ListingState::Ready { results, .. } => gate_results(results, self.maturity),
            _ => Vec::new(),
        }
    }

    /// Hand back the outcome of the fetch issued as `generation`.
    pub fn complete(
        &mut self,
        generation: Generation,
        result: Result<SearchPage<TitleSummary>, CatalogError>,
    ) -> Completion {
        if self.outstanding != Some(generation) {
            tracing::debug!(
                generation = generation.value(),
                current = self.last_issued,
                ok = result.is_ok(),
                "Discarding stale listing completion",
            );
            return Completion::Discarded;
        }
        self.outstanding = None;
        self.in_flight = None;

        self.state = match result {
            Ok(page) if page.count == 0 => ListingState::Empty,
            Ok(page) => ListingState::Ready {
                total_pages: page.total_pages(self.query.page_size),
                count: page.count,
                results: page.results,
            },
            Err(e) => {
                tracing::warn!(generation = generation.value(), error = %e, "Listing fetch failed");
                ListingState::Error {
                    message: FETCH_FAILED_MESSAGE.to_string(),
                }
            }
        };
        Completion::Applied
    }

    /// Cancel the outstanding fetch without issuing a new one. Its
    /// completion will be discarded.
    pub fn abandon(&mut self) {
        if let Some(cancel) = self.in_flight.take() {
            cancel.cancel();
        }
        self.outstanding = None;
    }

    fn issue(&mut self) -> FetchTicket {
        if let Some(previous) = self.in_flight.take() {
            previous.cancel();
        }

        self.last_issued += 1;
        let generation = Generation(self.last_issued);
        let cancel = CancellationToken::new();
        self.outstanding = Some(generation);
        self.in_flight = Some(cancel.clone());
        self.state = ListingState::Loading;

        let filter = build_date_filter(&self.query.date, &self.settings.bounds);
        let request = SearchRequest::releases(
            &filter,
            &self.settings.origin_language,
            self.query.page,
            self.query.page_size,
        );

        tracing::debug!(
            generation = generation.value(),
            page = self.query.page,
            released = %request.released,
            "Issuing listing fetch",
        );

        FetchTicket {
            generation,
            request,
            cancel,
        }
    }
}

/// Pull a concrete year inside `bounds`.
fn clamp_selection(date: DateSelection, bounds: &CatalogBounds) -> DateSelection {
    match date.year {
        YearSelection::Year(y) => DateSelection {
            year: YearSelection::Year(bounds.clamp_year(y)),
            month: date.month,
        },
        YearSelection::All => date,
    }
}
