//! Mapping between the listing selection and the address parameters
//! (`year`, `month`, `page`).
//!
//! The address itself is an injected [`ParamStore`]; [`MemoryParams`] is
//! the in-process implementation used by the CLI and tests.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{Datelike, NaiveDate};
use vnshelf_core::error::CoreError;
use vnshelf_core::temporal::DateSelection;

pub const YEAR_PARAM: &str = "year";
pub const MONTH_PARAM: &str = "month";
pub const PAGE_PARAM: &str = "page";

/// Get/set access to string parameters of the current address.
pub trait ParamStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

/// Shared in-memory parameter map. Clones see the same values.
#[derive(Debug, Clone, Default)]
pub struct MemoryParams {
    values: Arc<Mutex<BTreeMap<String, String>>>,
}

impl MemoryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            values: Arc::new(Mutex::new(map)),
        }
    }

    /// Copy of every parameter currently set.
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ParamStore for MemoryParams {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
    }
}

/// Selection decoded from the address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressSelection {
    pub date: DateSelection,
    pub page: u32,
}

/// Decode the address parameters.
///
/// A missing `year` or `month` defaults to the month of `today`; a missing,
/// unparsable or zero `page` defaults to 1. Malformed `year`/`month`
/// values are rejected.
pub fn read_selection(
    store: &impl ParamStore,
    today: NaiveDate,
) -> Result<AddressSelection, CoreError> {
    let year = store
        .get(YEAR_PARAM)
        .unwrap_or_else(|| format!("{:04}", today.year()));
    let month = store
        .get(MONTH_PARAM)
        .unwrap_or_else(|| format!("{:02}", today.month()));
    let date = DateSelection::parse(&year, &month)?;

    let page = store
        .get(PAGE_PARAM)
        .and_then(|p| p.trim().parse::<u32>().ok())
        .filter(|&p| p >= 1)
        .unwrap_or(1);

    Ok(AddressSelection { date, page })
}

/// Record a date change. Any changed `year`/`month` is written together
/// with `page = 1`; nothing is written when the date is unchanged.
pub fn write_date(store: &impl ParamStore, previous: &DateSelection, next: &DateSelection) {
    let mut changed = false;
    if previous.year_param() != next.year_param() {
        store.set(YEAR_PARAM, &next.year_param());
        changed = true;
    }
    if previous.month_param() != next.month_param() {
        store.set(MONTH_PARAM, &next.month_param());
        changed = true;
    }
    if changed {
        store.set(PAGE_PARAM, "1");
    }
}

/// Record a page change. Only `page` is written.
pub fn write_page(store: &impl ParamStore, page: u32) {
    store.set(PAGE_PARAM, &page.max(1).to_string());
}
