//! Wire types of the catalog search endpoint.

use serde::{Deserialize, Serialize};
use vnshelf_core::temporal::DateFilter;
use vnshelf_core::types::CatalogId;

/// Sort key for release listings.
pub const SORT_RELEASED: &str = "released";

/// Sort key for identifier lookups.
pub const SORT_ID: &str = "id";

/// Body of a search request.
///
/// `released` uses the catalog filter grammar (see [`DateFilter`]); the
/// empty string means no release-date constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<CatalogId>,
    pub released: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub olang: Option<String>,
    pub sort: String,
    pub reverse: bool,
    pub page: u32,
    pub limit: u32,
}

impl SearchRequest {
    /// Newest-first listing of titles released inside `filter`.
    pub fn releases(filter: &DateFilter, origin_language: &str, page: u32, limit: u32) -> Self {
        Self {
            id: None,
            released: filter.to_string(),
            olang: Some(origin_language.to_string()),
            sort: SORT_RELEASED.to_string(),
            reverse: true,
            page: page.max(1),
            limit: limit.max(1),
        }
    }

    /// Lookup of a single record by identifier.
    pub fn by_id(id: impl Into<CatalogId>) -> Self {
        Self {
            id: Some(id.into()),
            released: String::new(),
            olang: None,
            sort: SORT_ID.to_string(),
            reverse: false,
            page: 1,
            limit: 1,
        }
    }
}

/// One page of search results plus the total match count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchPage<T> {
    pub results: Vec<T>,
    pub count: u64,
}

impl<T> SearchPage<T> {
    /// `ceil(count / page_size)`, never less than 1.
    pub fn total_pages(&self, page_size: u32) -> u32 {
        let size = u64::from(page_size.max(1));
        let pages = self.count.div_ceil(size).max(1);
        u32::try_from(pages).unwrap_or(u32::MAX)
    }
}
