//! The network seam of the listing controller.

use std::future::Future;

use vnshelf_core::model::{Character, TitleDetail, TitleSummary};

use crate::error::CatalogError;
use crate::query::{SearchPage, SearchRequest};

/// Access to the catalog search endpoint.
///
/// [`CatalogApi`](crate::api::CatalogApi) talks HTTP; tests substitute
/// scripted implementations. No ordering guarantee is assumed between
/// concurrent calls.
pub trait CatalogTransport: Send + Sync {
    /// One page of title summaries matching `request`.
    fn search_titles(
        &self,
        request: &SearchRequest,
    ) -> impl Future<Output = Result<SearchPage<TitleSummary>, CatalogError>> + Send;

    /// Full record of one title, or `None` if the id matches nothing.
    fn title(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Option<TitleDetail>, CatalogError>> + Send;

    /// Full record of one character, or `None` if the id matches nothing.
    fn character(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Option<Character>, CatalogError>> + Send;
}
