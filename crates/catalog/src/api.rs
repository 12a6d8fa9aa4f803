//! HTTP client for the catalog search endpoints.
//!
//! Every endpoint takes a JSON [`SearchRequest`] via `POST` and answers
//! with a [`SearchPage`]. Listings use the `small` projection (title,
//! release date, cover); single-record lookups use the `large` one.

use serde::de::DeserializeOwned;
use vnshelf_core::model::{Character, TitleDetail, TitleSummary};

use crate::config::CatalogConfig;
use crate::error::CatalogError;
use crate::query::{SearchPage, SearchRequest};
use crate::transport::CatalogTransport;

const TITLE_LISTING_PATH: &str = "small/vn";
const TITLE_DETAIL_PATH: &str = "large/vn";
const CHARACTER_DETAIL_PATH: &str = "large/character";

/// HTTP client for a single catalog service.
#[derive(Debug, Clone)]
pub struct CatalogApi {
    client: reqwest::Client,
    api_url: String,
}

impl CatalogApi {
    /// * `api_url` - Base HTTP URL, e.g. `http://localhost:5000`.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), api_url)
    }

    /// Create an API client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, api_url: impl Into<String>) -> Self {
        let api_url = api_url.into().trim_end_matches('/').to_string();
        Self { client, api_url }
    }

    pub fn from_config(config: &CatalogConfig) -> Self {
        Self::new(config.api_url.clone())
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// One page of a title listing.
    pub async fn search_titles(
        &self,
        request: &SearchRequest,
    ) -> Result<SearchPage<TitleSummary>, CatalogError> {
        self.post(TITLE_LISTING_PATH, request).await
    }

    /// Full title record by id.
    pub async fn get_title(&self, id: &str) -> Result<Option<TitleDetail>, CatalogError> {
        self.lookup(TITLE_DETAIL_PATH, id).await
    }

    /// Full character record by id.
    pub async fn get_character(&self, id: &str) -> Result<Option<Character>, CatalogError> {
        self.lookup(CHARACTER_DETAIL_PATH, id).await
    }

    // ---- private helpers ----

    async fn lookup<T: DeserializeOwned>(
        &self,
        path: &str,
        id: &str,
    ) -> Result<Option<T>, CatalogError> {
        let page: SearchPage<T> = self.post(path, &SearchRequest::by_id(id)).await?;
        Ok(page.results.into_iter().next())
    }

    async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        request: &SearchRequest,
    ) -> Result<SearchPage<T>, CatalogError> {
        let url = format!("{}/{path}", self.api_url);
        tracing::debug!(%url, page = request.page, released = %request.released, "Catalog search");

        let response = self.client.post(url).json(request).send().await?;
        let page: SearchPage<T> = Self::parse_response(response).await?;

        tracing::debug!(path, count = page.count, returned = page.results.len(), "Catalog search done");
        Ok(page)
    }

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`CatalogError::Api`]
    /// containing the status and body text on failure.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, CatalogError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(CatalogError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, CatalogError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}

impl CatalogTransport for CatalogApi {
    async fn search_titles(
        &self,
        request: &SearchRequest,
    ) -> Result<SearchPage<TitleSummary>, CatalogError> {
        CatalogApi::search_titles(self, request).await
    }

    async fn title(&self, id: &str) -> Result<Option<TitleDetail>, CatalogError> {
        self.get_title(id).await
    }

    async fn character(&self, id: &str) -> Result<Option<Character>, CatalogError> {
        self.get_character(id).await
    }
}
