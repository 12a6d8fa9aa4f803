/// Catalog identifiers carry a one-letter type prefix (`v17`, `c102`, `i44`).
pub type CatalogId = String;

/// Number of titles requested per listing page.
pub const DEFAULT_PAGE_SIZE: u32 = 24;

/// Origin language used to scope the release listing.
pub const DEFAULT_ORIGIN_LANGUAGE: &str = "ja";
