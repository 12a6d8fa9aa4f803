use vnshelf_core::temporal::DEFAULT_FLOOR_YEAR;
use vnshelf_core::types::{DEFAULT_ORIGIN_LANGUAGE, DEFAULT_PAGE_SIZE};

/// Catalog client configuration loaded from environment variables.
///
/// All fields have defaults suitable for a local catalog service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Base HTTP URL of the catalog service.
    pub api_url: String,
    /// Origin language the release listing is scoped to.
    pub origin_language: String,
    /// Titles per listing page.
    pub page_size: u32,
    /// Earliest year reachable by month navigation.
    pub floor_year: i32,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:5000".into(),
            origin_language: DEFAULT_ORIGIN_LANGUAGE.into(),
            page_size: DEFAULT_PAGE_SIZE,
            floor_year: DEFAULT_FLOOR_YEAR,
        }
    }
}

impl CatalogConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var               | Default                 |
    /// |-----------------------|-------------------------|
    /// | `CATALOG_API_URL`     | `http://localhost:5000` |
    /// | `CATALOG_ORIGIN_LANG` | `ja`                    |
    /// | `CATALOG_PAGE_SIZE`   | `24`                    |
    /// | `CATALOG_FLOOR_YEAR`  | `1985`                  |
    ///
    /// Unparsable numeric values fall back to the default with a warning.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) over an arbitrary lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let api_url = lookup("CATALOG_API_URL")
            .map(|u| u.trim_end_matches('/').to_string())
            .filter(|u| !u.is_empty())
            .unwrap_or(defaults.api_url);

        let origin_language = lookup("CATALOG_ORIGIN_LANG")
            .filter(|l| !l.is_empty())
            .unwrap_or(defaults.origin_language);

        let page_size = parse_or("CATALOG_PAGE_SIZE", &lookup, defaults.page_size).max(1);
        let floor_year = parse_or("CATALOG_FLOOR_YEAR", &lookup, defaults.floor_year);

        Self {
            api_url,
            origin_language,
            page_size,
            floor_year,
        }
    }
}

fn parse_or<T: std::str::FromStr>(
    key: &str,
    lookup: &impl Fn(&str) -> Option<String>,
    default: T,
) -> T {
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "Ignoring unparsable configuration value");
            default
        }),
    }
}
