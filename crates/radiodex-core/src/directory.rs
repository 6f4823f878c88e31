//! Directory client — queries the radio-browser directory service.
//!
//! Three endpoint shapes, first match wins:
//!   both fields set  → `stations/search?country=<c>&tag=<g>`
//!   country only     → `stations/bycountry/<c>`
//!   genre only       → `stations/bytag/<g>`
//! All carry `limit` / `offset` derived from the page number.

use reqwest::Url;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::station::{normalize, RawStation, StationRecord};

/// Fixed page size; the directory does not report a total count, so paging
/// is pure offset arithmetic.
pub const PAGE_SIZE: u32 = 10;

/// Free-text search filter. Both fields optional, but not both empty at
/// query time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    pub genre: String,
    pub country: String,
}

impl Filter {
    pub fn is_empty(&self) -> bool {
        self.genre.trim().is_empty() && self.country.trim().is_empty()
    }
}

#[derive(Debug, Error)]
pub enum DirectoryError {
    /// Both filter fields empty — caught before any network I/O.
    #[error("enter a genre or a country to search")]
    InvalidFilter,
    /// The directory answered with a non-success status.
    #[error("directory returned HTTP {0}")]
    UpstreamStatus(u16),
    /// The request itself failed (connect, timeout, body decode).
    #[error("directory request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

pub struct DirectoryClient {
    http: reqwest::Client,
    base: String,
}

impl DirectoryClient {
    /// `base_url` is the directory root, e.g.
    /// `https://all.api.radio-browser.info/json`.
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let base = base_url.trim_end_matches('/').to_string();
        Url::parse(&base)
            .map_err(|e| anyhow::anyhow!("invalid directory base URL {base:?}: {e}"))?;
        let http = reqwest::Client::builder()
            .user_agent(concat!("radiodex/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(15))
            .build()?;
        Ok(Self { http, base })
    }

    /// Build the request URL for a filter and 1-based page.
    ///
    /// Pure — unit tests drive the endpoint-selection and offset
    /// arithmetic through this without a network.
    pub fn request_url(&self, filter: &Filter, page: u32) -> Result<Url, DirectoryError> {
        let genre = filter.genre.trim();
        let country = filter.country.trim();
        if genre.is_empty() && country.is_empty() {
            return Err(DirectoryError::InvalidFilter);
        }

        let offset = page.saturating_sub(1) * PAGE_SIZE;
        let raw = if !genre.is_empty() && !country.is_empty() {
            format!("{}/stations/search", self.base)
        } else if !country.is_empty() {
            format!("{}/stations/bycountry/{}", self.base, country)
        } else {
            format!("{}/stations/bytag/{}", self.base, genre)
        };

        // The url parser percent-encodes what it can; filter text that
        // still breaks the URL structurally is an unusable filter.
        let mut url = Url::parse(&raw).map_err(|_| DirectoryError::InvalidFilter)?;
        {
            let mut q = url.query_pairs_mut();
            if !genre.is_empty() && !country.is_empty() {
                q.append_pair("country", country);
                q.append_pair("tag", genre);
            }
            q.append_pair("limit", &PAGE_SIZE.to_string());
            q.append_pair("offset", &offset.to_string());
        }
        Ok(url)
    }

    /// Execute one search. Parses the JSON array, drops entries that fail
    /// validation, and returns the survivors in upstream order. A single
    /// failed attempt surfaces immediately; retry policy belongs to the
    /// caller (here: none).
    pub async fn search(
        &self,
        filter: &Filter,
        page: u32,
    ) -> Result<Vec<StationRecord>, DirectoryError> {
        let url = self.request_url(filter, page)?;
        debug!(%url, page, "directory search");

        let resp = self.http.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(DirectoryError::UpstreamStatus(status.as_u16()));
        }

        let raw: Vec<RawStation> = resp.json().await?;
        let total = raw.len();
        let stations = normalize(raw);
        debug!(total, kept = stations.len(), "directory response normalized");
        Ok(stations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://all.api.radio-browser.info/json";

    fn client() -> DirectoryClient {
        DirectoryClient::new(BASE).unwrap()
    }

    fn filter(genre: &str, country: &str) -> Filter {
        Filter {
            genre: genre.to_string(),
            country: country.to_string(),
        }
    }

    #[test]
    fn empty_filter_fails_before_any_io() {
        let err = client().request_url(&Filter::default(), 1).unwrap_err();
        assert!(matches!(err, DirectoryError::InvalidFilter));
        // Whitespace-only counts as empty too.
        let err = client().request_url(&filter("  ", " "), 1).unwrap_err();
        assert!(matches!(err, DirectoryError::InvalidFilter));
    }

    #[test]
    fn genre_only_hits_bytag() {
        let url = client().request_url(&filter("rock", ""), 1).unwrap();
        assert_eq!(
            url.as_str(),
            format!("{BASE}/stations/bytag/rock?limit=10&offset=0")
        );
    }

    #[test]
    fn country_only_hits_bycountry() {
        let url = client().request_url(&filter("", "Ecuador"), 1).unwrap();
        assert_eq!(
            url.as_str(),
            format!("{BASE}/stations/bycountry/Ecuador?limit=10&offset=0")
        );
    }

    #[test]
    fn both_fields_hit_combined_search() {
        let url = client().request_url(&filter("jazz", "Spain"), 1).unwrap();
        assert_eq!(
            url.as_str(),
            format!("{BASE}/stations/search?country=Spain&tag=jazz&limit=10&offset=0")
        );
    }

    #[test]
    fn page_maps_to_offset() {
        let url = client().request_url(&filter("rock", ""), 2).unwrap();
        assert!(url.as_str().ends_with("limit=10&offset=10"));
        let url = client().request_url(&filter("rock", ""), 5).unwrap();
        assert!(url.as_str().ends_with("limit=10&offset=40"));
    }

    #[test]
    fn filter_text_is_trimmed_and_encoded() {
        let url = client()
            .request_url(&filter("", "  New Zealand "), 1)
            .unwrap();
        assert_eq!(
            url.as_str(),
            format!("{BASE}/stations/bycountry/New%20Zealand?limit=10&offset=0")
        );
    }
}
