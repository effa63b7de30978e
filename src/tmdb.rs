use std::{num::NonZeroU32, sync::Arc};

use async_trait::async_trait;
use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};
use serde::Deserialize;
use tracing::debug;

use crate::error::{CatalogError, CatalogResult};

/// First match of a free-text title search.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchHit {
    pub poster_path: Option<String>,
    pub overview: Option<String>,
    pub release_date: Option<String>,
}

impl SearchHit {
    pub fn release_year(&self) -> Option<i16> {
        let date: jiff::civil::Date = self.release_date.as_deref()?.trim().parse().ok()?;
        Some(date.year())
    }
}

#[async_trait]
pub trait MetadataSearch: Send + Sync {
    async fn search_movie(&self, title: &str) -> CatalogResult<Option<SearchHit>>;
}

pub struct TmdbClient {
    client: wreq::Client,
    api_key: String,
    base_url: String,
    limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

impl TmdbClient {
    pub fn new(client: wreq::Client, api_key: String, base_url: String, rps: u32) -> Self {
        if api_key.trim().is_empty() {
            tracing::warn!("no TMDB_API_KEY provided, posters will fall back to the placeholder");
        }

        let quota = Quota::per_second(NonZeroU32::new(rps.max(1)).unwrap_or(NonZeroU32::MIN));
        let limiter = Arc::new(RateLimiter::direct(quota));
        Self { client, api_key, base_url, limiter }
    }

    async fn search(&self, title: &str) -> CatalogResult<Option<SearchHit>> {
        if self.api_key.trim().is_empty() {
            return Ok(None);
        }

        self.limiter.until_ready().await;

        let url = format!("{}/search/movie", self.base_url.trim_end_matches('/'));
        let resp = self
            .client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str()), ("query", title)])
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(CatalogError::Status { method: "GET", url, status: status.as_u16() });
        }

        let body: SearchResponse = resp.json().await?;
        debug!(title = %title, results = body.results.len(), "metadata search");
        Ok(body.results.into_iter().next().map(|m| SearchHit {
            poster_path: m.poster_path.filter(|p| !p.trim().is_empty()),
            overview: m.overview.filter(|o| !o.trim().is_empty()),
            release_date: m.release_date.filter(|d| !d.trim().is_empty()),
        }))
    }
}

#[async_trait]
impl MetadataSearch for TmdbClient {
    async fn search_movie(&self, title: &str) -> CatalogResult<Option<SearchHit>> {
        self.search(title).await
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchMovie>,
}

#[derive(Debug, Deserialize)]
struct SearchMovie {
    poster_path: Option<String>,
    overview: Option<String>,
    release_date: Option<String>,
}
