//! Public-page scraper pathway.
//!
//! Last resort for playlists the API will not read. Pulls track ids out of
//! the unauthenticated web pages, trying in order:
//!
//! 1. **Cache** - a previous result (or a previous "nothing found")
//! 2. **Embed page** - lightweight player widget markup
//! 3. **Public page** - the full playlist page (heavier)
//!
//! Whatever the outcome, it is written back to the cache so repeated runs
//! inside the TTL stay off the network. A broken cache only costs speed:
//! read and write errors are logged and treated as a miss.

mod extract;
mod fetch;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use super::{Pathway, ResolveError, ResolveResult};
use crate::api::MusicApi;
use crate::cache::CacheStore;
use crate::model::UpstreamSource;

pub use extract::{extract_track_ids, extract_track_uris, is_track_id};
pub use fetch::{DEFAULT_FETCH_TIMEOUT, FetchError, HttpPageFetcher, PageFetcher};

pub const SCRAPER_PATHWAY: &str = "public_scrape";

/// Prefix of cache keys; the playlist id is appended.
pub const CACHE_KEY_PREFIX: &str = "scrape:playlist:";

/// Default lifetime of cache entries (6 hours)
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(6 * 60 * 60);

const EMBED_URL_TEMPLATE: &str = "https://open.spotify.com/embed/playlist/";
const PUBLIC_URL_TEMPLATE: &str = "https://open.spotify.com/playlist/";

/// Embed widget URL for a playlist.
pub fn embed_url(playlist_id: &str) -> String {
    format!("{}{}", EMBED_URL_TEMPLATE, playlist_id)
}

/// Public page URL for a playlist.
pub fn public_url(playlist_id: &str) -> String {
    format!("{}{}", PUBLIC_URL_TEMPLATE, playlist_id)
}

fn cache_key(playlist_id: &str) -> String {
    format!("{}{}", CACHE_KEY_PREFIX, playlist_id)
}

/// Scrapes public playlist pages, with an optional cache in front.
pub struct PublicScraperPathway {
    cache: Option<Arc<dyn CacheStore>>,
    fetcher: Arc<dyn PageFetcher>,
    cache_ttl: Duration,
}

impl PublicScraperPathway {
    /// Create a scraper using the HTTP fetcher with its default timeout.
    pub fn new(cache: Option<Arc<dyn CacheStore>>) -> Self {
        Self::with_fetcher(cache, Arc::new(HttpPageFetcher::new()))
    }

    /// Create a scraper with a custom page fetcher.
    pub fn with_fetcher(cache: Option<Arc<dyn CacheStore>>, fetcher: Arc<dyn PageFetcher>) -> Self {
        Self {
            cache,
            fetcher,
            cache_ttl: DEFAULT_CACHE_TTL,
        }
    }

    /// Override the cache entry lifetime.
    pub fn cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Resolve a playlist id from public pages. No API client needed.
    pub async fn scrape(&self, playlist_id: &str) -> ResolveResult {
        if let Some(uris) = self.cached(playlist_id) {
            if uris.is_empty() {
                tracing::debug!("Negative cache entry for {}, skipping scrape", playlist_id);
                return ResolveResult::empty(SCRAPER_PATHWAY);
            }
            tracing::debug!("Cache hit for {}: {} tracks", playlist_id, uris.len());
            return ResolveResult::success(SCRAPER_PATHWAY, uris);
        }

        for url in [embed_url(playlist_id), public_url(playlist_id)] {
            let uris = self.scrape_page(&url).await;
            if !uris.is_empty() {
                tracing::info!("Scraped {} tracks for {} from {}", uris.len(), playlist_id, url);
                self.store(playlist_id, &uris);
                return ResolveResult::success(SCRAPER_PATHWAY, uris);
            }
        }

        self.store(playlist_id, &[]);
        ResolveResult::failure(
            SCRAPER_PATHWAY,
            format!("No tracks found on public pages for playlist {}", playlist_id),
        )
    }

    /// One strategy: fetch a page and extract. Failures yield nothing.
    async fn scrape_page(&self, url: &str) -> Vec<String> {
        match self.fetcher.fetch(url).await {
            Ok(html) => {
                let uris = extract_track_uris(&html);
                tracing::debug!("{} yielded {} track ids", url, uris.len());
                uris
            }
            Err(e) => {
                tracing::warn!("Fetching {} failed: {}", url, e);
                Vec::new()
            }
        }
    }

    /// Cached URI list, `None` on miss or any cache problem.
    fn cached(&self, playlist_id: &str) -> Option<Vec<String>> {
        let cache = self.cache.as_ref()?;
        let key = cache_key(playlist_id);

        let bytes = match cache.get(&key) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!("Cache read for {} failed, treating as miss: {}", key, e);
                return None;
            }
        };

        match serde_json::from_slice::<Vec<String>>(&bytes) {
            Ok(uris) => Some(uris),
            Err(e) => {
                tracing::warn!("Undecodable cache entry {}, treating as miss: {}", key, e);
                None
            }
        }
    }

    fn store(&self, playlist_id: &str, uris: &[String]) {
        let Some(cache) = self.cache.as_ref() else {
            return;
        };
        let key = cache_key(playlist_id);

        let bytes = match serde_json::to_vec(uris) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!("Could not encode cache entry {}: {}", key, e);
                return;
            }
        };

        if let Err(e) = cache.set_with_expiry(&key, self.cache_ttl, &bytes) {
            tracing::warn!("Cache write for {} failed: {}", key, e);
        }
    }
}

#[async_trait]
impl Pathway for PublicScraperPathway {
    fn name(&self) -> &'static str {
        SCRAPER_PATHWAY
    }

    fn can_handle(&self, source: &UpstreamSource) -> bool {
        source.source_type.is_collection()
    }

    async fn resolve(
        &self,
        source: &UpstreamSource,
        _api: &dyn MusicApi,
    ) -> Result<ResolveResult, ResolveError> {
        let Some(playlist_id) = source.source_id.as_deref() else {
            return Ok(ResolveResult::failure(
                SCRAPER_PATHWAY,
                "Source has no playlist id",
            ));
        };
        Ok(self.scrape(playlist_id).await)
    }
}
