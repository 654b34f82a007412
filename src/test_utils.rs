//! Test utilities and fixtures for playlist-mirror tests.
//!
//! Mock implementations of the resolver's collaborators (music API, page
//! fetcher, cache) plus helpers for building track ids and pages.
//!
//! # Example
//!
//! ```ignore
//! use crate::test_utils::{MockMusicApi, track_uris};
//!
//! #[tokio::test]
//! async fn test_something() {
//!     let api = MockMusicApi::new().with_playlist("p1", track_uris(5));
//!     // ... test logic
//! }
//! ```

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::api::{ApiError, MusicApi};
use crate::cache::{CacheError, CacheStore};
use crate::model::TrackRecord;
use crate::resolver::scraper::{FetchError, PageFetcher};

/// A 22-character base62 track id that is unique per `n`.
pub fn track_id(n: usize) -> String {
    format!("trk{:0>19}", n)
}

/// `spotify:track:<id>` for [`track_id`].
pub fn track_uri(n: usize) -> String {
    format!("spotify:track:{}", track_id(n))
}

/// URIs for ids `0..count`.
pub fn track_uris(count: usize) -> Vec<String> {
    (0..count).map(track_uri).collect()
}

/// URIs for ids in a range.
pub fn track_uris_range(range: std::ops::Range<usize>) -> Vec<String> {
    range.map(track_uri).collect()
}

fn records(uris: &[String]) -> Vec<TrackRecord> {
    uris.iter().map(TrackRecord::with_uri).collect()
}

/// Mock music API with canned playlists and search pages.
///
/// Unknown playlists answer `ApiError::NotFound`. Search pages past the
/// configured ones come back empty.
#[derive(Default)]
pub struct MockMusicApi {
    playlists: HashMap<String, Result<Vec<TrackRecord>, ApiError>>,
    search_pages: Vec<Result<Vec<TrackRecord>, ApiError>>,
    fetch_calls: AtomicUsize,
    search_calls: Mutex<Vec<(String, u32, u32)>>,
}

impl MockMusicApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Playlist returning the given URIs.
    pub fn with_playlist(mut self, id: &str, uris: Vec<String>) -> Self {
        self.playlists.insert(id.to_string(), Ok(records(&uris)));
        self
    }

    /// Playlist returning raw records (e.g. some without a URI).
    pub fn with_playlist_records(mut self, id: &str, tracks: Vec<TrackRecord>) -> Self {
        self.playlists.insert(id.to_string(), Ok(tracks));
        self
    }

    /// Playlist whose fetch fails.
    pub fn with_playlist_error(mut self, id: &str, error: ApiError) -> Self {
        self.playlists.insert(id.to_string(), Err(error));
        self
    }

    /// Append a successful search page.
    pub fn with_search_page(mut self, uris: Vec<String>) -> Self {
        self.search_pages.push(Ok(records(&uris)));
        self
    }

    /// Append a failing search page.
    pub fn with_search_error(mut self, error: ApiError) -> Self {
        self.search_pages.push(Err(error));
        self
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    /// Recorded `(query, limit, offset)` of every search call.
    pub fn search_calls(&self) -> Vec<(String, u32, u32)> {
        self.search_calls.lock().clone()
    }
}

#[async_trait]
impl MusicApi for MockMusicApi {
    async fn fetch_tracks(&self, collection_id: &str) -> Result<Vec<TrackRecord>, ApiError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        self.playlists
            .get(collection_id)
            .cloned()
            .unwrap_or_else(|| Err(ApiError::NotFound(collection_id.to_string())))
    }

    async fn search(
        &self,
        query: &str,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<TrackRecord>, ApiError> {
        self.search_calls
            .lock()
            .push((query.to_string(), limit, offset));
        let page = (offset / limit.max(1)) as usize;
        self.search_pages
            .get(page)
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

/// Mock page fetcher keyed by URL.
///
/// URLs without a canned response answer HTTP 404.
#[derive(Default)]
pub struct MockPageFetcher {
    pages: HashMap<String, Result<String, FetchError>>,
    calls: Mutex<Vec<String>>,
}

impl MockPageFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.pages.insert(url.into(), Ok(body.into()));
        self
    }

    pub fn with_error(mut self, url: impl Into<String>, error: FetchError) -> Self {
        self.pages.insert(url.into(), Err(error));
        self
    }

    /// URLs requested so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

#[async_trait]
impl PageFetcher for MockPageFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.calls.lock().push(url.to_string());
        self.pages
            .get(url)
            .cloned()
            .unwrap_or(Err(FetchError::Status(404)))
    }
}

/// Cache whose every operation fails.
pub struct BrokenCache;

impl CacheStore for BrokenCache {
    fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        Err(CacheError::Unavailable("connection refused".to_string()))
    }

    fn set_with_expiry(&self, _key: &str, _ttl: Duration, _value: &[u8]) -> Result<(), CacheError> {
        Err(CacheError::Unavailable("connection refused".to_string()))
    }
}

/// Minimal HTML page embedding the given ids as structured data.
pub fn embed_page(ids: &[String]) -> String {
    let entities: Vec<String> = ids
        .iter()
        .map(|id| format!(r#"{{"uri":"spotify:track:{}","title":"Song"}}"#, id))
        .collect();
    format!(
        r#"<html><script id="__NEXT_DATA__" type="application/json">{{"trackList":[{}]}}</script></html>"#,
        entities.join(",")
    )
}

/// Minimal HTML page linking the given ids.
pub fn public_page(ids: &[String]) -> String {
    let links: Vec<String> = ids
        .iter()
        .map(|id| format!(r#"<a href="/track/{}">Song</a>"#, id))
        .collect();
    format!("<html><body>{}</body></html>", links.join(""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_ids_are_valid_shape() {
        for n in [0, 7, 123_456] {
            let id = track_id(n);
            assert_eq!(id.len(), 22);
            assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
        }
        assert_ne!(track_id(1), track_id(2));
    }

    #[tokio::test]
    async fn test_mock_api_unknown_playlist_is_not_found() {
        let api = MockMusicApi::new();
        let result = api.fetch_tracks("missing").await;
        assert!(matches!(result, Err(ApiError::NotFound(_))));
        assert_eq!(api.fetch_calls(), 1);
    }

    #[tokio::test]
    async fn test_mock_api_search_pages_by_offset() {
        let api = MockMusicApi::new()
            .with_search_page(track_uris(2))
            .with_search_page(track_uris_range(2..3));

        assert_eq!(api.search("q", 50, 0).await.unwrap().len(), 2);
        assert_eq!(api.search("q", 50, 50).await.unwrap().len(), 1);
        assert!(api.search("q", 50, 100).await.unwrap().is_empty());
        assert_eq!(api.search_calls().len(), 3);
    }

    #[tokio::test]
    async fn test_mock_fetcher_defaults_to_404() {
        let fetcher = MockPageFetcher::new().with_page("http://a", "body");
        assert_eq!(fetcher.fetch("http://a").await.unwrap(), "body");
        assert!(matches!(
            fetcher.fetch("http://b").await,
            Err(FetchError::Status(404))
        ));
        assert_eq!(fetcher.calls(), vec!["http://a", "http://b"]);
    }
}
