//! Spotify Web API HTTP client
//!
//! Handles communication with the Spotify Web API.
//! See: https://developer.spotify.com/documentation/web-api
//!
//! IMPORTANT: every request needs a bearer token. Playlists owned by other
//! accounts may come back empty for app tokens; that is not an error here.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use super::{adapter, dto};
use crate::api::ApiError;
use crate::model::TrackRecord;

/// Page size for playlist reads (API maximum)
const PLAYLIST_PAGE_LIMIT: u32 = 100;

/// User agent string
const USER_AGENT: &str = concat!(
    "PlaylistMirror/",
    env!("CARGO_PKG_VERSION"),
    " (https://github.com/playlist-mirror)"
);

/// Spotify Web API client
pub struct SpotifyClient {
    http_client: reqwest::Client,
    base_url: String,
    access_token: String,
}

impl SpotifyClient {
    /// Create a new client with an access token
    pub fn new(access_token: impl Into<String>) -> Self {
        Self::with_base_url("https://api.spotify.com/v1", access_token)
    }

    /// Create a client against a custom base URL (proxies, tests)
    pub fn with_base_url(base_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http_client,
            base_url: base_url.into(),
            access_token: access_token.into(),
        }
    }

    /// Read every track of a playlist, following pagination.
    pub async fn playlist_tracks(&self, playlist_id: &str) -> Result<Vec<TrackRecord>, ApiError> {
        let mut records = Vec::new();
        let mut offset = 0u32;

        loop {
            let url = format!(
                "{}/playlists/{}/tracks?limit={}&offset={}",
                self.base_url,
                urlencoding::encode(playlist_id),
                PLAYLIST_PAGE_LIMIT,
                offset
            );

            let page: dto::Paging<dto::PlaylistItem> = self.get_json(&url).await?;
            let count = page.items.len() as u32;
            records.extend(adapter::playlist_items_to_records(page.items));

            if page.next.is_none() || count == 0 {
                break;
            }
            offset += count;
        }

        tracing::debug!(
            "Fetched {} tracks from playlist {}",
            records.len(),
            playlist_id
        );
        Ok(records)
    }

    /// Run one page of a track search.
    pub async fn search_tracks(
        &self,
        query: &str,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<TrackRecord>, ApiError> {
        let url = format!(
            "{}/search?q={}&type=track&limit={}&offset={}",
            self.base_url,
            urlencoding::encode(query),
            limit,
            offset
        );

        let response: dto::SearchResponse = self.get_json(&url).await?;
        Ok(adapter::search_to_records(response))
    }

    /// Send an authenticated GET and decode the JSON body
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let response = self
            .http_client
            .get(url)
            .bearer_auth(&self.access_token)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(url.to_string()));
        }

        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(ApiError::RateLimited);
        }

        if !status.is_success() {
            // Try to parse error response
            if let Ok(error) = response.json::<dto::ErrorResponse>().await {
                return Err(ApiError::Network(format!(
                    "HTTP {}: {}",
                    error.error.status, error.error.message
                )));
            }
            return Err(ApiError::Network(format!(
                "HTTP {}: {}",
                status,
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }
}
