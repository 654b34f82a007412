//! Music API contract consumed by the resolver.
//!
//! The resolver never talks to the streaming service directly; it goes
//! through [`MusicApi`] so tests can substitute a mock and production code
//! can plug in the authenticated [`spotify::SpotifyClient`].
//!
//! # Example
//!
//! ```ignore
//! use playlist_mirror::api::{MusicApi, spotify::SpotifyClient};
//!
//! let client = SpotifyClient::new("access-token");
//! let tracks = client.fetch_tracks("37i9dQZF1DXcBWIGoYBM5M").await?;
//! ```

pub mod spotify;

use async_trait::async_trait;

use crate::model::TrackRecord;

/// Errors surfaced by a music API client.
///
/// `NotFound` is the one variant the resolver treats specially: it means the
/// referenced collection does not exist at all.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Access token rejected")]
    Unauthorized,

    #[error("Rate limited - try again later")]
    RateLimited,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to parse response: {0}")]
    Parse(String),
}

/// Read access to a music catalogue.
#[async_trait]
pub trait MusicApi: Send + Sync {
    /// Fetch every track in a collection, in collection order.
    async fn fetch_tracks(&self, collection_id: &str) -> Result<Vec<TrackRecord>, ApiError>;

    /// Run one page of a keyword search.
    async fn search(
        &self,
        query: &str,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<TrackRecord>, ApiError>;
}

#[async_trait]
impl MusicApi for spotify::SpotifyClient {
    async fn fetch_tracks(&self, collection_id: &str) -> Result<Vec<TrackRecord>, ApiError> {
        self.playlist_tracks(collection_id).await
    }

    async fn search(
        &self,
        query: &str,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<TrackRecord>, ApiError> {
        self.search_tracks(query, limit, offset).await
    }
}
