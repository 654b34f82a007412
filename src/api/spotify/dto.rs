//! Spotify Web API response shapes.
//!
//! These mirror the JSON exactly (only the fields we read). Conversion to
//! our own types happens in `adapter.rs`.
//!
//! See: https://developer.spotify.com/documentation/web-api

use serde::{Deserialize, Serialize};

/// Generic paging envelope
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Paging<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    /// URL of the next page, null on the last one
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub total: Option<u32>,
}

/// Item of `GET /playlists/{id}/tracks`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlaylistItem {
    /// Null when the track was removed from the catalogue
    #[serde(default)]
    pub track: Option<TrackObject>,
    #[serde(default)]
    pub is_local: bool,
}

/// A track object
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrackObject {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub artists: Vec<ArtistObject>,
    #[serde(default)]
    pub is_local: bool,
}

/// Simplified artist object
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArtistObject {
    pub name: String,
}

/// Response of `GET /search?type=track`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchResponse {
    pub tracks: Option<Paging<TrackObject>>,
}

/// Error envelope
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ErrorBody {
    pub status: u16,
    #[serde(default)]
    pub message: String,
}
