//! Core data models shared by the resolver and its collaborators.
//!
//! Defines the upstream source record ([`UpstreamSource`]) that callers
//! configure, and the minimal [`TrackRecord`] returned by the music API.
//!
//! # Source Types
//!
//! - `playlist` - a collection owned by the authenticated account
//! - `external_playlist` - a collection owned by another account
//! - `search_query` - a free-text query run against the catalogue search

use serde::{Deserialize, Serialize};

/// What kind of upstream a source points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    /// Collection owned by the caller's account
    Playlist,
    /// Collection owned by someone else
    ExternalPlaylist,
    /// Free-text catalogue search
    SearchQuery,
}

impl SourceType {
    /// Whether this type refers to a concrete collection id.
    pub fn is_collection(self) -> bool {
        matches!(self, SourceType::Playlist | SourceType::ExternalPlaylist)
    }

    /// Stable tag used in config files and CLI output.
    pub fn as_str(self) -> &'static str {
        match self {
            SourceType::Playlist => "playlist",
            SourceType::ExternalPlaylist => "external_playlist",
            SourceType::SearchQuery => "search_query",
        }
    }
}

impl std::fmt::Display for SourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A configured upstream source.
///
/// Read-only to the resolver. Tracking fields (last attempt, last pathway)
/// belong to whoever persists sources, not to this record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpstreamSource {
    /// Type tag
    pub source_type: SourceType,
    /// Collection id (populated for playlist types)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
    /// Free-text query (populated for search sources)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_query: Option<String>,
}

impl UpstreamSource {
    /// A collection owned by the caller.
    pub fn playlist(id: impl Into<String>) -> Self {
        Self {
            source_type: SourceType::Playlist,
            source_id: Some(id.into()),
            search_query: None,
        }
    }

    /// A collection owned by another account.
    pub fn external_playlist(id: impl Into<String>) -> Self {
        Self {
            source_type: SourceType::ExternalPlaylist,
            source_id: Some(id.into()),
            search_query: None,
        }
    }

    /// A free-text search.
    pub fn search(query: impl Into<String>) -> Self {
        Self {
            source_type: SourceType::SearchQuery,
            source_id: None,
            search_query: Some(query.into()),
        }
    }

    /// Short human-readable label for logs and CLI output.
    pub fn label(&self) -> String {
        match (&self.source_id, &self.search_query) {
            (Some(id), _) => format!("{}:{}", self.source_type, id),
            (None, Some(query)) => format!("{}:\"{}\"", self.source_type, query),
            (None, None) => format!("{}:<empty>", self.source_type),
        }
    }
}

/// A track as returned by the music API.
///
/// Only `uri` matters to the resolver; records without one are skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackRecord {
    /// Track URI (`spotify:track:<id>`), absent for local files
    pub uri: Option<String>,
    /// Track title
    pub name: Option<String>,
    /// Artist names in credit order
    pub artists: Vec<String>,
}

impl TrackRecord {
    /// A record with just a URI.
    pub fn with_uri(uri: impl Into<String>) -> Self {
        Self {
            uri: Some(uri.into()),
            ..Default::default()
        }
    }
}
