//! Direct lookup through the authenticated API.
//!
//! The preferred pathway for playlists: one `fetch_tracks` call, complete and
//! authoritative when it works. Externally-owned playlists often come back
//! empty under current platform rules; that is reported as a plain miss so
//! the chain can move on.

use async_trait::async_trait;

use super::{Pathway, ResolveError, ResolveResult};
use crate::api::{ApiError, MusicApi};
use crate::model::UpstreamSource;

pub const DIRECT_PATHWAY: &str = "direct_api";

/// Reads playlist contents straight from the API.
#[derive(Debug, Default, Clone, Copy)]
pub struct DirectLookupPathway;

impl DirectLookupPathway {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Pathway for DirectLookupPathway {
    fn name(&self) -> &'static str {
        DIRECT_PATHWAY
    }

    fn can_handle(&self, source: &UpstreamSource) -> bool {
        source.source_type.is_collection()
    }

    async fn resolve(
        &self,
        source: &UpstreamSource,
        api: &dyn MusicApi,
    ) -> Result<ResolveResult, ResolveError> {
        let Some(playlist_id) = source.source_id.as_deref() else {
            return Ok(ResolveResult::failure(
                DIRECT_PATHWAY,
                "Source has no playlist id",
            ));
        };

        let tracks = match api.fetch_tracks(playlist_id).await {
            Ok(tracks) => tracks,
            Err(ApiError::NotFound(_)) => {
                return Err(ResolveError::SourceNotFound(playlist_id.to_string()));
            }
            Err(e) => {
                tracing::debug!("Direct lookup of {} failed: {}", playlist_id, e);
                return Ok(ResolveResult::failure(DIRECT_PATHWAY, e.to_string()));
            }
        };

        if tracks.is_empty() {
            // Not an error: the API hides contents of some foreign playlists
            tracing::debug!("Direct lookup of {} returned no tracks", playlist_id);
            return Ok(ResolveResult::empty(DIRECT_PATHWAY));
        }

        let uris: Vec<String> = tracks.into_iter().filter_map(|t| t.uri).collect();
        Ok(ResolveResult::success(DIRECT_PATHWAY, uris))
    }
}
