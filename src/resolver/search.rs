//! Keyword search pathway.
//!
//! Pages through catalogue search results for a free-text query. Search is
//! relevance-ranked, so a non-empty result is always reported as partial:
//! it is a sample of what the query means, never the whole of it.

use std::collections::HashSet;

use async_trait::async_trait;

use super::{Pathway, ResolveError, ResolveResult};
use crate::api::MusicApi;
use crate::model::{SourceType, UpstreamSource};

pub const SEARCH_PATHWAY: &str = "search";

/// Results per search page
pub const SEARCH_PAGE_SIZE: u32 = 50;

/// Maximum number of pages requested per query
pub const SEARCH_MAX_PAGES: u32 = 4;

/// Resolves `search_query` sources through paginated search.
#[derive(Debug, Default, Clone, Copy)]
pub struct SearchPathway;

impl SearchPathway {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Pathway for SearchPathway {
    fn name(&self) -> &'static str {
        SEARCH_PATHWAY
    }

    fn can_handle(&self, source: &UpstreamSource) -> bool {
        source.source_type == SourceType::SearchQuery
    }

    async fn resolve(
        &self,
        source: &UpstreamSource,
        api: &dyn MusicApi,
    ) -> Result<ResolveResult, ResolveError> {
        let query = source
            .search_query
            .as_deref()
            .map(str::trim)
            .unwrap_or_default();
        if query.is_empty() {
            return Ok(ResolveResult::failure(
                SEARCH_PATHWAY,
                "Source has no search query",
            ));
        }

        let mut seen = HashSet::new();
        let mut uris = Vec::new();

        for page in 0..SEARCH_MAX_PAGES {
            let offset = page * SEARCH_PAGE_SIZE;
            let tracks = match api.search(query, SEARCH_PAGE_SIZE, offset).await {
                Ok(tracks) => tracks,
                Err(e) if page == 0 => {
                    tracing::debug!("Search for {:?} failed on first page: {}", query, e);
                    return Ok(ResolveResult::failure(SEARCH_PATHWAY, e.to_string()));
                }
                Err(e) => {
                    // Earlier pages are still worth keeping
                    tracing::warn!(
                        "Search for {:?} failed at offset {} after {} tracks: {}",
                        query,
                        offset,
                        uris.len(),
                        e
                    );
                    return Ok(ResolveResult::partial(SEARCH_PATHWAY, uris).with_error(e.to_string()));
                }
            };

            if tracks.is_empty() {
                break;
            }

            for uri in tracks.into_iter().filter_map(|t| t.uri) {
                if seen.insert(uri.clone()) {
                    uris.push(uri);
                }
            }
        }

        if uris.is_empty() {
            return Ok(ResolveResult::empty(SEARCH_PATHWAY));
        }

        tracing::debug!("Search for {:?} produced {} tracks", query, uris.len());
        Ok(ResolveResult::partial(SEARCH_PATHWAY, uris))
    }
}
