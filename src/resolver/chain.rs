//! Source resolver - walks the pathway chain for each source.
//!
//! For one source, pathways are tried in order and the first usable result
//! (success or partial) wins; later pathways are never consulted. For a
//! batch, results are merged into one deduplicated URI list that also
//! excludes whatever the caller already has.

use std::collections::HashSet;

use super::direct::DirectLookupPathway;
use super::search::SearchPathway;
use super::{NO_PATHWAY, Pathway, ResolveAllResult, ResolveError, ResolveResult};
use crate::api::MusicApi;
use crate::model::UpstreamSource;

/// Priority-ordered pathway chain.
pub struct SourceResolver {
    pathways: Vec<Box<dyn Pathway>>,
}

impl SourceResolver {
    /// Create a resolver with an explicit pathway order.
    pub fn new(pathways: Vec<Box<dyn Pathway>>) -> Self {
        Self { pathways }
    }

    /// Append a pathway at the lowest priority.
    pub fn with_pathway(mut self, pathway: impl Pathway + 'static) -> Self {
        self.pathways.push(Box::new(pathway));
        self
    }

    /// Names of the configured pathways, in priority order.
    pub fn pathway_names(&self) -> Vec<&'static str> {
        self.pathways.iter().map(|p| p.name()).collect()
    }

    /// Resolve one source.
    ///
    /// Errors only when a pathway reports that the source does not exist.
    pub async fn resolve(
        &self,
        source: &UpstreamSource,
        api: &dyn MusicApi,
    ) -> Result<ResolveResult, ResolveError> {
        for pathway in self.pathways.iter().filter(|p| p.can_handle(source)) {
            tracing::debug!("Trying {} for {}", pathway.name(), source.label());

            let result = pathway.resolve(source, api).await?;
            if result.is_usable() {
                tracing::info!(
                    "{} resolved {} ({}, {} tracks)",
                    pathway.name(),
                    source.label(),
                    result.status(),
                    result.track_uris.len()
                );
                return Ok(result);
            }

            tracing::debug!(
                "{} gave up on {}: {}",
                pathway.name(),
                source.label(),
                result.error_message.as_deref().unwrap_or("no tracks")
            );
        }

        tracing::warn!("All pathways exhausted for {}", source.label());
        Ok(ResolveResult::failure(NO_PATHWAY, "All pathways exhausted"))
    }

    /// Resolve many sources and merge their tracks.
    ///
    /// `new_uris` keeps first-occurrence order across sources in input order
    /// and never contains anything from `exclude_uris`. Every soft failure is
    /// recorded per source; a missing playlist aborts the batch.
    pub async fn resolve_all(
        &self,
        sources: &[UpstreamSource],
        api: &dyn MusicApi,
        exclude_uris: Option<&HashSet<String>>,
    ) -> Result<ResolveAllResult, ResolveError> {
        let mut seen: HashSet<String> = exclude_uris.cloned().unwrap_or_default();
        let mut all = ResolveAllResult::default();

        for source in sources {
            let result = self.resolve(source, api).await?;

            for uri in &result.track_uris {
                if seen.insert(uri.clone()) {
                    all.new_uris.push(uri.clone());
                }
            }
            all.source_results.push((source.clone(), result));
        }

        tracing::info!(
            "Resolved {}/{} sources, {} new tracks",
            all.usable_count(),
            sources.len(),
            all.new_uris.len()
        );
        Ok(all)
    }
}

impl Default for SourceResolver {
    /// Direct lookup, then search. The scraper is opt-in.
    fn default() -> Self {
        Self::new(vec![
            Box::new(DirectLookupPathway::new()),
            Box::new(SearchPathway::new()),
        ])
    }
}


/// Property-based tests using proptest
#[cfg(test)]
mod proptests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use super::*;
    use crate::test_utils::{MockMusicApi, track_uri};

    proptest! {
        /// Batch output is unique, excludes the exclusion set, and follows
        /// first-occurrence order over the concatenated source results
        #[test]
        fn resolve_all_dedup_properties(
            playlists in prop::collection::vec(prop::collection::vec(0usize..30, 1..15), 1..5),
            excluded in prop::collection::hash_set(0usize..30, 0..10),
        ) {
            let mut api = MockMusicApi::new();
            let mut sources = Vec::new();
            for (i, ids) in playlists.iter().enumerate() {
                let id = format!("p{}", i);
                api = api.with_playlist(&id, ids.iter().map(|n| track_uri(*n)).collect());
                sources.push(UpstreamSource::playlist(id));
            }
            let exclude: HashSet<String> = excluded.iter().map(|n| track_uri(*n)).collect();

            let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
            let all = rt
                .block_on(SourceResolver::default().resolve_all(&sources, &api, Some(&exclude)))
                .unwrap();

            let mut expected = Vec::new();
            let mut seen = exclude.clone();
            for uri in playlists.iter().flatten().map(|n| track_uri(*n)) {
                if seen.insert(uri.clone()) {
                    expected.push(uri);
                }
            }

            prop_assert_eq!(&all.new_uris, &expected);
            let unique: HashSet<_> = all.new_uris.iter().collect();
            prop_assert_eq!(unique.len(), all.new_uris.len());
            prop_assert!(all.new_uris.iter().all(|u| !exclude.contains(u)));
            prop_assert_eq!(all.source_results.len(), sources.len());
        }
    }
}
