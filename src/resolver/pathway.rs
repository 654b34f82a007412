//! The pathway contract.

use async_trait::async_trait;

use super::{ResolveError, ResolveResult};
use crate::api::MusicApi;
use crate::model::UpstreamSource;

/// One strategy for turning a source into track URIs.
///
/// `resolve` returns `Err` only for [`ResolveError`], meaning the source
/// itself does not exist. "Found nothing" and ordinary failures are
/// `Ok` results with `success == false`.
#[async_trait]
pub trait Pathway: Send + Sync {
    /// Stable identifier reported in [`ResolveResult::pathway_name`].
    fn name(&self) -> &'static str;

    /// Whether this pathway applies to the source. No side effects.
    fn can_handle(&self, source: &UpstreamSource) -> bool;

    /// Attempt resolution. May perform network I/O.
    async fn resolve(
        &self,
        source: &UpstreamSource,
        api: &dyn MusicApi,
    ) -> Result<ResolveResult, ResolveError>;
}
