//! Upstream source resolution.
//!
//! Turns a configured source (someone's playlist, or a search query) into an
//! ordered list of track URIs by trying several independent strategies in
//! priority order:
//!
//! 1. **Direct lookup** (`direct_api`) - read the playlist through the API
//! 2. **Search** (`search`) - paginated keyword search for query sources
//! 3. **Public scrape** (`public_scrape`) - opt-in, extracts ids from the
//!    public web pages when the API hides a playlist's contents
//!
//! # Failure Classes
//!
//! - **Hard**: the playlist does not exist. Surfaces as [`ResolveError`] and
//!   stops resolution; no other pathway is worth trying.
//! - **Soft**: a pathway ran but found nothing usable. The chain moves on.
//! - **Partial**: usable but incomplete (search). Accepted like success.
//!
//! # Usage
//!
//! ```ignore
//! use playlist_mirror::resolver::{SourceResolver, PublicScraperPathway};
//!
//! let resolver = SourceResolver::default()
//!     .with_pathway(PublicScraperPathway::new(Some(cache)));
//! let all = resolver.resolve_all(&sources, &client, Some(&existing)).await?;
//! println!("{} new tracks", all.new_uris.len());
//! ```

mod chain;
mod direct;
mod pathway;
mod result;
mod search;
pub mod scraper;

pub use chain::SourceResolver;
pub use direct::{DIRECT_PATHWAY, DirectLookupPathway};
pub use pathway::Pathway;
pub use result::{NO_PATHWAY, ResolveAllResult, ResolveResult};
pub use scraper::{PublicScraperPathway, SCRAPER_PATHWAY};
pub use search::{SEARCH_MAX_PAGES, SEARCH_PAGE_SIZE, SEARCH_PATHWAY, SearchPathway};

/// Unrecoverable resolution failure.
///
/// Only raised when the referenced playlist provably does not exist.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ResolveError {
    #[error("Playlist not found: {0}")]
    SourceNotFound(String),
}
