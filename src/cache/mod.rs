//! Key/value cache with per-entry expiry.
//!
//! The scraper pathway is the only consumer. It stores the list of track
//! URIs it found for a playlist (or an empty list as a negative entry) so
//! repeated runs inside the TTL skip the network entirely.
//!
//! Two implementations:
//!
//! - [`DiskCache`] - one file per key under the user cache directory
//! - [`MemoryCache`] - process-local map, handy for tests and embedding
//!
//! Errors from either are reported as [`CacheError`]; callers are expected to
//! treat them as a miss rather than abort.

mod disk;
mod memory;

use std::time::Duration;

pub use disk::DiskCache;
pub use memory::MemoryCache;

/// Cache failures
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt cache entry for {key}: {reason}")]
    Corrupt { key: String, reason: String },

    #[error("Cache unavailable: {0}")]
    Unavailable(String),

    #[error("Expiry out of range for TTL {0:?}")]
    TtlOutOfRange(Duration),
}

/// Get / set-with-expiry store.
///
/// Implementations must be safe to share between resolver instances.
pub trait CacheStore: Send + Sync {
    /// Read a live entry. Expired entries read as `None`.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// Write an entry that expires after `ttl`.
    fn set_with_expiry(&self, key: &str, ttl: Duration, value: &[u8]) -> Result<(), CacheError>;
}
