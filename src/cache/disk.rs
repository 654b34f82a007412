//! On-disk cache.
//!
//! Each key maps to one file named after the SHA-256 of the key. The first
//! line of the file is the RFC 3339 expiry timestamp, the rest is the raw
//! value. Expired entries are removed on read.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

use super::{CacheError, CacheStore};

const ENTRY_EXTENSION: &str = "entry";

/// File-backed cache.
pub struct DiskCache {
    cache_dir: PathBuf,
}

impl DiskCache {
    /// Create a new cache in the specified directory.
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        let cache_dir = cache_dir.into();
        // Ensure cache directory exists
        let _ = fs::create_dir_all(&cache_dir);
        Self { cache_dir }
    }

    /// Create a cache in the default location (user cache directory).
    pub fn default_location() -> Self {
        Self::new(default_cache_dir())
    }

    /// Directory the entries live in.
    pub fn dir(&self) -> &PathBuf {
        &self.cache_dir
    }

    /// Path of the file backing a key.
    fn entry_path(&self, key: &str) -> PathBuf {
        let digest = Sha256::digest(key.as_bytes());
        self.cache_dir
            .join(format!("{:x}.{}", digest, ENTRY_EXTENSION))
    }

    /// Remove all cache entries.
    pub fn clear(&self) -> Result<(), CacheError> {
        if self.cache_dir.exists() {
            for entry in fs::read_dir(&self.cache_dir)? {
                let entry = entry?;
                if entry.file_type()?.is_file() {
                    fs::remove_file(entry.path())?;
                }
            }
        }
        Ok(())
    }

    /// Get the total size of the cache in bytes.
    pub fn size_bytes(&self) -> u64 {
        if !self.cache_dir.exists() {
            return 0;
        }

        fs::read_dir(&self.cache_dir)
            .map(|entries| {
                entries
                    .filter_map(|e| e.ok())
                    .filter_map(|e| e.metadata().ok())
                    .map(|m| m.len())
                    .sum()
            })
            .unwrap_or(0)
    }
}

impl CacheStore for DiskCache {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let path = self.entry_path(key);
        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read(&path)?;
        let (expires_at, value) = decode_entry(key, &contents)?;

        if expires_at <= Utc::now() {
            tracing::debug!("Cache entry for {} expired at {}", key, expires_at.to_rfc3339());
            let _ = fs::remove_file(&path);
            return Ok(None);
        }

        Ok(Some(value.to_vec()))
    }

    fn set_with_expiry(&self, key: &str, ttl: Duration, value: &[u8]) -> Result<(), CacheError> {
        fs::create_dir_all(&self.cache_dir)?;

        let expires_at = chrono::Duration::from_std(ttl)
            .ok()
            .and_then(|delta| Utc::now().checked_add_signed(delta))
            .ok_or(CacheError::TtlOutOfRange(ttl))?;

        let mut contents = expires_at.to_rfc3339().into_bytes();
        contents.push(b'\n');
        contents.extend_from_slice(value);

        // Write atomically (write to temp, then rename)
        let path = self.entry_path(key);
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, &contents)?;
        fs::rename(&temp_path, &path)?;
        Ok(())
    }
}

/// Split an entry file into its expiry header and payload.
fn decode_entry<'a>(key: &str, contents: &'a [u8]) -> Result<(DateTime<Utc>, &'a [u8]), CacheError> {
    let corrupt = |reason: &str| CacheError::Corrupt {
        key: key.to_string(),
        reason: reason.to_string(),
    };

    let newline = contents
        .iter()
        .position(|&b| b == b'\n')
        .ok_or_else(|| corrupt("missing expiry header"))?;

    let header = std::str::from_utf8(&contents[..newline])
        .map_err(|_| corrupt("expiry header is not UTF-8"))?;
    let expires_at = DateTime::parse_from_rfc3339(header)
        .map_err(|_| corrupt("unparseable expiry header"))?
        .with_timezone(&Utc);

    Ok((expires_at, &contents[newline + 1..]))
}

/// Default cache directory (`<user cache>/playlist-mirror/scrape`)
pub fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from(".cache"))
        .join("playlist-mirror")
        .join("scrape")
}
