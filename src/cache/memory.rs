//! Process-local cache.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use super::{CacheError, CacheStore};

/// In-memory cache guarded by a mutex.
#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, (Instant, Vec<u8>)>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CacheStore for MemoryCache {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let mut entries = self.entries.lock();
        match entries.get(key) {
            Some((expires_at, _)) if *expires_at <= Instant::now() => {
                entries.remove(key);
                Ok(None)
            }
            Some((_, value)) => Ok(Some(value.clone())),
            None => Ok(None),
        }
    }

    fn set_with_expiry(&self, key: &str, ttl: Duration, value: &[u8]) -> Result<(), CacheError> {
        let expires_at = Instant::now()
            .checked_add(ttl)
            .ok_or(CacheError::TtlOutOfRange(ttl))?;
        self.entries
            .lock()
            .insert(key.to_string(), (expires_at, value.to_vec()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let cache = MemoryCache::new();
        cache.set_with_expiry("k", Duration::from_secs(60), b"v").unwrap();
        assert_eq!(cache.get("k").unwrap(), Some(b"v".to_vec()));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_huge_ttl_is_an_error_not_a_panic() {
        let cache = MemoryCache::new();
        let result = cache.set_with_expiry("k", Duration::from_secs(u64::MAX / 2), b"v");
        assert!(matches!(result, Err(CacheError::TtlOutOfRange(_))));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_expired_entries_read_as_miss() {
        let cache = MemoryCache::new();
        cache.set_with_expiry("k", Duration::ZERO, b"v").unwrap();
        assert!(cache.get("k").unwrap().is_none());
        assert!(cache.is_empty());
    }
}
