//! Public-page scraping commands.

use std::sync::Arc;

use tokio::runtime::Runtime;

use crate::cache::CacheStore;
use crate::config;
use crate::error::Result;
use crate::resolver::scraper::{HttpPageFetcher, PublicScraperPathway, is_track_id};

use super::open_disk_cache;

/// Scrape one playlist's public pages and print the track URIs
pub fn cmd_scrape(rt: &Runtime, playlist_id: &str, no_cache: bool) -> anyhow::Result<()> {
    let config = config::load();

    if !is_track_id(playlist_id) {
        // Playlist ids share the track id shape
        eprintln!("Warning: {:?} does not look like a playlist id", playlist_id);
    }

    let cache: Option<Arc<dyn CacheStore>> = if no_cache {
        None
    } else {
        Some(Arc::new(open_disk_cache(&config.scraper)))
    };
    let fetcher = Arc::new(HttpPageFetcher::with_timeout(config.scraper.timeout()));
    let scraper =
        PublicScraperPathway::with_fetcher(cache, fetcher).cache_ttl(config.scraper.cache_ttl());

    let result = rt.block_on(scraper.scrape(playlist_id));

    if result.success {
        eprintln!("✓ {} tracks", result.track_uris.len());
        for uri in &result.track_uris {
            println!("{}", uri);
        }
    } else {
        eprintln!(
            "✗ {}",
            result
                .error_message
                .as_deref()
                .unwrap_or("No tracks found (cached negative result)")
        );
    }

    Ok(())
}

/// Empty the scrape cache directory
pub fn cmd_clear_cache() -> Result<()> {
    let config = config::load();
    let cache = open_disk_cache(&config.scraper);

    let size = cache.size_bytes();
    cache.clear()?;
    println!(
        "Cleared {} KB from {}",
        size / 1024,
        cache.dir().display()
    );
    Ok(())
}
