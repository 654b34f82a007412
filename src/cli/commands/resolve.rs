//! Source resolution command.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::runtime::Runtime;

use crate::api::spotify::SpotifyClient;
use crate::config;
use crate::error::{Error, ResultExt};
use crate::model::UpstreamSource;
use crate::resolver::scraper::{HttpPageFetcher, PublicScraperPathway};
use crate::resolver::{ResolveAllResult, SourceResolver};

use super::open_disk_cache;

/// Resolve sources given on the command line, or the configured ones
#[allow(clippy::too_many_arguments)]
pub fn cmd_resolve(
    rt: &Runtime,
    playlists: &[String],
    external: &[String],
    queries: &[String],
    scrape: bool,
    exclude: Option<&PathBuf>,
    json: bool,
    token: Option<&str>,
) -> anyhow::Result<()> {
    let config = config::load();

    let token = match token
        .map(str::to_string)
        .or_else(|| config.credentials.spotify_access_token.clone())
    {
        Some(token) => token,
        None => {
            eprintln!("Error: Spotify access token required.");
            eprintln!("Use: --token YOUR_TOKEN, set SPOTIFY_ACCESS_TOKEN, or add it to the config file");
            std::process::exit(1);
        }
    };

    let mut sources = build_sources(playlists, external, queries);
    if sources.is_empty() {
        sources = config.sources.clone();
    }
    if sources.is_empty() {
        return Err(Error::invalid_input(
            "No sources given on the command line or in the config file",
        )
        .into());
    }

    let exclude_uris = exclude.map(|path| read_exclude_file(path)).transpose()?;

    let mut resolver = SourceResolver::default();
    if scrape || config.scraper.enabled {
        let cache = Arc::new(open_disk_cache(&config.scraper));
        let fetcher = Arc::new(HttpPageFetcher::with_timeout(config.scraper.timeout()));
        resolver = resolver.with_pathway(
            PublicScraperPathway::with_fetcher(Some(cache), fetcher)
                .cache_ttl(config.scraper.cache_ttl()),
        );
    }

    tracing::info!(
        "Resolving {} sources via {}",
        sources.len(),
        resolver.pathway_names().join(" -> ")
    );

    let client = SpotifyClient::new(token);
    let checked_at = chrono::Utc::now();
    let result = rt
        .block_on(resolver.resolve_all(&sources, &client, exclude_uris.as_ref()))
        .with_context(format!("resolving {} sources", sources.len()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_report(&result, &checked_at.to_rfc3339());
    }

    Ok(())
}

/// Sources from the repeatable CLI flags, in flag order.
pub(crate) fn build_sources(playlists: &[String], external: &[String], queries: &[String]) -> Vec<UpstreamSource> {
    playlists
        .iter()
        .map(UpstreamSource::playlist)
        .chain(external.iter().map(UpstreamSource::external_playlist))
        .chain(queries.iter().map(UpstreamSource::search))
        .collect()
}

/// Read known URIs, one per line. Blank lines and `#` comments are skipped.
fn read_exclude_file(path: &Path) -> crate::error::Result<HashSet<String>> {
    if !path.exists() {
        return Err(Error::not_found(path));
    }

    let contents = std::fs::read_to_string(path)
        .with_context(format!("reading exclude file {}", path.display()))?;

    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect())
}

/// Per-source audit followed by the new URIs.
fn print_report(result: &ResolveAllResult, checked_at: &str) {
    println!("Checked at {}", checked_at);
    println!();

    for (source, outcome) in &result.source_results {
        let marker = if outcome.is_usable() { "✓" } else { "✗" };
        println!(
            "{} {:<45} {:<14} {:<8} {} tracks",
            marker,
            source.label(),
            outcome.pathway_name,
            outcome.status(),
            outcome.track_uris.len()
        );
        if let Some(ref message) = outcome.error_message {
            println!("    {}", message);
        }
    }

    println!();
    println!(
        "{} new tracks from {}/{} sources",
        result.new_uris.len(),
        result.usable_count(),
        result.source_results.len()
    );
    for uri in &result.new_uris {
        println!("{}", uri);
    }
}
