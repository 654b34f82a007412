//! CLI command definitions and dispatch.
//!
//! Each subcommand is implemented in its own submodule:
//! - `resolve`: Resolve upstream sources into new track URIs
//! - `scrape`: Public-page scraping and its cache
//! - `sources`: Managing the configured source list

mod resolve;
mod scrape;
mod sources;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio::runtime::Runtime;

pub use resolve::cmd_resolve;
pub use scrape::{cmd_clear_cache, cmd_scrape};
pub use sources::{cmd_add_source, cmd_list_sources};

/// Playlist Mirror CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Resolve upstream sources into track URIs
    Resolve {
        /// Playlist owned by your account (repeatable)
        #[arg(long = "playlist", value_name = "ID")]
        playlists: Vec<String>,
        /// Playlist owned by another account (repeatable)
        #[arg(long = "external", value_name = "ID")]
        external: Vec<String>,
        /// Free-text search query (repeatable)
        #[arg(long = "query", value_name = "TEXT")]
        queries: Vec<String>,
        /// Add the public-page scraper as a last resort
        #[arg(long)]
        scrape: bool,
        /// File of already-known track URIs to exclude, one per line
        #[arg(long, value_name = "FILE")]
        exclude: Option<PathBuf>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
        /// Spotify access token (or set SPOTIFY_ACCESS_TOKEN env var)
        #[arg(short, long, env = "SPOTIFY_ACCESS_TOKEN")]
        token: Option<String>,
    },
    /// Scrape a playlist's public pages (no token needed)
    Scrape {
        /// Playlist id
        playlist_id: String,
        /// Bypass the scrape cache
        #[arg(long)]
        no_cache: bool,
    },
    /// Remove all cached scrape results
    ClearCache,
    /// Add sources to the config file
    AddSource {
        /// Playlist owned by your account (repeatable)
        #[arg(long = "playlist", value_name = "ID")]
        playlists: Vec<String>,
        /// Playlist owned by another account (repeatable)
        #[arg(long = "external", value_name = "ID")]
        external: Vec<String>,
        /// Free-text search query (repeatable)
        #[arg(long = "query", value_name = "TEXT")]
        queries: Vec<String>,
    },
    /// List the configured sources
    Sources,
    /// Print the config file location
    ConfigPath,
}

/// Run the specified CLI command.
///
/// Returns `Ok(true)` if a command was run, `Ok(false)` if no command was specified.
pub fn run_command(cli: &Cli) -> anyhow::Result<bool> {
    let rt = Runtime::new()?;

    match &cli.command {
        Some(Commands::Resolve {
            playlists,
            external,
            queries,
            scrape,
            exclude,
            json,
            token,
        }) => {
            cmd_resolve(
                &rt,
                playlists,
                external,
                queries,
                *scrape,
                exclude.as_ref(),
                *json,
                token.as_deref(),
            )?;
            Ok(true)
        }
        Some(Commands::Scrape {
            playlist_id,
            no_cache,
        }) => {
            cmd_scrape(&rt, playlist_id, *no_cache)?;
            Ok(true)
        }
        Some(Commands::ClearCache) => {
            cmd_clear_cache()?;
            Ok(true)
        }
        Some(Commands::AddSource {
            playlists,
            external,
            queries,
        }) => {
            cmd_add_source(playlists, external, queries)?;
            Ok(true)
        }
        Some(Commands::Sources) => {
            cmd_list_sources()?;
            Ok(true)
        }
        Some(Commands::ConfigPath) => {
            match crate::config::config_path() {
                Some(path) => println!("{}", path.display()),
                None => eprintln!("Could not determine config directory"),
            }
            Ok(true)
        }
        None => Ok(false),
    }
}

// ============================================================================
// Shared helper functions
// ============================================================================

/// Open the scrape cache configured in `[scraper]`.
pub(crate) fn open_disk_cache(config: &crate::config::ScraperConfig) -> crate::cache::DiskCache {
    match &config.cache_dir {
        Some(dir) => crate::cache::DiskCache::new(dir),
        None => crate::cache::DiskCache::default_location(),
    }
}
