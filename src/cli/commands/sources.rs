//! Configured source list commands.

use crate::config;
use crate::error::{Error, Result};

use super::resolve::build_sources;

/// Append sources to the config file, skipping ones already present
pub fn cmd_add_source(
    playlists: &[String],
    external: &[String],
    queries: &[String],
) -> Result<()> {
    let new_sources = build_sources(playlists, external, queries);
    if new_sources.is_empty() {
        return Err(Error::invalid_input(
            "Nothing to add: use --playlist, --external or --query",
        ));
    }

    let mut config = config::load();
    let mut added = 0;
    for source in new_sources {
        if config.sources.contains(&source) {
            println!("Already configured: {}", source.label());
            continue;
        }
        println!("Added: {}", source.label());
        config.sources.push(source);
        added += 1;
    }

    if added > 0 {
        config::save(&config)?;
    }
    Ok(())
}

/// Print the configured sources
pub fn cmd_list_sources() -> Result<()> {
    let config = config::load();

    if config.sources.is_empty() {
        println!("No sources configured.");
        return Ok(());
    }

    for (i, source) in config.sources.iter().enumerate() {
        println!("{:>3}. {}", i + 1, source.label());
    }
    Ok(())
}
