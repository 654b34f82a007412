//! Command-line interface for playlist-mirror.
//!
//! This module provides CLI commands for resolving upstream sources and
//! maintaining the scrape cache.

mod commands;

pub use commands::{Cli, Commands, run_command};
