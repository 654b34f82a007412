//! Playlist Mirror - resolves upstream music sources into track lists.
//!
//! A source is another account's playlist, one of your own, or a free-text
//! query. The [`resolver`] turns each into an ordered list of track URIs
//! using a priority chain of strategies, and merges many sources into one
//! deduplicated list of new tracks. It can be used as a library or through
//! the CLI commands in [`cli`].

pub mod api;
pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod resolver;
#[cfg(test)]
pub mod test_utils;
