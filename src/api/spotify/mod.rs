//! Spotify Web API integration
//!
//! Reads playlist contents and runs track searches with a bearer token.
//! Obtaining the token is the caller's business.

pub mod dto;
mod adapter;
mod client;

pub use client::SpotifyClient;
