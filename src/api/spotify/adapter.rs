//! Adapter layer: Convert Spotify DTOs to our track records
//!
//! This is the ONLY place where DTO types are converted to model types.

use super::dto;
use crate::model::TrackRecord;

/// Convert one page of playlist items.
///
/// Removed tracks (null) are dropped. Local files keep their place but have
/// no URI, so the resolver will skip them.
pub fn playlist_items_to_records(items: Vec<dto::PlaylistItem>) -> Vec<TrackRecord> {
    items
        .into_iter()
        .filter_map(|item| {
            let is_local = item.is_local;
            item.track.map(|track| {
                let mut record = to_record(track);
                if is_local {
                    record.uri = None;
                }
                record
            })
        })
        .collect()
}

/// Convert a search response.
pub fn search_to_records(response: dto::SearchResponse) -> Vec<TrackRecord> {
    response
        .tracks
        .map(|page| page.items.into_iter().map(to_record).collect())
        .unwrap_or_default()
}

fn to_record(track: dto::TrackObject) -> TrackRecord {
    let uri = if track.is_local { None } else { track.uri };
    TrackRecord {
        uri,
        name: track.name,
        artists: track.artists.into_iter().map(|a| a.name).collect(),
    }
}
