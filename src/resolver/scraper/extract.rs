//! Track id extraction from public page HTML.
//!
//! Two shapes are recognised:
//!
//! - structured data: `spotify:track:<id>` inside embedded JSON
//! - hyperlinks: `/track/<id>` in anchor paths
//!
//! Both patterns are tied to the current page markup and will need updating
//! when it changes. Ids must be exactly 22 base62 characters.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

/// Length of a track id
pub const TRACK_ID_LEN: usize = 22;

const STRUCTURED_DATA_PATTERN: &str = r"spotify:track:([A-Za-z0-9]+)";
const HYPERLINK_PATTERN: &str = r"/track/([A-Za-z0-9]+)";

static STRUCTURED_DATA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(STRUCTURED_DATA_PATTERN).expect("valid structured-data regex"));
static HYPERLINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(HYPERLINK_PATTERN).expect("valid hyperlink regex"));

/// Whether a string has the shape of a track id.
pub fn is_track_id(candidate: &str) -> bool {
    candidate.len() == TRACK_ID_LEN && candidate.chars().all(|c| c.is_ascii_alphanumeric())
}

/// `spotify:track:<id>`
pub fn track_uri(id: &str) -> String {
    format!("spotify:track:{}", id)
}

/// Extract track ids from page text.
///
/// Structured-data matches come first, then hyperlink matches; the merged
/// list keeps the first occurrence of each id.
pub fn extract_track_ids(html: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut ids = Vec::new();

    for re in [&*STRUCTURED_DATA_RE, &*HYPERLINK_RE] {
        for caps in re.captures_iter(html) {
            let id = &caps[1];
            if is_track_id(id) && seen.insert(id.to_string()) {
                ids.push(id.to_string());
            }
        }
    }

    ids
}

/// Extract track URIs from page text.
pub fn extract_track_uris(html: &str) -> Vec<String> {
    extract_track_ids(html)
        .iter()
        .map(|id| track_uri(id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID_A: &str = "4uLU6hMCjMI75M1A2tKUQC";
    const ID_B: &str = "0VjIjW4GlUZAMYd2vXMi3b";

    #[test]
    fn test_extract_structured_data() {
        let html = format!(r#"{{"uri":"spotify:track:{}"}},{{"uri":"spotify:track:{}"}}"#, ID_A, ID_B);
        assert_eq!(extract_track_ids(&html), vec![ID_A, ID_B]);
    }

    #[test]
    fn test_extract_hyperlinks() {
        let html = format!(
            r#"<a href="/track/{}">A</a><a href="https://open.spotify.com/track/{}?si=x">B</a>"#,
            ID_A, ID_B
        );
        assert_eq!(extract_track_ids(&html), vec![ID_A, ID_B]);
    }

    #[test]
    fn test_same_id_from_both_patterns_once() {
        let html = format!(
            r#"<script>{{"uri":"spotify:track:{a}"}}</script><a href="/track/{a}">A</a><a href="/track/{b}">B</a>"#,
            a = ID_A,
            b = ID_B
        );
        assert_eq!(extract_track_ids(&html), vec![ID_A, ID_B]);
    }

    #[test]
    fn test_wrong_length_ids_rejected() {
        let html = r#"spotify:track:short /track/waytoolongtobeavalidtrackid123 /track/abc-def"#;
        assert!(extract_track_ids(html).is_empty());
    }

    #[test]
    fn test_other_entity_types_ignored() {
        let html = format!(r#"spotify:album:{} /artist/{}"#, ID_A, ID_B);
        assert!(extract_track_ids(&html).is_empty());
    }

    #[test]
    fn test_extract_uris() {
        let html = format!("/track/{}", ID_A);
        assert_eq!(
            extract_track_uris(&html),
            vec![format!("spotify:track:{}", ID_A)]
        );
    }

    #[test]
    fn test_is_track_id() {
        assert!(is_track_id(ID_A));
        assert!(!is_track_id("4uLU6hMCjMI75M1A2tKUQ"));
        assert!(!is_track_id("4uLU6hMCjMI75M1A2tKU-C"));
    }
}

/// Property-based tests using proptest
#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn track_id() -> impl Strategy<Value = String> {
        prop::string::string_regex("[A-Za-z0-9]{22}").unwrap()
    }

    proptest! {
        /// Every id extracted has the track id shape and appears once
        #[test]
        fn extracted_ids_are_unique_and_valid(
            ids in prop::collection::vec(track_id(), 0..20),
            noise in "[a-z <>/\"=:]{0,40}",
        ) {
            let mut html = noise.clone();
            for id in &ids {
                html.push_str(&format!(r#" "spotify:track:{}" <a href="/track/{}"> "#, id, id));
            }

            let extracted = extract_track_ids(&html);
            let unique: HashSet<_> = extracted.iter().collect();
            prop_assert_eq!(unique.len(), extracted.len());
            for id in &extracted {
                prop_assert!(is_track_id(id));
            }
            for id in &ids {
                prop_assert!(extracted.contains(id));
            }
        }
    }
}
