//! Outcome types for single-source and batch resolution.

use serde::Serialize;

use crate::model::UpstreamSource;

/// Pathway name reported when nothing produced a usable result.
pub const NO_PATHWAY: &str = "none";

/// Outcome of one pathway attempt on one source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolveResult {
    /// Track URIs in the order the pathway produced them
    pub track_uris: Vec<String>,
    /// Which pathway produced this result (or [`NO_PATHWAY`])
    pub pathway_name: String,
    /// Complete and authoritative for the source
    pub success: bool,
    /// Usable but known to be incomplete
    pub partial: bool,
    /// Why the pathway failed, when it has something to say
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl ResolveResult {
    /// Complete result.
    pub fn success(pathway_name: &str, track_uris: Vec<String>) -> Self {
        Self {
            track_uris,
            pathway_name: pathway_name.to_string(),
            success: true,
            partial: false,
            error_message: None,
        }
    }

    /// Usable, incomplete result.
    pub fn partial(pathway_name: &str, track_uris: Vec<String>) -> Self {
        Self {
            track_uris,
            pathway_name: pathway_name.to_string(),
            success: false,
            partial: true,
            error_message: None,
        }
    }

    /// Ran cleanly, found nothing. Not an error.
    pub fn empty(pathway_name: &str) -> Self {
        Self {
            track_uris: Vec::new(),
            pathway_name: pathway_name.to_string(),
            success: false,
            partial: false,
            error_message: None,
        }
    }

    /// Failed with an explanation.
    pub fn failure(pathway_name: &str, message: impl Into<String>) -> Self {
        Self {
            error_message: Some(message.into()),
            ..Self::empty(pathway_name)
        }
    }

    /// Attach an error message to an existing result.
    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }

    /// Whether the orchestrator accepts this result.
    pub fn is_usable(&self) -> bool {
        self.success || self.partial
    }

    /// Short status tag for logs and audit output.
    pub fn status(&self) -> &'static str {
        if self.success {
            "success"
        } else if self.partial {
            "partial"
        } else if self.error_message.is_some() {
            "failed"
        } else {
            "empty"
        }
    }
}

/// Outcome of resolving a batch of sources.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResolveAllResult {
    /// Newly discovered URIs, deduplicated, first occurrence order
    pub new_uris: Vec<String>,
    /// One entry per input source, in input order
    pub source_results: Vec<(UpstreamSource, ResolveResult)>,
}

impl ResolveAllResult {
    /// Number of sources that produced a usable result.
    pub fn usable_count(&self) -> usize {
        self.source_results
            .iter()
            .filter(|(_, result)| result.is_usable())
            .count()
    }
}
