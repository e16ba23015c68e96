//! Content items handed to the engine by the host

use nex_core::{Graph, Iri};
use nex_translate::known_language;

/// Plain text plus the metadata graph describing it
///
/// The host owns the item; the engine only appends to `metadata`.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentItem {
    pub uri: Iri,
    pub text: String,
    pub metadata: Graph,
}

impl ContentItem {
    pub fn new(uri: Iri, text: impl Into<String>) -> Self {
        Self {
            uri,
            text: text.into(),
            metadata: Graph::new(),
        }
    }

    /// Start from metadata written by earlier engines
    pub fn with_metadata(mut self, metadata: Graph) -> Self {
        self.metadata = metadata;
        self
    }

    /// Language recorded by an earlier enhancement, if any
    pub fn language(&self) -> Option<String> {
        known_language(&self.metadata)
    }
}
