//! NEX Translate - Annotation response to RDF translation
//!
//! Maps one annotation service response onto the caller's metadata graph
//! under one of two conventions:
//! - Flat (FISE): text and entity enhancement nodes
//! - Linked (FAM, OpenAnnotation, NIF): body, target, selector and annotation nodes
//!
//! Translation is synchronous and performs no I/O. The graph is borrowed
//! for the duration of a single call only.
//!
//! Author: hephaex@gmail.com

use std::sync::Arc;

use chrono::Utc;
use nex_core::{Convention, Graph, IdGenerator, Iri, NexResponse, UuidGenerator};

pub mod flat;
pub mod linked;
pub mod selector;
pub mod support;

pub use flat::FlatWriter;
pub use linked::{annotation_uri, target_uri, LinkedWriter};
pub use selector::{Selector, HEAD_TAIL_WINDOW, PREFIX_SUFFIX_WINDOW};
pub use support::{fallback_entity_uri, known_language, link_entity, resolve_entity_uri};

/// Identifier recorded as creator/annotator of every generated node
pub const ENGINE_NAME: &str = "nex_engine::NexEngine";

/// The text that was annotated and the IRI that identifies it
#[derive(Debug, Clone, Copy)]
pub struct Source<'a> {
    pub uri: &'a Iri,
    pub text: &'a str,
}

impl<'a> Source<'a> {
    pub fn new(uri: &'a Iri, text: &'a str) -> Self {
        Self { uri, text }
    }
}

/// Single translation entry point, bound to one convention at construction
#[derive(Clone)]
pub struct Translator {
    convention: Convention,
    ids: Arc<dyn IdGenerator>,
}

impl std::fmt::Debug for Translator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Translator")
            .field("convention", &self.convention)
            .finish_non_exhaustive()
    }
}

impl Translator {
    /// Translator minting random UUID node identifiers
    pub fn new(convention: Convention) -> Self {
        Self::with_ids(convention, Arc::new(UuidGenerator))
    }

    /// Translator with an injected identifier source
    pub fn with_ids(convention: Convention, ids: Arc<dyn IdGenerator>) -> Self {
        Self { convention, ids }
    }

    pub fn convention(&self) -> Convention {
        self.convention
    }

    /// Append the statements describing `response` to `graph`
    pub fn translate(&self, source: &Source<'_>, response: &NexResponse, graph: &mut Graph) {
        let now = Utc::now();
        let ids = self.ids.as_ref();

        match self.convention {
            Convention::Flat => FlatWriter::new(ids, source, now).translate(response, graph),
            Convention::Linked => LinkedWriter::new(ids, source, now).translate(response, graph),
        }
    }
}
