//! Identifier minting for generated nodes
//!
//! Translators never call a random source directly; they ask an
//! [`IdGenerator`] so that tests can pin exact node identifiers.

use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

use crate::graph::Iri;
use crate::vocab::ENHANCEMENT_URN_PREFIX;

/// Source of fresh, unique identifiers
pub trait IdGenerator: Send + Sync {
    /// Next unique identifier
    fn next_id(&self) -> String;

    /// Fresh enhancement node IRI (`urn:enhancement-{id}`)
    fn mint(&self) -> Iri {
        Iri::new(format!("{ENHANCEMENT_URN_PREFIX}{}", self.next_id()))
    }
}

/// Random UUID v4 identifiers
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Deterministic counter-based identifiers (`1`, `2`, ...)
#[derive(Debug, Default)]
pub struct SequentialIds {
    counter: AtomicU64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start counting after `start`
    pub fn starting_at(start: u64) -> Self {
        Self {
            counter: AtomicU64::new(start),
        }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> String {
        (self.counter.fetch_add(1, Ordering::Relaxed) + 1).to_string()
    }
}
