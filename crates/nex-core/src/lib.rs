//! NEX Core - Domain models, graph model, and shared types
//!
//! This crate defines the core abstractions used throughout the NEX engine:
//! - Error taxonomy for configuration, transport and response failures
//! - Configuration management (service settings, validated client config)
//! - Append-only RDF graph model and vocabularies
//! - The parsed shape of an annotation service response
//! - Identifier minting for generated nodes

pub mod config;
pub mod graph;
pub mod ids;
pub mod response;
pub mod vocab;

pub use config::{
    AppConfig, ConfigError, Convention, ExtraType, LoggingConfig, NexConfig, NexConfigBuilder,
    OutputConfig, ServiceSettings, ACCEPTED_COUNTRIES,
};
pub use graph::{Graph, Iri, Literal, LiteralKind, Term, Triple};
pub use ids::{IdGenerator, SequentialIds, UuidGenerator};
pub use response::{Annotation, Image, NexResponse};

use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Core error types for NEX operations
#[derive(Error, Debug)]
pub enum NexError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The request could not be completed, or the service answered with a
    /// non-2xx status that is not a language rejection.
    #[error("Transport failure: {message}")]
    Transport {
        status: Option<u16>,
        message: String,
    },

    #[error("Response could not be parsed: {0}")]
    Parse(String),

    /// The service cannot process the declared or detected language.
    #[error("Unmanaged language '{}'", language.as_deref().unwrap_or("unknown"))]
    UnsupportedLanguage { language: Option<String> },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl NexError {
    /// Language rejected by the service, if this is a language failure
    pub fn unsupported_language(&self) -> Option<&str> {
        match self {
            Self::UnsupportedLanguage { language } => language.as_deref(),
            _ => None,
        }
    }

    /// HTTP status attached to a transport failure
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => *status,
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, NexError>;

// ============================================================================
// Tests
// ============================================================================
