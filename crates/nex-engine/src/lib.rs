//! NEX Engine - Content enhancement with the NEX annotation service
//!
//! Glues the client and the translator around a caller-owned content item:
//! the item's text is sent to the service once, and the response is written
//! into the item's metadata graph under the configured convention.
//!
//! Author: hephaex@gmail.com

use nex_client::NexClient;
use nex_core::{AppConfig, Convention, Graph, Iri, Result};
use nex_translate::{known_language, Source, Translator};
use tracing::{debug, info};

pub mod content;

pub use content::ContentItem;

// ============================================================================
// Engine
// ============================================================================

/// Whether an item can be enhanced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanEnhance {
    /// Enhancement completes within the calling task
    Synchronous,
    Cannot,
}

/// Enhancement engine bound to one client and one output convention
#[derive(Debug, Clone)]
pub struct NexEngine {
    client: NexClient,
    translator: Translator,
}

impl NexEngine {
    pub fn new(client: NexClient, translator: Translator) -> Self {
        Self { client, translator }
    }

    /// Validate configuration once and select the convention
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let nex_config = config.nex_config()?;
        let convention = config.output.convention;

        info!(
            endpoint = %nex_config.endpoint(),
            convention = %convention,
            "Initializing NEX engine"
        );

        Ok(Self::new(
            NexClient::new(nex_config),
            Translator::new(convention),
        ))
    }

    pub fn client(&self) -> &NexClient {
        &self.client
    }

    pub fn convention(&self) -> Convention {
        self.translator.convention()
    }

    /// Items with non-blank text can be enhanced
    pub fn can_enhance(&self, item: &ContentItem) -> CanEnhance {
        let can = !item.text.trim().is_empty();
        debug!(uri = %item.uri, can_enhance = can, "Checked content item");
        if can {
            CanEnhance::Synchronous
        } else {
            CanEnhance::Cannot
        }
    }

    /// Annotate the item's text and write the result into its metadata
    ///
    /// The language hint is whatever an earlier enhancement recorded on the
    /// item. Failures are returned unchanged; nothing is written on failure.
    pub async fn compute_enhancements(&self, item: &mut ContentItem) -> Result<()> {
        self.enhance_with_language(item, None).await
    }

    /// Like [`Self::compute_enhancements`], with an explicit language hint
    /// taking precedence over the one recorded on the item
    pub async fn enhance_with_language(
        &self,
        item: &mut ContentItem,
        language: Option<&str>,
    ) -> Result<()> {
        let ContentItem {
            uri,
            text,
            metadata,
        } = item;

        let text = text.trim();
        if text.is_empty() {
            debug!(uri = %uri, "Nothing to enhance");
            return Ok(());
        }

        let language = match language {
            Some(language) => Some(language.to_string()),
            None => known_language(metadata),
        };
        let response = self.client.request(text, language.as_deref()).await?;

        info!(
            uri = %uri,
            annotations = response.annotations.len(),
            lang = response.detected_language().unwrap_or("unknown"),
            "Received annotations"
        );

        self.translator
            .translate(&Source::new(uri, text), &response, metadata);
        Ok(())
    }

    /// Enhance a standalone text and return the new metadata graph
    pub async fn annotate(&self, uri: Iri, text: impl Into<String>) -> Result<Graph> {
        let mut item = ContentItem::new(uri, text);
        self.compute_enhancements(&mut item).await?;
        Ok(item.metadata)
    }
}
