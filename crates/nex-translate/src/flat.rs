//! Flat convention (FISE)
//!
//! Each mention yields a text annotation (span and selected text) and an
//! entity annotation pointing at the linked entity and back at the text
//! annotation. All enhancement nodes share the same provenance statements.

use chrono::{DateTime, Utc};
use nex_core::{vocab, Annotation, Graph, IdGenerator, Iri, Literal, NexResponse};
use tracing::debug;

use crate::support::{known_language, link_entity, resolve_entity_uri};
use crate::{Source, ENGINE_NAME};

/// Writes flat-convention statements for one translation call
pub struct FlatWriter<'a> {
    ids: &'a dyn IdGenerator,
    source: &'a Source<'a>,
    created: DateTime<Utc>,
}

impl<'a> FlatWriter<'a> {
    pub fn new(ids: &'a dyn IdGenerator, source: &'a Source<'a>, created: DateTime<Utc>) -> Self {
        Self {
            ids,
            source,
            created,
        }
    }

    pub fn translate(&self, response: &NexResponse, graph: &mut Graph) {
        let language = response.detected_language();

        debug!(
            source = %self.source.uri,
            annotations = response.annotations.len(),
            "Writing flat enhancements"
        );

        for annotation in &response.annotations {
            let text_annotation = self.text_annotation(graph, annotation);
            self.entity_annotation(graph, annotation, language, &text_annotation);
            link_entity(graph, annotation, language);
        }

        self.detected_language(graph, response);
    }

    /// Enhancement node with the provenance every FISE node carries
    fn enhancement(&self, graph: &mut Graph, class: &Iri) -> Iri {
        let node = self.ids.mint();
        graph.add(&node, &vocab::RDF_TYPE, &vocab::FISE_ENHANCEMENT);
        graph.add(&node, &vocab::RDF_TYPE, class);
        graph.add(&node, &vocab::FISE_EXTRACTED_FROM, self.source.uri);
        graph.add(&node, &vocab::DC_CREATOR, Literal::string(ENGINE_NAME));
        graph.add(&node, &vocab::DC_CREATED, Literal::date_time(self.created));
        node
    }

    fn text_annotation(&self, graph: &mut Graph, annotation: &Annotation) -> Iri {
        let node = self.enhancement(graph, &vocab::FISE_TEXT_ANNOTATION);
        graph.add(&node, &vocab::FISE_START, offset(annotation.start));
        graph.add(&node, &vocab::FISE_END, offset(annotation.end));
        graph.add(
            &node,
            &vocab::FISE_SELECTED_TEXT,
            Literal::plain(annotation.spot.as_str()),
        );
        node
    }

    fn entity_annotation(
        &self,
        graph: &mut Graph,
        annotation: &Annotation,
        language: Option<&str>,
        text_annotation: &Iri,
    ) -> Iri {
        let node = self.enhancement(graph, &vocab::FISE_ENTITY_ANNOTATION);
        graph.add(
            &node,
            &vocab::FISE_ENTITY_REFERENCE,
            resolve_entity_uri(annotation),
        );
        graph.add(
            &node,
            &vocab::FISE_ENTITY_LABEL,
            Literal::lang(annotation.title.as_str(), language),
        );
        graph.add(
            &node,
            &vocab::FISE_CONFIDENCE,
            Literal::double(f64::from(annotation.confidence)),
        );
        for entity_type in annotation.types() {
            graph.add(&node, &vocab::FISE_ENTITY_TYPE, Iri::new(entity_type.as_str()));
        }
        graph.add(&node, &vocab::DC_RELATION, text_annotation);
        node
    }

    /// Language enhancement, only when none is known and one was detected
    fn detected_language(&self, graph: &mut Graph, response: &NexResponse) {
        if let Some(existing) = known_language(graph) {
            debug!(language = %existing, "Language already known, not adding another");
            return;
        }
        let Some(language) = response.detected_language() else {
            return;
        };

        let node = self.enhancement(graph, &vocab::FISE_TEXT_ANNOTATION);
        graph.add(&node, &vocab::DC_LANGUAGE, Literal::plain(language));
        graph.add(
            &node,
            &vocab::FISE_CONFIDENCE,
            Literal::double(f64::from(response.lang_confidence)),
        );
        graph.add(&node, &vocab::DC_TYPE, &vocab::DCTERMS_LINGUISTIC_SYSTEM);
    }
}

fn offset(value: usize) -> Literal {
    Literal::int(i64::try_from(value).unwrap_or(i64::MAX))
}
