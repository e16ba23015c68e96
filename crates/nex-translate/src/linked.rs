//! Linked convention (FAM, OpenAnnotation, NIF)
//!
//! One context node per call stands for the whole text. Each mention gets a
//! selector anchored to that context, a body describing the entity, a
//! target tying selector and source together, and an annotation node
//! linking body and target. Target and annotation IRIs are derived from the
//! body IRI, so both are recoverable from the body alone.

use chrono::{DateTime, Utc};
use nex_core::{vocab, Annotation, Graph, IdGenerator, Iri, Literal, NexResponse};
use tracing::debug;

use crate::selector::{write_context, Selector};
use crate::support::{known_language, link_entity, resolve_entity_uri};
use crate::{Source, ENGINE_NAME};

/// Target IRI for a body
pub fn target_uri(body: &Iri) -> Iri {
    body.with_suffix(vocab::SPTARGET_URI_SUFFIX)
}

/// Annotation IRI for a body
pub fn annotation_uri(body: &Iri) -> Iri {
    body.with_suffix(vocab::ANNO_URI_SUFFIX)
}

/// Writes linked-convention statements for one translation call
pub struct LinkedWriter<'a> {
    ids: &'a dyn IdGenerator,
    source: &'a Source<'a>,
    annotated_at: DateTime<Utc>,
}

impl<'a> LinkedWriter<'a> {
    pub fn new(
        ids: &'a dyn IdGenerator,
        source: &'a Source<'a>,
        annotated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            ids,
            source,
            annotated_at,
        }
    }

    pub fn translate(&self, response: &NexResponse, graph: &mut Graph) {
        let language = response.detected_language();

        debug!(
            source = %self.source.uri,
            annotations = response.annotations.len(),
            "Writing linked annotations"
        );

        let context = write_context(self.source.uri, graph);

        for annotation in &response.annotations {
            link_entity(graph, annotation, language);

            let selector = Selector::build(
                self.source.uri,
                &context,
                self.source.text,
                annotation.start,
                annotation.end,
                &annotation.spot,
            );
            selector.write(graph);

            let body = self.body(graph, annotation, language, &selector.uri);
            let target = self.target(graph, &body, &selector.uri);
            self.annotation(graph, &body, &target);
        }

        self.language_annotation(graph, response);
    }

    fn body(
        &self,
        graph: &mut Graph,
        annotation: &Annotation,
        language: Option<&str>,
        selector: &Iri,
    ) -> Iri {
        let body = self.ids.mint();

        graph.add(&body, &vocab::RDF_TYPE, &vocab::FAM_ENTITY_ANNOTATION);
        graph.add(
            &body,
            &vocab::FAM_ENTITY_REFERENCE,
            resolve_entity_uri(annotation),
        );
        graph.add(
            &body,
            &vocab::FAM_ENTITY_LABEL,
            Literal::lang(annotation.title.as_str(), language),
        );
        graph.add(
            &body,
            &vocab::FAM_CONFIDENCE,
            Literal::float(annotation.confidence),
        );

        // Shortcuts to the selector and the source
        graph.add(&body, &vocab::FAM_SELECTOR, selector);
        graph.add(&body, &vocab::FAM_EXTRACTED_FROM, self.source.uri);

        for entity_type in annotation.types() {
            graph.add(&body, &vocab::FAM_ENTITY_TYPE, Iri::new(entity_type.as_str()));
        }

        body
    }

    fn target(&self, graph: &mut Graph, body: &Iri, selector: &Iri) -> Iri {
        let target = target_uri(body);
        graph.add(&target, &vocab::RDF_TYPE, &vocab::OA_SPECIFIC_RESOURCE);
        graph.add(&target, &vocab::OA_HAS_SELECTOR, selector);
        graph.add(&target, &vocab::OA_HAS_SOURCE, self.source.uri);
        target
    }

    fn annotation(&self, graph: &mut Graph, body: &Iri, target: &Iri) -> Iri {
        let node = annotation_uri(body);
        let at = Literal::date_time(self.annotated_at);
        let by = Literal::string(ENGINE_NAME);

        graph.add(&node, &vocab::OA_SERIALIZED_AT, at.clone());
        graph.add(&node, &vocab::OA_ANNOTATED_AT, at);
        graph.add(&node, &vocab::OA_SERIALIZED_BY, by.clone());
        graph.add(&node, &vocab::OA_ANNOTATED_BY, by);
        graph.add(&node, &vocab::RDF_TYPE, &vocab::OA_ANNOTATION);
        graph.add(&node, &vocab::OA_HAS_BODY, body);
        graph.add(&node, &vocab::OA_HAS_TARGET, target);
        node
    }

    /// Language annotation, only when none is known and one was detected
    fn language_annotation(&self, graph: &mut Graph, response: &NexResponse) {
        if known_language(graph).is_some() {
            return;
        }
        let Some(language) = response.detected_language() else {
            return;
        };

        let node = self.ids.mint();
        graph.add(&node, &vocab::RDF_TYPE, &vocab::FAM_LANGUAGE_ANNOTATION);
        graph.add(&node, &vocab::DC_LANGUAGE, Literal::string(language));
        graph.add(
            &node,
            &vocab::FAM_CONFIDENCE,
            Literal::float(response.lang_confidence),
        );
        graph.add(&node, &vocab::FAM_EXTRACTED_FROM, self.source.uri);
    }
}
