//! Shared translation helpers
//!
//! Entity description, entity URI resolution, and lookup of a language that
//! an earlier enhancement already recorded on the item.

use nex_core::{vocab, Annotation, Graph, Iri, Literal, Term};
use url::form_urlencoded::byte_serialize;

/// Placeholder URI for an entity the service returned without one
///
/// Derived only from the title, so the same title always yields the same URI.
pub fn fallback_entity_uri(title: &str) -> Iri {
    let encoded: String = byte_serialize(title.as_bytes()).collect();
    Iri::new(format!("{}{encoded}", vocab::EXTRA_TYPES_NAMESPACE))
}

/// Canonical entity URI, or the title-derived fallback
pub fn resolve_entity_uri(annotation: &Annotation) -> Iri {
    match annotation.uri.as_deref().map(str::trim) {
        Some(uri) if !uri.is_empty() => Iri::new(uri),
        _ => fallback_entity_uri(&annotation.title),
    }
}

/// Describe the entity node linked from `annotation`
///
/// Statements are not deduplicated: call once per annotation.
pub fn link_entity(graph: &mut Graph, annotation: &Annotation, language: Option<&str>) -> Iri {
    let entity = resolve_entity_uri(annotation);

    for entity_type in annotation.types() {
        graph.add(&entity, &vocab::RDF_TYPE, Iri::new(entity_type.as_str()));
    }

    if let Some(summary) = annotation.summary.as_deref() {
        graph.add(&entity, &vocab::RDFS_COMMENT, Literal::lang(summary, language));
    }

    if !annotation.title.is_empty() {
        graph.add(
            &entity,
            &vocab::RDFS_LABEL,
            Literal::lang(annotation.title.as_str(), language),
        );
    }

    if let Some(image) = &annotation.image {
        let depiction = [image.thumbnail.as_deref(), image.full.as_deref()]
            .into_iter()
            .flatten()
            .find(|url| !url.trim().is_empty());
        if let Some(url) = depiction {
            graph.add(&entity, &vocab::FOAF_DEPICTION, Iri::new(url));
        }
    }

    entity
}

/// Language already recorded on the item's metadata
///
/// A language enhancement is a subject typed `dc:type dcterms:LinguisticSystem`
/// or `rdf:type fam:LanguageAnnotation` that carries `dc:language`. When
/// several exist, the most confident one wins.
pub fn known_language(graph: &Graph) -> Option<String> {
    let linguistic_system = Term::from(&vocab::DCTERMS_LINGUISTIC_SYSTEM);
    let language_annotation = Term::from(&vocab::FAM_LANGUAGE_ANNOTATION);

    let best = graph
        .filter(None, Some(&vocab::DC_LANGUAGE), None)
        .filter(|t| {
            graph.contains(&t.subject, &vocab::DC_TYPE, &linguistic_system)
                || graph.contains(&t.subject, &vocab::RDF_TYPE, &language_annotation)
        })
        .filter_map(|t| {
            let language = t.object.as_literal()?.lexical().trim();
            if language.is_empty() {
                return None;
            }
            Some((language, confidence(graph, &t.subject)))
        })
        .fold(None, |best: Option<(&str, f64)>, candidate| match best {
            Some(current) if current.1 >= candidate.1 => Some(current),
            _ => Some(candidate),
        });

    best.map(|(language, _)| language.to_string())
}

fn confidence(graph: &Graph, subject: &Iri) -> f64 {
    [&vocab::FISE_CONFIDENCE, &vocab::FAM_CONFIDENCE]
        .into_iter()
        .filter_map(|predicate| graph.object(subject, predicate))
        .filter_map(|term| term.as_literal().and_then(Literal::as_f64))
        .next()
        .unwrap_or(0.0)
}
