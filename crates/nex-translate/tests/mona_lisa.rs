//! Translation Integration Tests
//!
//! Translates a recorded five-entity service response under both
//! conventions and checks the resulting graph shape.
//!
//! Author: hephaex@gmail.com

use std::sync::Arc;

use nex_core::{vocab, Convention, Graph, Iri, Literal, NexResponse, SequentialIds, Term};
use nex_translate::{annotation_uri, known_language, target_uri, Source, Translator};

const TEXT: &str = "The Mona Lisa is a 16th century oil painting created by Leonardo. \
                    It's held at the Louvre in Paris.";

const ENTITIES: [&str; 5] = [
    "http://en.wikipedia.org/wiki/Mona_Lisa",
    "http://en.wikipedia.org/wiki/Oil_painting",
    "http://en.wikipedia.org/wiki/Leonardo_da_Vinci",
    "http://en.wikipedia.org/wiki/The_Louvre",
    "http://en.wikipedia.org/wiki/Paris",
];

fn response() -> NexResponse {
    serde_json::from_str(include_str!("fixtures/mona_lisa.json")).unwrap()
}

fn translate(convention: Convention) -> Graph {
    let translator = Translator::with_ids(convention, Arc::new(SequentialIds::new()));
    let uri = Iri::new("urn:content-item-mona-lisa");
    let mut graph = Graph::new();
    translator.translate(&Source::new(&uri, TEXT), &response(), &mut graph);
    graph
}

fn iri_object<'g>(graph: &'g Graph, subject: &Iri, predicate: &Iri) -> &'g Iri {
    graph
        .object(subject, predicate)
        .and_then(Term::as_iri)
        .unwrap_or_else(|| panic!("{subject} has no IRI value for {predicate}"))
}

fn literal_object<'g>(graph: &'g Graph, subject: &Iri, predicate: &Iri) -> &'g str {
    graph
        .object(subject, predicate)
        .and_then(Term::as_literal)
        .map(Literal::lexical)
        .unwrap_or_else(|| panic!("{subject} has no literal value for {predicate}"))
}

// =============================================================================
// Flat convention
// =============================================================================

#[test]
fn test_flat_entity_annotations() {
    let graph = translate(Convention::Flat);

    let entity_annotations = graph.instances_of(&vocab::FISE_ENTITY_ANNOTATION);
    assert_eq!(entity_annotations.len(), 5);

    let references: Vec<&str> = entity_annotations
        .iter()
        .map(|node| iri_object(&graph, node, &vocab::FISE_ENTITY_REFERENCE).as_str())
        .collect();
    assert_eq!(references, ENTITIES);

    for node in &entity_annotations {
        let text_annotation = iri_object(&graph, node, &vocab::DC_RELATION);
        assert!(graph.contains(
            text_annotation,
            &vocab::RDF_TYPE,
            &Term::from(&vocab::FISE_TEXT_ANNOTATION)
        ));
    }
}

#[test]
fn test_flat_selected_text_matches_offsets() {
    let graph = translate(Convention::Flat);

    for node in graph.subjects(&vocab::RDF_TYPE, &Term::from(&vocab::FISE_TEXT_ANNOTATION)) {
        let Some(selected) = graph
            .object(node, &vocab::FISE_SELECTED_TEXT)
            .and_then(Term::as_literal)
        else {
            // the language enhancement has no span
            continue;
        };
        let start: usize = literal_object(&graph, node, &vocab::FISE_START).parse().unwrap();
        let end: usize = literal_object(&graph, node, &vocab::FISE_END).parse().unwrap();
        assert_eq!(&TEXT[start..end], selected.lexical());
    }
}

#[test]
fn test_flat_single_language_node() {
    let graph = translate(Convention::Flat);

    let linguistic = Term::from(&vocab::DCTERMS_LINGUISTIC_SYSTEM);
    let nodes: Vec<&Iri> = graph.subjects(&vocab::DC_TYPE, &linguistic).collect();
    assert_eq!(nodes.len(), 1);
    assert_eq!(literal_object(&graph, nodes[0], &vocab::DC_LANGUAGE), "en");
    assert_eq!(
        graph
            .object(nodes[0], &vocab::FISE_CONFIDENCE)
            .and_then(Term::as_literal)
            .and_then(Literal::as_f64),
        Some(1.0)
    );
}

#[test]
fn test_entity_nodes_described() {
    let graph = translate(Convention::Flat);

    let mona_lisa = Iri::new(ENTITIES[0]);
    assert_eq!(graph.objects(&mona_lisa, &vocab::RDF_TYPE).count(), 2);
    assert!(graph.object(&mona_lisa, &vocab::RDFS_COMMENT).is_some());
    assert!(iri_object(&graph, &mona_lisa, &vocab::FOAF_DEPICTION)
        .as_str()
        .ends_with("?width=300"));

    let leonardo = Iri::new(ENTITIES[2]);
    assert_eq!(
        graph.object(&leonardo, &vocab::RDFS_LABEL),
        Some(&Term::from(Literal::lang("Leonardo da Vinci", Some("en"))))
    );
    assert!(iri_object(&graph, &leonardo, &vocab::FOAF_DEPICTION)
        .as_str()
        .ends_with("Leonardo_self.jpg"));

    let oil_painting = Iri::new(ENTITIES[1]);
    assert_eq!(graph.objects(&oil_painting, &vocab::RDF_TYPE).count(), 0);
    assert!(graph.object(&oil_painting, &vocab::FOAF_DEPICTION).is_none());
}

// =============================================================================
// Linked convention
// =============================================================================

#[test]
fn test_linked_annotations() {
    let graph = translate(Convention::Linked);

    let annotations = graph.instances_of(&vocab::OA_ANNOTATION);
    assert_eq!(annotations.len(), 5);
    assert_eq!(graph.instances_of(&vocab::FAM_LANGUAGE_ANNOTATION).len(), 1);
    assert_eq!(graph.instances_of(&vocab::NIF_CONTEXT).len(), 1);

    for annotation in annotations {
        let body = iri_object(&graph, annotation, &vocab::OA_HAS_BODY);
        let target = iri_object(&graph, annotation, &vocab::OA_HAS_TARGET);

        assert_eq!(target, &target_uri(body));
        assert_eq!(annotation, &annotation_uri(body));
        assert_eq!(
            iri_object(&graph, body, &vocab::FAM_SELECTOR),
            iri_object(&graph, target, &vocab::OA_HAS_SELECTOR)
        );
        assert_eq!(
            iri_object(&graph, body, &vocab::FAM_EXTRACTED_FROM),
            iri_object(&graph, target, &vocab::OA_HAS_SOURCE)
        );
    }
}

#[test]
fn test_linked_selectors() {
    let graph = translate(Convention::Linked);

    let mona_lisa = Iri::new("urn:content-item-mona-lisa#char=4,13");
    assert_eq!(literal_object(&graph, &mona_lisa, &vocab::NIF_ANCHOR_OF), "Mona Lisa");
    assert_eq!(literal_object(&graph, &mona_lisa, &vocab::NIF_BEFORE), "The ");
    assert_eq!(literal_object(&graph, &mona_lisa, &vocab::NIF_AFTER), " is a 16th");
    assert_eq!(literal_object(&graph, &mona_lisa, &vocab::NIF_HEAD), TEXT);
    assert_eq!(literal_object(&graph, &mona_lisa, &vocab::NIF_TAIL), TEXT);

    let paris = Iri::new("urn:content-item-mona-lisa#char=93,98");
    assert_eq!(literal_object(&graph, &paris, &vocab::NIF_BEFORE), "Louvre in ");
    assert_eq!(literal_object(&graph, &paris, &vocab::NIF_AFTER), ".");
    assert_eq!(
        iri_object(&graph, &paris, &vocab::NIF_REFERENCE_CONTEXT).as_str(),
        "urn:content-item-mona-lisa#char=0"
    );
}

#[test]
fn test_linked_body_labels_are_language_tagged() {
    let graph = translate(Convention::Linked);

    let bodies = graph.instances_of(&vocab::FAM_ENTITY_ANNOTATION);
    assert_eq!(bodies.len(), 5);
    for body in bodies {
        let label = graph
            .object(body, &vocab::FAM_ENTITY_LABEL)
            .and_then(Term::as_literal)
            .unwrap();
        assert_eq!(label.language(), Some("en"));
    }
}

#[test]
fn test_existing_language_is_left_alone() {
    let translator = Translator::with_ids(Convention::Linked, Arc::new(SequentialIds::new()));
    let uri = Iri::new("urn:content-item-mona-lisa");

    let mut graph = Graph::new();
    let earlier = Iri::new("urn:enhancement-langdetect");
    graph.add(&earlier, &vocab::DC_TYPE, &vocab::DCTERMS_LINGUISTIC_SYSTEM);
    graph.add(&earlier, &vocab::DC_LANGUAGE, Literal::plain("en"));

    translator.translate(&Source::new(&uri, TEXT), &response(), &mut graph);

    assert!(graph.instances_of(&vocab::FAM_LANGUAGE_ANNOTATION).is_empty());
    assert_eq!(known_language(&graph).as_deref(), Some("en"));
}

#[test]
fn test_ntriples_output() {
    let graph = translate(Convention::Linked);
    let ntriples = graph.to_string();

    assert_eq!(ntriples.lines().count(), graph.len());
    assert!(ntriples.contains(
        "<urn:enhancement-1-annotation> <http://www.w3.org/ns/oa#hasBody> <urn:enhancement-1> ."
    ));
}
