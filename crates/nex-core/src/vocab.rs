//! RDF vocabularies used by the translators
//!
//! FISE is the flat enhancement structure; FAM, OpenAnnotation and NIF make
//! up the linked (body/target/selector) model.

use crate::graph::Iri;

// ============================================================================
// W3C core
// ============================================================================

pub const RDF_TYPE: Iri = Iri::from_static("http://www.w3.org/1999/02/22-rdf-syntax-ns#type");

pub const RDFS_LABEL: Iri = Iri::from_static("http://www.w3.org/2000/01/rdf-schema#label");
/// Short abstracts
pub const RDFS_COMMENT: Iri = Iri::from_static("http://www.w3.org/2000/01/rdf-schema#comment");

pub const XSD_STRING: Iri = Iri::from_static("http://www.w3.org/2001/XMLSchema#string");
pub const XSD_INT: Iri = Iri::from_static("http://www.w3.org/2001/XMLSchema#int");
pub const XSD_FLOAT: Iri = Iri::from_static("http://www.w3.org/2001/XMLSchema#float");
pub const XSD_DOUBLE: Iri = Iri::from_static("http://www.w3.org/2001/XMLSchema#double");
pub const XSD_DATE_TIME: Iri = Iri::from_static("http://www.w3.org/2001/XMLSchema#dateTime");

// ============================================================================
// Dublin Core and FOAF
// ============================================================================

pub const DC_LANGUAGE: Iri = Iri::from_static("http://purl.org/dc/terms/language");
pub const DC_TYPE: Iri = Iri::from_static("http://purl.org/dc/terms/type");
pub const DC_RELATION: Iri = Iri::from_static("http://purl.org/dc/terms/relation");
pub const DC_CREATOR: Iri = Iri::from_static("http://purl.org/dc/terms/creator");
pub const DC_CREATED: Iri = Iri::from_static("http://purl.org/dc/terms/created");
pub const DCTERMS_LINGUISTIC_SYSTEM: Iri =
    Iri::from_static("http://purl.org/dc/terms/LinguisticSystem");

pub const FOAF_DEPICTION: Iri = Iri::from_static("http://xmlns.com/foaf/0.1/depiction");

// ============================================================================
// FISE (flat convention)
// ============================================================================

pub const FISE_ENHANCEMENT: Iri =
    Iri::from_static("http://fise.iks-project.eu/ontology/Enhancement");
pub const FISE_TEXT_ANNOTATION: Iri =
    Iri::from_static("http://fise.iks-project.eu/ontology/TextAnnotation");
pub const FISE_ENTITY_ANNOTATION: Iri =
    Iri::from_static("http://fise.iks-project.eu/ontology/EntityAnnotation");
pub const FISE_EXTRACTED_FROM: Iri =
    Iri::from_static("http://fise.iks-project.eu/ontology/extracted-from");
pub const FISE_START: Iri = Iri::from_static("http://fise.iks-project.eu/ontology/start");
pub const FISE_END: Iri = Iri::from_static("http://fise.iks-project.eu/ontology/end");
pub const FISE_SELECTED_TEXT: Iri =
    Iri::from_static("http://fise.iks-project.eu/ontology/selected-text");
pub const FISE_ENTITY_REFERENCE: Iri =
    Iri::from_static("http://fise.iks-project.eu/ontology/entity-reference");
pub const FISE_ENTITY_LABEL: Iri =
    Iri::from_static("http://fise.iks-project.eu/ontology/entity-label");
pub const FISE_ENTITY_TYPE: Iri =
    Iri::from_static("http://fise.iks-project.eu/ontology/entity-type");
pub const FISE_CONFIDENCE: Iri = Iri::from_static("http://fise.iks-project.eu/ontology/confidence");

// ============================================================================
// FAM (linked convention)
// ============================================================================

pub const FAM_ENTITY_ANNOTATION: Iri =
    Iri::from_static("http://vocab.fusepool.info/fam#EntityAnnotation");
pub const FAM_LANGUAGE_ANNOTATION: Iri =
    Iri::from_static("http://vocab.fusepool.info/fam#LanguageAnnotation");
pub const FAM_ENTITY_REFERENCE: Iri =
    Iri::from_static("http://vocab.fusepool.info/fam#entity-reference");
pub const FAM_ENTITY_LABEL: Iri = Iri::from_static("http://vocab.fusepool.info/fam#entity-label");
pub const FAM_ENTITY_TYPE: Iri = Iri::from_static("http://vocab.fusepool.info/fam#entity-type");
pub const FAM_CONFIDENCE: Iri = Iri::from_static("http://vocab.fusepool.info/fam#confidence");
/// Shortcut from a body to its selector
pub const FAM_SELECTOR: Iri = Iri::from_static("http://vocab.fusepool.info/fam#selector");
/// Shortcut from a body (or language annotation) to the source
pub const FAM_EXTRACTED_FROM: Iri =
    Iri::from_static("http://vocab.fusepool.info/fam#extracted-from");

// ============================================================================
// OpenAnnotation
// ============================================================================

pub const OA_ANNOTATION: Iri = Iri::from_static("http://www.w3.org/ns/oa#Annotation");
pub const OA_ANNOTATED_AT: Iri = Iri::from_static("http://www.w3.org/ns/oa#annotatedAt");
pub const OA_ANNOTATED_BY: Iri = Iri::from_static("http://www.w3.org/ns/oa#annotatedBy");
pub const OA_SERIALIZED_AT: Iri = Iri::from_static("http://www.w3.org/ns/oa#serializedAt");
pub const OA_SERIALIZED_BY: Iri = Iri::from_static("http://www.w3.org/ns/oa#serializedBy");
pub const OA_SPECIFIC_RESOURCE: Iri = Iri::from_static("http://www.w3.org/ns/oa#SpecificResource");
pub const OA_HAS_BODY: Iri = Iri::from_static("http://www.w3.org/ns/oa#hasBody");
pub const OA_HAS_TARGET: Iri = Iri::from_static("http://www.w3.org/ns/oa#hasTarget");
pub const OA_HAS_SOURCE: Iri = Iri::from_static("http://www.w3.org/ns/oa#hasSource");
pub const OA_HAS_SELECTOR: Iri = Iri::from_static("http://www.w3.org/ns/oa#hasSelector");

// ============================================================================
// NIF
// ============================================================================

pub const NIF_STRING: Iri =
    Iri::from_static("http://persistence.uni-leipzig.org/nlp2rdf/ontologies/nif-core#String");
pub const NIF_RFC5147_STRING: Iri =
    Iri::from_static(concat!(
        "http://persistence.uni-leipzig.org/nlp2rdf/ontologies/nif-core",
        "#RFC5147String"
    ));
pub const NIF_CONTEXT: Iri =
    Iri::from_static("http://persistence.uni-leipzig.org/nlp2rdf/ontologies/nif-core#Context");
pub const NIF_SOURCE_URL: Iri =
    Iri::from_static("http://persistence.uni-leipzig.org/nlp2rdf/ontologies/nif-core#sourceURL");
pub const NIF_BEGIN_INDEX: Iri =
    Iri::from_static("http://persistence.uni-leipzig.org/nlp2rdf/ontologies/nif-core#beginIndex");
pub const NIF_END_INDEX: Iri =
    Iri::from_static("http://persistence.uni-leipzig.org/nlp2rdf/ontologies/nif-core#endIndex");
pub const NIF_ANCHOR_OF: Iri =
    Iri::from_static("http://persistence.uni-leipzig.org/nlp2rdf/ontologies/nif-core#anchorOf");
pub const NIF_HEAD: Iri =
    Iri::from_static("http://persistence.uni-leipzig.org/nlp2rdf/ontologies/nif-core#head");
pub const NIF_TAIL: Iri =
    Iri::from_static("http://persistence.uni-leipzig.org/nlp2rdf/ontologies/nif-core#tail");
pub const NIF_BEFORE: Iri =
    Iri::from_static("http://persistence.uni-leipzig.org/nlp2rdf/ontologies/nif-core#before");
pub const NIF_AFTER: Iri =
    Iri::from_static("http://persistence.uni-leipzig.org/nlp2rdf/ontologies/nif-core#after");
pub const NIF_REFERENCE_CONTEXT: Iri = Iri::from_static(
    "http://persistence.uni-leipzig.org/nlp2rdf/ontologies/nif-core#referenceContext",
);

// ============================================================================
// Identifier conventions
// ============================================================================

/// Suffix appended to a body IRI to name its target
pub const SPTARGET_URI_SUFFIX: &str = "-sptarget";

/// Suffix appended to a body IRI to name its annotation
pub const ANNO_URI_SUFFIX: &str = "-annotation";

/// Prefix of freshly minted enhancement nodes
pub const ENHANCEMENT_URN_PREFIX: &str = "urn:enhancement-";

/// Namespace for entities the service returns without a URI
pub const EXTRA_TYPES_NAMESPACE: &str = "http://dandelion.eu/extra_types/";
