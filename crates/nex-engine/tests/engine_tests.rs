//! Engine Integration Tests
//!
//! Full path through configuration, the reqwest transport, a mock NEX
//! service on an ephemeral local port, and both output conventions.
//!
//! Author: hephaex@gmail.com

use std::collections::HashMap;

use axum::{http::StatusCode, routing::post, Form, Router};
use nex_core::{vocab, AppConfig, Convention, Iri, Literal, NexError};
use nex_engine::{CanEnhance, ContentItem, NexEngine};
use tokio::net::TcpListener;

const TEXT: &str = "The Mona Lisa is a 16th century oil painting created by Leonardo. \
                    It's held at the Louvre in Paris.";

const MONA_LISA: &str = include_str!("../../nex-translate/tests/fixtures/mona_lisa.json");

/// Mock service: rejects bad keys, rejects the `xx` language, otherwise
/// answers with the recorded Mona Lisa response
async fn mock_nex(Form(params): Form<HashMap<String, String>>) -> (StatusCode, String) {
    if params.get("$app_key").map(String::as_str) != Some("test-key") {
        return (
            StatusCode::UNAUTHORIZED,
            r#"{"error": true, "code": "error.authenticationError", "message": "Bad credentials"}"#
                .to_string(),
        );
    }

    if params.get("lang").map(String::as_str) == Some("xx") {
        return (
            StatusCode::BAD_REQUEST,
            r#"{"error": true, "code": "error.unmanagedLanguage",
                "message": "Unmanaged language [xx]", "data": {"lang": "xx"}}"#
                .to_string(),
        );
    }

    assert_eq!(params.get("text").map(String::as_str), Some(TEXT));
    assert_eq!(
        params.get("include").map(String::as_str),
        Some("types,image,abstract")
    );
    (StatusCode::OK, MONA_LISA.to_string())
}

async fn spawn_mock() -> String {
    let app = Router::new().route("/datatxt/nex/v1", post(mock_nex));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/datatxt/nex/v1")
}

fn config(endpoint: &str, key: &str, convention: Convention) -> AppConfig {
    let mut config = AppConfig::default();
    config.service.url = endpoint.to_string();
    config.service.app_id = Some("test-id".to_string());
    config.service.app_key = Some(key.to_string());
    config.output.convention = convention;
    config
}

fn item() -> ContentItem {
    ContentItem::new(Iri::new("urn:content-item-mona-lisa"), format!("  {TEXT}\n"))
}

// =============================================================================
// Conventions
// =============================================================================

#[tokio::test]
async fn test_flat_end_to_end() {
    let endpoint = spawn_mock().await;
    let engine = NexEngine::from_config(&config(&endpoint, "test-key", Convention::Flat)).unwrap();

    let mut item = item();
    assert_eq!(engine.can_enhance(&item), CanEnhance::Synchronous);
    engine.compute_enhancements(&mut item).await.unwrap();

    let metadata = &item.metadata;
    assert_eq!(metadata.instances_of(&vocab::FISE_ENTITY_ANNOTATION).len(), 5);
    assert_eq!(item.language().as_deref(), Some("en"));
    assert!(metadata.instances_of(&vocab::OA_ANNOTATION).is_empty());
}

#[tokio::test]
async fn test_linked_end_to_end() {
    let endpoint = spawn_mock().await;
    let engine =
        NexEngine::from_config(&config(&endpoint, "test-key", Convention::Linked)).unwrap();

    let metadata = engine
        .annotate(Iri::new("urn:content-item-mona-lisa"), TEXT)
        .await
        .unwrap();

    assert_eq!(metadata.instances_of(&vocab::OA_ANNOTATION).len(), 5);
    assert_eq!(metadata.instances_of(&vocab::FAM_LANGUAGE_ANNOTATION).len(), 1);

    let selector = Iri::new("urn:content-item-mona-lisa#char=83,89");
    assert_eq!(
        metadata
            .object(&selector, &vocab::NIF_ANCHOR_OF)
            .and_then(|t| t.as_literal())
            .map(Literal::lexical),
        Some("Louvre")
    );
}

// =============================================================================
// Failures
// =============================================================================

#[tokio::test]
async fn test_unsupported_language() {
    let endpoint = spawn_mock().await;
    let engine =
        NexEngine::from_config(&config(&endpoint, "test-key", Convention::Linked)).unwrap();

    let mut item = item();
    let earlier = Iri::new("urn:enhancement-langid");
    item.metadata
        .add(&earlier, &vocab::DC_TYPE, &vocab::DCTERMS_LINGUISTIC_SYSTEM);
    item.metadata
        .add(&earlier, &vocab::DC_LANGUAGE, Literal::plain("xx"));
    let before = item.metadata.len();

    let err = engine.compute_enhancements(&mut item).await.unwrap_err();
    assert_eq!(err.unsupported_language(), Some("xx"));
    assert_eq!(item.metadata.len(), before);
}

#[tokio::test]
async fn test_bad_credentials_are_transport_failures() {
    let endpoint = spawn_mock().await;
    let engine =
        NexEngine::from_config(&config(&endpoint, "wrong-key", Convention::Flat)).unwrap();

    let mut item = item();
    let err = engine.compute_enhancements(&mut item).await.unwrap_err();
    assert!(matches!(err, NexError::Transport { status: Some(401), .. }));
    assert!(item.metadata.is_empty());
}

#[test]
fn test_invalid_country_rejected_at_construction() {
    let mut with_types = config("http://127.0.0.1:9/nex", "test-key", Convention::Flat);
    with_types.service.extra_types = vec!["phone".to_string()];
    with_types.service.country = Some("XX".to_string());
    assert!(matches!(
        NexEngine::from_config(&with_types),
        Err(NexError::Config(_))
    ));

    let mut without_types = config("http://127.0.0.1:9/nex", "test-key", Convention::Flat);
    without_types.service.country = Some("XX".to_string());
    assert!(NexEngine::from_config(&without_types).is_ok());
}
