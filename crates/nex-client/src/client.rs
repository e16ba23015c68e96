//! NEX annotation service client
//!
//! Builds the form-encoded request, performs exactly one POST per call and
//! classifies the outcome. The network call itself lives behind
//! [`Transport`], a minimal unit that a host can wrap, constrain or replace
//! without touching query building or response classification.
//!
//! Author: hephaex@gmail.com

use std::sync::Arc;

use async_trait::async_trait;
use nex_core::{NexConfig, NexError, NexResponse, Result, ServiceSettings};
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tracing::{debug, info, warn};
use url::Url;

use crate::query::QueryData;

/// Content type of every request body
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Optional response sections always requested
pub const INCLUDE: &str = "types,image,abstract";

/// Error code fragment signalling a language the service cannot handle
pub const UNMANAGED_LANGUAGE_CODE: &str = "unmanagedLanguage";

static BRACKETED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[(.*?)\]").expect("bracket pattern is valid"));

// ============================================================================
// Transport
// ============================================================================

/// Raw HTTP outcome: status and the full body, whatever the status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 2xx status family
    pub fn is_success(&self) -> bool {
        self.status / 100 == 2
    }
}

/// The single network operation the client performs
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST a form-encoded body and return the status and full body
    async fn post_form(&self, url: &Url, body: String) -> Result<HttpReply>;
}

/// [`Transport`] backed by reqwest
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a preconfigured client (timeouts, proxies, TLS roots)
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn post_form(&self, url: &Url, body: String) -> Result<HttpReply> {
        let response = self
            .client
            .post(url.clone())
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(body)
            .send()
            .await
            .map_err(|e| NexError::Transport {
                status: None,
                message: format!("Http request could not be completed: {e}"),
            })?;

        let status = response.status().as_u16();

        // Error responses carry JSON too, so the body is always read
        let body = response.text().await.map_err(|e| NexError::Transport {
            status: Some(status),
            message: format!("Response body could not be read: {e}"),
        })?;

        Ok(HttpReply { status, body })
    }
}

// ============================================================================
// Client
// ============================================================================

/// Client for the NEX named entity extraction endpoint
///
/// The configuration is immutable after construction, so one client can be
/// shared across tasks issuing concurrent requests.
#[derive(Clone)]
pub struct NexClient {
    config: NexConfig,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for NexClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NexClient")
            .field("endpoint", &self.config.endpoint().as_str())
            .finish_non_exhaustive()
    }
}

impl NexClient {
    /// Create a client using the default reqwest transport
    pub fn new(config: NexConfig) -> Self {
        Self::with_transport(config, Arc::new(ReqwestTransport::new()))
    }

    /// Create a client with a custom transport
    pub fn with_transport(config: NexConfig, transport: Arc<dyn Transport>) -> Self {
        Self { config, transport }
    }

    /// Create from raw service settings
    pub fn from_settings(settings: &ServiceSettings) -> Result<Self> {
        Ok(Self::new(settings.to_config()?))
    }

    pub fn config(&self) -> &NexConfig {
        &self.config
    }

    /// Build the request body for `text` with an optional language hint
    pub fn query(&self, text: &str, lang: Option<&str>) -> QueryData {
        let config = &self.config;
        let extra_types = config.extra_types_param();

        QueryData::new()
            .add("$app_id", Some(config.app_id()))
            .add("$app_key", Some(config.app_key()))
            .add("lang", lang)
            .add("min_confidence", Some(config.min_confidence().to_string()))
            .add("min_length", Some(config.min_length().to_string()))
            .add("extra_types", extra_types.as_deref())
            .add("country", config.country())
            // custom_spots carries the extra_types value; the configured
            // custom_spots setting is not sent
            .add("custom_spots", extra_types.as_deref())
            .add("include", Some(INCLUDE))
            .add("text", Some(text))
    }

    /// Annotate `text`; exactly one POST, never retried
    pub async fn request(&self, text: &str, lang: Option<&str>) -> Result<NexResponse> {
        let endpoint = self.config.endpoint();
        info!(endpoint = %endpoint, "POSTing annotation request");

        let query = self.query(text, lang);
        debug!(
            endpoint = %endpoint,
            body_bytes = query.as_str().len(),
            lang = lang.unwrap_or(""),
            "Prepared request body"
        );

        let reply = self
            .transport
            .post_form(endpoint, query.into_string())
            .await?;

        info!(status = reply.status, "Annotation service responded");
        debug!(body = %reply.body, "Response content");

        classify(reply)
    }
}

// ============================================================================
// Response classification
// ============================================================================

/// Turn a raw reply into a response or the matching failure
pub fn classify(reply: HttpReply) -> Result<NexResponse> {
    if reply.is_success() {
        return serde_json::from_str(&reply.body)
            .map_err(|e| NexError::Parse(format!("JSON response could not be parsed: {e}")));
    }

    warn!(
        status = reply.status,
        body = %reply.body,
        "Annotation service returned an error response"
    );

    if let Ok(response) = serde_json::from_str::<NexResponse>(&reply.body) {
        if is_unmanaged_language(&response) {
            let language = response.message.as_deref().and_then(extract_language);
            return Err(NexError::UnsupportedLanguage { language });
        }
    }

    Err(NexError::Transport {
        status: Some(reply.status),
        message: format!(
            "Invalid response: code={}, response={}",
            reply.status, reply.body
        ),
    })
}

/// Whether an error response reports an unmanaged language
pub fn is_unmanaged_language(response: &NexResponse) -> bool {
    response.error
        && response
            .code
            .as_deref()
            .is_some_and(|code| code.contains(UNMANAGED_LANGUAGE_CODE))
}

/// First bracketed token of an error message: `"Unmanaged language [zz]"` -> `zz`
pub fn extract_language(message: &str) -> Option<String> {
    BRACKETED
        .captures(message)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use nex_core::config::DEFAULT_NEX_URL;
    use nex_core::ExtraType;
    use std::sync::Mutex;

    /// Transport returning a canned reply and recording every body it sees
    struct MockTransport {
        reply: Result<HttpReply>,
        requests: Mutex<Vec<(String, String)>>,
    }

    impl MockTransport {
        fn replying(status: u16, body: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(HttpReply::new(status, body)),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                reply: Err(NexError::Transport {
                    status: None,
                    message: "connection refused".to_string(),
                }),
                requests: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn post_form(&self, url: &Url, body: String) -> Result<HttpReply> {
            self.requests
                .lock()
                .unwrap()
                .push((url.to_string(), body));
            match &self.reply {
                Ok(reply) => Ok(reply.clone()),
                Err(NexError::Transport { status, message }) => Err(NexError::Transport {
                    status: *status,
                    message: message.clone(),
                }),
                Err(other) => panic!("unexpected canned error {other}"),
            }
        }
    }

    fn config() -> NexConfig {
        NexConfig::builder(DEFAULT_NEX_URL)
            .app_id("my-id")
            .app_key("my-key")
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_success_response() {
        let transport = MockTransport::replying(
            200,
            r#"{"time": 3, "lang": "en", "langConfidence": 1.0, "annotations": []}"#,
        );
        let client = NexClient::with_transport(config(), transport.clone());

        let response = client.request("Some text", Some("en")).await.unwrap();
        assert_eq!(response.time, 3);
        assert_eq!(response.detected_language(), Some("en"));

        let requests = transport.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].0, DEFAULT_NEX_URL);
        assert_eq!(
            requests[0].1,
            "$app_id=my-id&$app_key=my-key&lang=en&min_confidence=0.6&min_length=2\
             &include=types%2Cimage%2Cabstract&text=Some+text"
        );
    }

    #[tokio::test]
    async fn test_malformed_success_body() {
        let client = NexClient::with_transport(config(), MockTransport::replying(200, "<html>"));
        let err = client.request("text", None).await.unwrap_err();
        assert!(matches!(err, NexError::Parse(_)));
    }

    #[tokio::test]
    async fn test_unmanaged_language() {
        let body = r#"{"error": true, "code": "error.unmanagedLanguage",
                       "message": "Unmanaged language [zz]"}"#;
        let client = NexClient::with_transport(config(), MockTransport::replying(400, body));

        let err = client.request("text", Some("zz")).await.unwrap_err();
        assert_eq!(err.unsupported_language(), Some("zz"));
    }

    #[tokio::test]
    async fn test_unmanaged_language_without_bracket() {
        let body = r#"{"error": true, "code": "error.unmanagedLanguage",
                       "message": "Unmanaged language"}"#;
        let client = NexClient::with_transport(config(), MockTransport::replying(400, body));

        let err = client.request("text", None).await.unwrap_err();
        assert!(matches!(err, NexError::UnsupportedLanguage { language: None }));
    }

    #[tokio::test]
    async fn test_other_error_is_transport_failure() {
        let body = r#"{"error": true, "code": "error.authenticationError", "message": "bad key"}"#;
        let client = NexClient::with_transport(config(), MockTransport::replying(401, body));

        let err = client.request("text", None).await.unwrap_err();
        assert_eq!(err.status(), Some(401));
        let message = err.to_string();
        assert!(message.contains("401"));
        assert!(message.contains("bad key"));
        assert!(!message.contains("my-key"));
    }

    #[tokio::test]
    async fn test_non_json_error_body() {
        let client =
            NexClient::with_transport(config(), MockTransport::replying(502, "Bad Gateway"));
        let err = client.request("text", None).await.unwrap_err();
        assert_eq!(err.status(), Some(502));
        assert!(err.to_string().contains("Bad Gateway"));
    }

    #[tokio::test]
    async fn test_network_failure() {
        let transport = MockTransport::failing();
        let client = NexClient::with_transport(config(), transport.clone());

        let err = client.request("text", None).await.unwrap_err();
        assert!(matches!(err, NexError::Transport { status: None, .. }));
        assert_eq!(transport.requests.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_query_with_extra_types() {
        let config = NexConfig::builder(DEFAULT_NEX_URL)
            .app_id("id")
            .app_key("key")
            .min_confidence(0.75)
            .min_length(3)
            .extra_types([ExtraType::Phone, ExtraType::Vat])
            .country("it")
            .custom_spots("my-spots")
            .build()
            .unwrap();
        let client = NexClient::new(config);

        let query = client.query("Chiamare 055 1234", None).into_string();
        assert_eq!(
            query,
            "$app_id=id&$app_key=key&min_confidence=0.75&min_length=3\
             &extra_types=phone%2Cvat&country=IT&custom_spots=phone%2Cvat\
             &include=types%2Cimage%2Cabstract&text=Chiamare+055+1234"
        );
    }

    #[test]
    fn test_custom_spots_follows_extra_types() {
        // The configured custom spot collection never reaches the request;
        // custom_spots mirrors extra_types instead.
        let config = NexConfig::builder(DEFAULT_NEX_URL)
            .app_id("id")
            .app_key("key")
            .custom_spots("my-spots")
            .build()
            .unwrap();
        let query = NexClient::new(config).query("text", None).into_string();
        assert!(!query.contains("custom_spots"));
        assert!(!query.contains("my-spots"));
    }

    #[test]
    fn test_extract_language() {
        assert_eq!(
            extract_language("Unmanaged language [zz]").as_deref(),
            Some("zz")
        );
        assert_eq!(extract_language("[a] then [b]").as_deref(), Some("a"));
        assert_eq!(extract_language("Unmanaged language zz"), None);
        assert_eq!(extract_language("empty []").as_deref(), Some(""));
    }

    #[test]
    fn test_unmanaged_language_requires_error_flag() {
        let response = NexResponse {
            error: false,
            code: Some("error.unmanagedLanguage".to_string()),
            ..Default::default()
        };
        assert!(!is_unmanaged_language(&response));

        let response = NexResponse {
            error: true,
            code: Some("error.unmanagedLanguage".to_string()),
            ..Default::default()
        };
        assert!(is_unmanaged_language(&response));
    }

    #[test]
    fn test_http_reply_status_family() {
        assert!(HttpReply::new(200, "").is_success());
        assert!(HttpReply::new(204, "").is_success());
        assert!(!HttpReply::new(301, "").is_success());
        assert!(!HttpReply::new(400, "").is_success());
    }

    #[test]
    fn test_null_fields_keep_annotations() {
        let reply = HttpReply::new(
            200,
            r#"{"lang": "en", "langConfidence": null, "annotations": [
                {"start": 0, "end": 12, "spot": "055 1234567", "confidence": 1.0,
                 "title": null, "uri": null}]}"#,
        );
        let response = classify(reply).unwrap();
        assert_eq!(response.annotations.len(), 1);
        assert!(response.annotations[0].title.is_empty());
    }
}
