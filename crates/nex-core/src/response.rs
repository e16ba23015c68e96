//! Parsed shape of an annotation service response
//!
//! Successful responses carry annotations and a language guess; failed
//! calls reuse the same object with `error`, `code` and `message` set.

use serde::{Deserialize, Deserializer, Serialize};

/// Explicit `null` reads as the field's default, like an absent field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Response of the NEX annotation service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NexResponse {
    /// Processing time reported by the service, in milliseconds
    #[serde(deserialize_with = "null_as_default")]
    pub time: i64,

    /// Detected (or declared) language code
    pub lang: Option<String>,

    /// Confidence of the detected language
    #[serde(deserialize_with = "null_as_default")]
    pub lang_confidence: f32,

    /// Entity mentions, in service order
    #[serde(deserialize_with = "null_as_default")]
    pub annotations: Vec<Annotation>,

    /// Set on domain-specific failures
    #[serde(deserialize_with = "null_as_default")]
    pub error: bool,

    /// Dotted error code, e.g. `error.unmanagedLanguage`
    pub code: Option<String>,

    /// Human-readable error message, may embed the offending value in brackets
    pub message: Option<String>,
}

impl NexResponse {
    /// Detected language, if the service produced a non-empty one
    pub fn detected_language(&self) -> Option<&str> {
        self.lang.as_deref().filter(|l| !l.trim().is_empty())
    }
}

/// One entity mention returned by the service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Annotation {
    /// Start offset in characters
    #[serde(deserialize_with = "null_as_default")]
    pub start: usize,

    /// End offset in characters (exclusive)
    #[serde(deserialize_with = "null_as_default")]
    pub end: usize,

    /// Text at `[start, end)` of the request text
    #[serde(deserialize_with = "null_as_default")]
    pub spot: String,

    #[serde(deserialize_with = "null_as_default")]
    pub confidence: f32,

    /// Display label of the linked entity
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,

    /// Canonical entity URI; absent for phone and VAT matches
    pub uri: Option<String>,

    #[serde(rename = "abstract")]
    pub summary: Option<String>,

    pub types: Option<Vec<String>>,

    pub image: Option<Image>,
}

impl Annotation {
    /// Type URIs, empty when the service sent none
    pub fn types(&self) -> &[String] {
        self.types.as_deref().unwrap_or_default()
    }
}

/// Depiction of a linked entity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Image {
    pub full: Option<String>,
    pub thumbnail: Option<String>,
}
