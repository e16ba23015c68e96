//! Form-encoded request bodies
//!
//! Parameters whose value is absent or blank after trimming are left out
//! entirely. Values are trimmed and form-encoded; names are trusted
//! constants and written as-is. Output order follows insertion order.

use std::fmt;

use url::form_urlencoded::byte_serialize;

/// `&`-joined, form-encoded query string builder
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryData {
    query: String,
}

impl QueryData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `key=value` unless the value is absent or blank
    pub fn add<V: AsRef<str>>(mut self, key: &str, value: Option<V>) -> Self {
        if let Some(value) = value {
            let value = value.as_ref().trim();
            if !value.is_empty() {
                if !self.query.is_empty() {
                    self.query.push('&');
                }
                self.query.push_str(key);
                self.query.push('=');
                self.query.extend(byte_serialize(value.as_bytes()));
            }
        }
        self
    }

    pub fn as_str(&self) -> &str {
        &self.query
    }

    pub fn is_empty(&self) -> bool {
        self.query.is_empty()
    }

    pub fn into_string(self) -> String {
        self.query
    }
}

impl fmt::Display for QueryData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.query)
    }
}

impl<'a, V: AsRef<str>> FromIterator<(&'a str, Option<V>)> for QueryData {
    fn from_iter<I: IntoIterator<Item = (&'a str, Option<V>)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |query, (key, value)| query.add(key, value))
    }
}

/// Form-encode a single value
pub fn encode_component(value: &str) -> String {
    byte_serialize(value.as_bytes()).collect()
}
