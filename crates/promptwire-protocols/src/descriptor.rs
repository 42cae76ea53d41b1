//! Request descriptor produced by command parsing.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default content type seeded into every descriptor's header map.
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// Insertion-ordered header map with overwrite-on-insert semantics.
///
/// Header names compare ASCII case-insensitively; a later insert with the
/// same name replaces the value in place, keeping the original position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeaderMap {
    entries: Vec<(String, String)>,
}

impl HeaderMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a header.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self
            .entries
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(&name))
        {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The structured (url, headers, body) triple produced by command parsing
/// and consumed exactly once by dispatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestDescriptor {
    /// Absolute target URL; always carries an explicit scheme.
    pub url: String,
    /// Outbound headers, seeded with a JSON content type.
    pub headers: HeaderMap,
    /// Inline payload, or `None` when the payload arrives out-of-band.
    pub body: Option<Value>,
}

impl RequestDescriptor {
    /// Create a descriptor with the default header set.
    pub fn new(url: impl Into<String>) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert("Content-Type", DEFAULT_CONTENT_TYPE);
        Self {
            url: url.into(),
            headers,
            body: None,
        }
    }

    /// Attach an out-of-band payload (deferred-schema mode).
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}
