//! Stream events delivered during streaming dispatch.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// One event on a streaming dispatch channel.
///
/// Zero or more `Content` events are followed by exactly one terminal
/// `Done` or `Error`. Serialized shapes match the original port messages:
/// `{"content": ...}`, `{"error": "..."}`, `{"done": true}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StreamEvent {
    /// One decoded chunk.
    Content { content: Value },
    /// Terminal failure.
    Error { error: String },
    /// Terminal success.
    Done { done: bool },
}

impl StreamEvent {
    pub fn content(value: Value) -> Self {
        Self::Content { content: value }
    }

    /// Wrap raw text as a minimal `{"text": ...}` record.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Content {
            content: json!({ "text": text.into() }),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            error: message.into(),
        }
    }

    pub fn done() -> Self {
        Self::Done { done: true }
    }

    /// Whether this event ends the stream.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Error { .. } | Self::Done { .. })
    }
}
