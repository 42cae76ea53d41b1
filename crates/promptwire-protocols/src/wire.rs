//! Wire messages spoken across the session boundary.
//!
//! The JSON shapes match the extension messaging contract: a one-shot
//! request/response pair, and a named streaming port carrying
//! [`crate::StreamEvent`]s.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Name of the channel carrying streaming requests and events.
pub const STREAMING_PORT: &str = "streaming-port";

/// Inbound request from the caller.
///
/// `message` feeds the `$message$` placeholder (inline templates);
/// `form_data` is a caller-built payload for deferred-schema templates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
pub enum PortRequest {
    /// One-shot buffered request.
    #[serde(rename = "makeRequest")]
    MakeRequest {
        curl_command: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        form_data: Option<Value>,
    },
    /// Streaming request, valid only on the streaming port.
    #[serde(rename = "makeStreamingRequest")]
    MakeStreamingRequest {
        curl_command: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        form_data: Option<Value>,
    },
}

/// Response to a one-shot request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PortResponse {
    pub fn ok(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}
