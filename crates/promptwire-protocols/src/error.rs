//! Error taxonomy for parsing and dispatch.

use thiserror::Error;

/// Command-template parse failures, surfaced before any network activity.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid CURL command: URL not found")]
    MissingUrl,

    #[error("Could not find $data_json_schema$ placeholder in CURL command")]
    MissingPayloadPlaceholder,
}

/// Dispatch failures, surfaced as a terminal result or stream event.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("HTTP error! status: {status}, message: {body}")]
    HttpStatus { status: u16, body: String },

    /// The hint carries the full human-readable diagnostic, expanded for
    /// local targets.
    #[error("{hint}")]
    ConnectionFailed { url: String, hint: String },

    #[error("Failed to decode response: {0}")]
    DecodeFailure(String),
}
