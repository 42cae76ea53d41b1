//! # Promptwire Protocols
//!
//! Shared types for the promptwire relay: the request descriptor produced by
//! command parsing, the stream event union delivered during streaming
//! dispatch, the error taxonomy, result path projection, and the wire
//! messages spoken across the session boundary.

pub mod descriptor;
pub mod error;
pub mod event;
pub mod path;
pub mod wire;

pub use descriptor::{HeaderMap, RequestDescriptor, DEFAULT_CONTENT_TYPE};
pub use error::{DispatchError, ParseError};
pub use event::StreamEvent;
pub use path::PathExpr;
pub use wire::{PortRequest, PortResponse, STREAMING_PORT};
