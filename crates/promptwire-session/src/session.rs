//! Session handling for one-shot and streaming requests.

use std::collections::HashMap;

use serde_json::Value;
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

use promptwire_core::{parse, parse_deferred, Dispatcher};
use promptwire_protocols::{ParseError, PortRequest, PortResponse, RequestDescriptor, StreamEvent};

/// One session over the messaging boundary.
#[derive(Debug, Clone, Default)]
pub struct Session {
    dispatcher: Dispatcher,
}

impl Session {
    pub fn new() -> Self {
        Self {
            dispatcher: Dispatcher::new(),
        }
    }

    /// Handle a one-shot request and produce its wire response. Parse
    /// failures are answered without any network activity.
    pub async fn handle_request(&self, request: PortRequest) -> PortResponse {
        let PortRequest::MakeRequest {
            curl_command,
            message,
            form_data,
        } = request
        else {
            return PortResponse::err("streaming requests must use the streaming port");
        };

        let descriptor = match build_descriptor(&curl_command, message, form_data) {
            Ok(descriptor) => descriptor,
            Err(error) => return PortResponse::err(error.to_string()),
        };
        match self.dispatcher.dispatch(descriptor).await {
            Ok(data) => PortResponse::ok(data),
            Err(error) => PortResponse::err(error.to_string()),
        }
    }

    /// Handle a streaming request, forwarding ordered events to the port
    /// sink. Exactly one terminal event ends the stream; a parse failure
    /// emits it without any network activity.
    pub async fn handle_streaming(
        &self,
        request: PortRequest,
        port: &UnboundedSender<StreamEvent>,
    ) {
        let PortRequest::MakeStreamingRequest {
            curl_command,
            message,
            form_data,
        } = request
        else {
            let _ = port.send(StreamEvent::error(
                "one-shot requests must not use the streaming port",
            ));
            return;
        };

        let descriptor = match build_descriptor(&curl_command, message, form_data) {
            Ok(descriptor) => descriptor,
            Err(error) => {
                let _ = port.send(StreamEvent::error(error.to_string()));
                return;
            }
        };
        debug!(url = %descriptor.url, "starting streaming dispatch");
        self.dispatcher.dispatch_streaming(descriptor, port).await;
    }
}

/// Build a descriptor from the wire fields: a pre-built payload selects
/// deferred-schema parsing; otherwise the message is substituted inline.
fn build_descriptor(
    curl_command: &str,
    message: Option<String>,
    form_data: Option<Value>,
) -> Result<RequestDescriptor, ParseError> {
    match form_data {
        Some(payload) => Ok(parse_deferred(curl_command)?.with_body(payload)),
        None => {
            let mut substitutions = HashMap::new();
            substitutions.insert("message".to_string(), message.unwrap_or_default());
            parse(curl_command, &substitutions)
        }
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
