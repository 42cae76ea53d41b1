//! Request dispatch.
//!
//! Executes a [`RequestDescriptor`] as an outbound HTTP POST, either
//! buffered (one structured result) or streaming (ordered events over a
//! channel until a single terminal event).

use futures::StreamExt;
use serde_json::{json, Value};
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

use promptwire_protocols::{DispatchError, RequestDescriptor, StreamEvent};

/// HTTP dispatcher. Each call owns its own response reader; concurrent
/// dispatches are independent.
#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    client: reqwest::Client,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Buffered dispatch: await the full response and return one structured
    /// value. Non-JSON responses still come back structured, wrapped as
    /// `{"text": ...}` when they cannot be decoded.
    pub async fn dispatch(&self, descriptor: RequestDescriptor) -> Result<Value, DispatchError> {
        let response = self.send(&descriptor).await?;
        let is_json = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.contains("application/json"));
        let text = response
            .text()
            .await
            .map_err(|e| DispatchError::DecodeFailure(e.to_string()))?;

        match serde_json::from_str(&text) {
            Ok(value) => Ok(value),
            Err(e) => {
                if is_json {
                    debug!(error = %e, "json content type with undecodable body");
                }
                Ok(json!({ "text": text }))
            }
        }
    }

    /// Streaming dispatch: forward ordered [`StreamEvent`]s to the sink
    /// until exactly one terminal event. A failure before the read loop
    /// starts emits the terminal error without entering the loop; a dropped
    /// receiver ends the dispatch.
    pub async fn dispatch_streaming(
        &self,
        descriptor: RequestDescriptor,
        sink: &UnboundedSender<StreamEvent>,
    ) {
        let response = match self.send(&descriptor).await {
            Ok(response) => response,
            Err(error) => {
                let _ = sink.send(StreamEvent::error(format!("Fetch error: {error}")));
                return;
            }
        };

        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            match chunk {
                Ok(bytes) => {
                    let text = String::from_utf8_lossy(&bytes);
                    for event in chunk_events(&text) {
                        if sink.send(event).is_err() {
                            return;
                        }
                    }
                }
                Err(error) => {
                    let _ = sink.send(StreamEvent::error(format!("Stream error: {error}")));
                    return;
                }
            }
        }
        let _ = sink.send(StreamEvent::done());
    }

    async fn send(&self, descriptor: &RequestDescriptor) -> Result<reqwest::Response, DispatchError> {
        let mut request = self.client.post(&descriptor.url);
        for (name, value) in descriptor.headers.iter() {
            request = request.header(name, value);
        }
        // A string body goes over the wire verbatim; anything else is
        // serialized to JSON text.
        request = match &descriptor.body {
            Some(Value::String(text)) => request.body(text.clone()),
            Some(value) => request.body(value.to_string()),
            None => request,
        };

        debug!(url = %descriptor.url, "dispatching request");
        let response = request
            .send()
            .await
            .map_err(|e| connection_failed(&descriptor.url, &e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DispatchError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

/// Decode one raw chunk into content events: newline-split, blank lines
/// dropped, a `data: ` prefix stripped, the `[DONE]` sentinel discarded.
/// End-of-stream is signaled by the transport, not the sentinel. Lines that
/// fail JSON decoding are forwarded as `{"text": ...}` records.
pub fn chunk_events(chunk: &str) -> Vec<StreamEvent> {
    let mut events = Vec::new();
    for line in chunk.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let payload = line.strip_prefix("data: ").unwrap_or(line);
        if payload == "[DONE]" {
            continue;
        }
        match serde_json::from_str(payload) {
            Ok(value) => events.push(StreamEvent::content(value)),
            Err(_) => {
                let trimmed = line.trim();
                if !trimmed.is_empty() {
                    events.push(StreamEvent::text(trimmed));
                }
            }
        }
    }
    events
}

/// Translate a send-level failure into a connection error with a
/// human-readable hint; local targets get the expanded checklist.
fn connection_failed(target: &str, error: &reqwest::Error) -> DispatchError {
    let parsed = url::Url::parse(target).ok();
    let host = parsed
        .as_ref()
        .and_then(|u| u.host_str())
        .unwrap_or_default();
    let hint = if host == "localhost" || host == "127.0.0.1" {
        let protocol = parsed.as_ref().map(|u| u.scheme()).unwrap_or("http");
        format!(
            "Connection failed to localhost. Please ensure:\n\
             1. The server is running at {target}\n\
             2. The protocol ({protocol}:) matches your server configuration\n\
             3. The port number is correct"
        )
    } else {
        format!("Connection failed to {target}. Please check the URL and try again.")
    };
    debug!(url = target, error = %error, "request send failed");
    DispatchError::ConnectionFailed {
        url: target.to_string(),
        hint,
    }
}

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;
