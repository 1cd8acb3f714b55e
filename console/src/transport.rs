//! The host side of the host-does-IO split: executing `HttpRequest`s.
//!
//! # Design
//! `Transport` is the only place the console touches the network. Status
//! codes are data here, never errors; `ApiClient::parse_json` decides what
//! counts as failure. `ApiError::Transport` is reserved for requests that
//! never produced a response.

use escola_core::{ApiError, HttpMethod, HttpRequest, HttpResponse};

/// Executes one request, once. No retries, no timeout.
pub trait Transport: Send + Sync {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// Blocking transport backed by a shared `ureq::Agent`.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        let sent = match request.method {
            HttpMethod::Get => {
                let mut builder = self.agent.get(&request.url);
                for (name, value) in &request.headers {
                    builder = builder.header(name, value);
                }
                builder.call()
            }
            HttpMethod::Post => {
                let mut builder = self.agent.post(&request.url);
                for (name, value) in &request.headers {
                    builder = builder.header(name, value);
                }
                match &request.body {
                    Some(body) => builder.send(body.as_bytes()),
                    None => builder.send_empty(),
                }
            }
        };
        let mut response = sent.map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    value.to_str().unwrap_or_default().to_string(),
                )
            })
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(HttpResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            headers,
            body,
        })
    }
}
