//! The I/O seam between the client and the network.
//!
//! `Transport` executes one `HttpRequest` and hands back the status and body
//! as data. Non-2xx statuses are not errors at this level; only failures to
//! complete the round-trip are.

use crate::error::TransportError;
use crate::http::{HttpRequest, HttpResponse};

/// Executes a single GET request.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Blocking transport backed by a ureq agent.
///
/// The agent is configured so that 4xx/5xx responses come back as data
/// rather than `Err`, leaving status interpretation to `read_json`. No
/// timeouts are set beyond ureq's own defaults.
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
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self.agent.get(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let mut response = builder
            .call()
            .map_err(|e| TransportError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| TransportError::Body(e.to_string()))?;

        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreachable_host_is_a_request_error() {
        // Port 9 on localhost (discard) is closed on any sane test machine.
        let transport = UreqTransport::new();
        let request = HttpRequest {
            url: "http://127.0.0.1:9/".to_string(),
            headers: Vec::new(),
        };
        let err = transport.execute(&request).unwrap_err();
        assert!(matches!(err, TransportError::Request(_)));
    }

    #[test]
    fn malformed_url_is_a_request_error() {
        let transport = UreqTransport::new();
        let request = HttpRequest {
            url: "not a url".to_string(),
            headers: Vec::new(),
        };
        assert!(matches!(transport.execute(&request), Err(TransportError::Request(_))));
    }
}
