//! Outbound HTTP transport

use eyre::{Context, Result};
use std::time::Duration;

use super::signing::SIGNATURE_HEADER;

/// One signed POST, ready to send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookRequest<'a> {
    pub url: &'a str,
    /// Full `X-Hub-Signature` header value
    pub signature: &'a str,
    pub body: &'a [u8],
}

/// Sends a single webhook request and reports the HTTP status.
///
/// Implementations must be safe to share between threads; dispatches hold no
/// lock around the transport.
pub trait Transport: Send + Sync {
    fn post(&self, request: &WebhookRequest<'_>) -> Result<u16>;
}

/// Blocking transport backed by a `ureq` agent
pub struct HttpTransport {
    agent: ureq::Agent,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();
        Self { agent }
    }
}

impl Transport for HttpTransport {
    fn post(&self, request: &WebhookRequest<'_>) -> Result<u16> {
        let response = self
            .agent
            .post(request.url)
            .header("Content-Type", "application/json")
            .header(SIGNATURE_HEADER, request.signature)
            .send(request.body)
            .context(format!("HTTP request to {} failed", request.url))?;

        Ok(response.status().as_u16())
    }
}
