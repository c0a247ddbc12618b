//! Webhook dispatching
//!
//! Turns an `(action, fields)` pair into one signed POST. Delivery is
//! best-effort: failures are logged and never reach the caller.

use eyre::Result;

use super::envelope::{Envelope, Fields};
use super::signing;
use super::transport::{HttpTransport, Transport, WebhookRequest};
use crate::config::WebhookConfig;

pub struct Dispatcher {
    config: WebhookConfig,
    transport: Box<dyn Transport>,
}

impl Dispatcher {
    pub fn new(config: WebhookConfig, transport: Box<dyn Transport>) -> Self {
        Self { config, transport }
    }

    /// Dispatcher with the blocking HTTP transport and the configured timeout
    pub fn with_http(config: WebhookConfig) -> Self {
        let timeout = std::time::Duration::from_secs(config.timeout_secs);
        Self::new(config, Box::new(HttpTransport::new(timeout)))
    }

    /// Deliver one event. Never fails; problems are logged.
    pub fn dispatch(&self, action: &str, fields: &Fields) {
        if let Err(e) = self.deliver(action, fields) {
            log::warn!("Webhook delivery for {} dropped: {:#}", action, e);
        }
    }

    /// Build, sign and POST the envelope, returning the response status.
    ///
    /// Makes exactly one request attempt. A non-2xx status is still `Ok`.
    pub fn deliver(&self, action: &str, fields: &Fields) -> Result<u16> {
        let body = Envelope::new(action, fields).to_body()?;
        let signature = signing::signature_header(self.config.secret.expose(), &body)?;

        log::debug!("Webhook body for {}: {}", action, String::from_utf8_lossy(&body));

        let status = self.transport.post(&WebhookRequest {
            url: &self.config.endpoint_url,
            signature: &signature,
            body: &body,
        })?;

        if (200..300).contains(&status) {
            log::info!("Delivered {} to {} ({})", action, self.config.endpoint_url, status);
        } else {
            log::warn!("Endpoint answered {} for {} with status {}", self.config.endpoint_url, action, status);
        }

        Ok(status)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::config::Secret;
    use crate::fields;
    use std::sync::{Arc, Mutex};

    /// A request as the transport saw it
    #[derive(Debug, Clone)]
    pub(crate) struct Recorded {
        pub url: String,
        pub signature: String,
        pub body: Vec<u8>,
    }

    /// Test double that records requests instead of sending them
    #[derive(Clone)]
    pub(crate) struct RecordingTransport {
        pub requests: Arc<Mutex<Vec<Recorded>>>,
        pub status: u16,
    }

    impl RecordingTransport {
        pub(crate) fn new() -> Self {
            Self {
                requests: Arc::default(),
                status: 200,
            }
        }

        pub(crate) fn recorded(&self) -> Vec<Recorded> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl Transport for RecordingTransport {
        fn post(&self, request: &WebhookRequest<'_>) -> Result<u16> {
            self.requests.lock().unwrap().push(Recorded {
                url: request.url.to_string(),
                signature: request.signature.to_string(),
                body: request.body.to_vec(),
            });
            Ok(self.status)
        }
    }

    struct FailingTransport;

    impl Transport for FailingTransport {
        fn post(&self, _request: &WebhookRequest<'_>) -> Result<u16> {
            eyre::bail!("connection refused")
        }
    }

    pub(crate) fn test_config() -> WebhookConfig {
        WebhookConfig {
            endpoint_url: "https://hooks.example.org/wiki".to_string(),
            secret: Secret::new("s3cr3t"),
            timeout_secs: 5,
        }
    }

    #[test]
    fn test_edited_article_scenario() {
        let transport = RecordingTransport::new();
        let dispatcher = Dispatcher::new(test_config(), Box::new(transport.clone()));

        let data = fields! {
            "articleId" => 42i64,
            "title" => "Foo",
            "namespace" => "",
            "user" => "Alice",
            "isMinor" => false,
            "revision" => 101i64,
            "baseRevId" => 100i64,
        };
        dispatcher.dispatch("EditedArticle", &data);

        let sent = transport.recorded();
        assert_eq!(sent.len(), 1);
        let expected_body = r#"{"action":"EditedArticle","data":{"articleId":42,"title":"Foo","namespace":"","user":"Alice","isMinor":false,"revision":101,"baseRevId":100}}"#;
        assert_eq!(String::from_utf8(sent[0].body.clone()).unwrap(), expected_body);
        assert_eq!(sent[0].url, "https://hooks.example.org/wiki");
        assert_eq!(
            sent[0].signature,
            signing::signature_header("s3cr3t", expected_body.as_bytes()).unwrap()
        );
    }

    #[test]
    fn test_signature_covers_transmitted_body() {
        let transport = RecordingTransport::new();
        let dispatcher = Dispatcher::new(test_config(), Box::new(transport.clone()));

        dispatcher.dispatch("BlockedUser", &fields! { "user" => "Mallory", "operator" => "Admin" });

        let recorded = transport.recorded();
        let sent = &recorded[0];
        assert!(signing::verify_signature("s3cr3t", &sent.body, &sent.signature));
    }

    #[test]
    fn test_body_parses_back_to_envelope() {
        let transport = RecordingTransport::new();
        let dispatcher = Dispatcher::new(test_config(), Box::new(transport.clone()));
        let data = fields! { "name" => "File:Cat.png", "size" => 2048i64, "description" => None::<String> };

        assert_eq!(dispatcher.deliver("FileUpload", &data).unwrap(), 200);
        let parsed: serde_json::Value = serde_json::from_slice(&transport.recorded()[0].body).unwrap();

        assert_eq!(parsed["action"], "FileUpload");
        assert_eq!(parsed["data"]["name"], "File:Cat.png");
        assert_eq!(parsed["data"]["size"], 2048);
        assert!(parsed["data"]["description"].is_null());
    }

    #[test]
    fn test_identical_inputs_give_identical_requests() {
        let transport = RecordingTransport::new();
        let dispatcher = Dispatcher::new(test_config(), Box::new(transport.clone()));
        let data = fields! { "user" => "Bob", "autocreated" => true };

        dispatcher.dispatch("NewUser", &data);
        dispatcher.dispatch("NewUser", &data);

        let sent = transport.recorded();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].body, sent[1].body);
        assert_eq!(sent[0].signature, sent[1].signature);
    }

    #[test]
    fn test_empty_fields() {
        let transport = RecordingTransport::new();
        let dispatcher = Dispatcher::new(test_config(), Box::new(transport.clone()));

        dispatcher.dispatch("X", &Fields::new());

        let recorded = transport.recorded();
        let sent = &recorded[0];
        assert_eq!(sent.body, br#"{"action":"X","data":{}}"#);
        assert_eq!(
            sent.signature,
            signing::signature_header("s3cr3t", br#"{"action":"X","data":{}}"#).unwrap()
        );
    }

    #[test]
    fn test_transport_error_is_absorbed() {
        let dispatcher = Dispatcher::new(test_config(), Box::new(FailingTransport));
        // Must return normally
        dispatcher.dispatch("RemovedArticle", &fields! { "title" => "Gone" });
        assert!(dispatcher.deliver("RemovedArticle", &Fields::new()).is_err());
    }

    #[test]
    fn test_non_success_status_is_not_an_error() {
        let transport = RecordingTransport {
            status: 500,
            ..RecordingTransport::new()
        };
        let dispatcher = Dispatcher::new(test_config(), Box::new(transport.clone()));

        let status = dispatcher.deliver("MovedArticle", &Fields::new()).unwrap();
        assert_eq!(status, 500);
        assert_eq!(transport.recorded().len(), 1);
    }
}
