//! Mock registration backend and email relay for testing
//!
//! One wiremock server plays both collaborators: the REST endpoints under
//! `/api/...` and `/id-card/...`, and the relay's `/api/v1.0/email/send`.

use serde_json::{json, Value};
use wiremock::{
    matchers::{header, method, path},
    Mock, MockServer, ResponseTemplate,
};

pub const EMAIL_SEND_PATH: &str = "/api/v1.0/email/send";

/// Mock backend + relay server for testing
pub struct BackendMockServer {
    pub server: MockServer,
}

/// Configuration for mock responses
#[derive(Debug, Clone)]
pub struct MockResponseConfig {
    pub status: u16,
    pub delay_ms: Option<u64>,
    pub expected_calls: Option<u64>,
}

impl Default for MockResponseConfig {
    fn default() -> Self {
        Self {
            status: 200,
            delay_ms: None,
            expected_calls: None,
        }
    }
}

impl MockResponseConfig {
    pub fn status(status: u16) -> Self {
        Self {
            status,
            ..Self::default()
        }
    }

    pub fn expect(mut self, calls: u64) -> Self {
        self.expected_calls = Some(calls);
        self
    }

    fn template(&self) -> ResponseTemplate {
        let mut response = ResponseTemplate::new(self.status);
        if let Some(delay) = self.delay_ms {
            response = response.set_delay(std::time::Duration::from_millis(delay));
        }
        response
    }
}

impl BackendMockServer {
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    async fn mount(&self, mock: wiremock::MockBuilder, response: ResponseTemplate, config: &MockResponseConfig) {
        let mut mock = mock.respond_with(response);
        if let Some(calls) = config.expected_calls {
            mock = mock.expect(calls);
        }
        mock.mount(&self.server).await;
    }

    /// `GET /api/events/`
    pub async fn mock_events(&self, events: Vec<Value>, config: MockResponseConfig) {
        let response = config.template().set_body_json(Value::Array(events));
        self.mount(Mock::given(method("GET")).and(path("/api/events/")), response, &config).await;
    }

    /// `GET /api/events/` answering with an error status
    pub async fn mock_events_error(&self, status: u16) {
        let config = MockResponseConfig::status(status);
        let response = config.template().set_body_json(json!({ "detail": "Server error" }));
        self.mount(Mock::given(method("GET")).and(path("/api/events/")), response, &config).await;
    }

    /// `GET /api/events/{id}/`
    pub async fn mock_event_detail(&self, event_id: &str, event: Value, config: MockResponseConfig) {
        let response = config.template().set_body_json(event);
        let route = format!("/api/events/{}/", event_id);
        self.mount(Mock::given(method("GET")).and(path(route)), response, &config).await;
    }

    /// `POST /api/registrations/` accepting the request
    pub async fn mock_registration_created(&self, registration_id: u64, qr_code_image: &str, config: MockResponseConfig) {
        let response = config.template().set_body_json(json!({
            "id": registration_id,
            "qr_code_image": qr_code_image,
            "email_sent": false
        }));
        self.mount(
            Mock::given(method("POST")).and(path("/api/registrations/")),
            response,
            &config,
        )
        .await;
    }

    /// `POST /api/registrations/` only matching when the anti-forgery header carries `token`
    pub async fn mock_registration_requiring_csrf(&self, token: &str, registration_id: u64) {
        let config = MockResponseConfig::default().expect(1);
        let response = config.template().set_body_json(json!({
            "id": registration_id,
            "qr_code_image": "data:image/png;base64,iVBORw0KGgo=",
        }));
        self.mount(
            Mock::given(method("POST"))
                .and(path("/api/registrations/"))
                .and(header("X-CSRFToken", token)),
            response,
            &config,
        )
        .await;
    }

    /// `POST /api/registrations/` answering with a raw body
    pub async fn mock_registration_response(&self, status: u16, body: &str) {
        let config = MockResponseConfig::status(status);
        let response = config.template().set_body_string(body);
        self.mount(
            Mock::given(method("POST")).and(path("/api/registrations/")),
            response,
            &config,
        )
        .await;
    }

    /// `POST {relay}/api/v1.0/email/send`
    pub async fn mock_email_send(&self, config: MockResponseConfig) {
        let response = config.template().set_body_string("OK");
        self.mount(Mock::given(method("POST")).and(path(EMAIL_SEND_PATH)), response, &config).await;
    }

    /// `GET /id-card/{id}/download/`
    pub async fn mock_id_card(&self, registration_id: &str, pdf: &[u8], config: MockResponseConfig) {
        let response = config
            .template()
            .insert_header("Content-Type", "application/pdf")
            .set_body_bytes(pdf.to_vec());
        let route = format!("/id-card/{}/download/", registration_id);
        self.mount(Mock::given(method("GET")).and(path(route)), response, &config).await;
    }

    /// Plain resource, e.g. a QR image served by URL
    pub async fn mock_resource(&self, route: &str, bytes: &[u8]) {
        let config = MockResponseConfig::default();
        let response = config.template().set_body_bytes(bytes.to_vec());
        self.mount(Mock::given(method("GET")).and(path(route)), response, &config).await;
    }

    /// Bodies of all relay requests received so far
    pub async fn email_requests(&self) -> Vec<Value> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|request| request.url.path() == EMAIL_SEND_PATH)
            .filter_map(|request| serde_json::from_slice(&request.body).ok())
            .collect()
    }

    /// Number of requests received on `route`
    pub async fn request_count(&self, route: &str) -> usize {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|request| request.url.path() == route)
            .count()
    }

    pub async fn reset(&self) {
        self.server.reset().await;
    }
}
