//! Backend API client
//!
//! This service wraps the REST endpoints the registration page talks to:
//! the event catalog, single event detail, registration creation and the
//! ID-card PDF download.

use std::time::Duration;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::config::ApiConfig;
use crate::models::{ApiErrorBody, CreateRegistrationRequest, Event, RegistrationCreated};
use crate::utils::errors::{ApiError, GatePassError, Result};

/// Shown when the backend rejects a registration without an `error` field
pub const REGISTRATION_FALLBACK_ERROR: &str =
    "Registration failed. You may already be registered for this event.";

/// Header carrying the anti-forgery token
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// HTTP client for the registration backend
#[derive(Clone, Debug)]
pub struct BackendClient {
    client: Client,
    base_url: Url,
}

impl BackendClient {
    /// Create a new BackendClient instance
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("GatePass/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(GatePassError::Http)?;

        Ok(Self {
            client,
            base_url: Url::parse(&config.base_url)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve a page-relative path or absolute URL against the page origin
    pub fn resolve(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    /// `GET /api/events/`
    pub async fn list_events(&self) -> Result<Vec<Event>> {
        let url = self.resolve("/api/events/")?;
        debug!(url = %url, "Fetching event catalog");

        let response = self.client.get(url).send().await.map_err(ApiError::from_transport)?;
        let response = Self::ensure_success(response).await?;
        Self::decode(response).await
    }

    /// `GET /api/events/{id}/`
    pub async fn get_event(&self, event_id: &str) -> Result<Event> {
        let url = self.resolve(&format!("/api/events/{}/", event_id))?;
        debug!(url = %url, "Fetching event detail");

        let response = self.client.get(url).send().await.map_err(ApiError::from_transport)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(GatePassError::EventNotFound {
                event_id: event_id.to_string(),
            });
        }
        let response = Self::ensure_success(response).await?;
        Self::decode(response).await
    }

    /// `POST /api/registrations/`
    ///
    /// A non-2xx JSON response becomes [`GatePassError::RegistrationRejected`]
    /// with the server's `error` text, or a fallback when there is none. A
    /// non-2xx body that is not JSON is an invalid response.
    pub async fn create_registration(
        &self,
        request: &CreateRegistrationRequest,
        csrf_token: Option<&str>,
    ) -> Result<RegistrationCreated> {
        let url = self.resolve("/api/registrations/")?;
        debug!(url = %url, event_id = %request.event, "Creating registration");

        let mut builder = self.client.post(url).json(request);
        match csrf_token {
            Some(token) => builder = builder.header(CSRF_HEADER, token),
            None => warn!("No anti-forgery token available; submitting without it"),
        }

        let response = builder.send().await.map_err(ApiError::from_transport)?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let parsed = serde_json::from_str::<ApiErrorBody>(&body).map_err(|e| {
                warn!(status = status.as_u16(), error = %e, "Undecodable rejection body");
                ApiError::InvalidResponse(format!("HTTP {}: {}", status.as_u16(), e))
            })?;
            let message = parsed
                .error
                .filter(|error| !error.is_empty())
                .unwrap_or_else(|| REGISTRATION_FALLBACK_ERROR.to_string());
            warn!(status = status.as_u16(), message = %message, "Registration rejected");
            return Err(GatePassError::RegistrationRejected(message));
        }

        Self::decode(response).await
    }

    /// `GET /id-card/{registrationId}/download/`
    pub async fn fetch_id_card(&self, registration_id: &str) -> Result<Vec<u8>> {
        let url = self.resolve(&format!("/id-card/{}/download/", registration_id))?;
        debug!(url = %url, "Fetching ID card");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| GatePassError::Download(e.to_string()))?;

        if !response.status().is_success() {
            return Err(GatePassError::Download(format!(
                "Failed to generate ID card (HTTP {})",
                response.status().as_u16()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| GatePassError::Download(e.to_string()))?;
        Ok(bytes.to_vec())
    }

    /// Fetch an arbitrary resource (non-inline QR sources)
    pub async fn fetch_bytes(&self, source: &str) -> Result<Vec<u8>> {
        let url = self.resolve(source)?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| GatePassError::Download(e.to_string()))?;

        if !response.status().is_success() {
            return Err(GatePassError::Download(format!(
                "HTTP {} fetching {}",
                response.status().as_u16(),
                source
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| GatePassError::Download(e.to_string()))?;
        Ok(bytes.to_vec())
    }

    async fn ensure_success(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&body)
            .ok()
            .and_then(|parsed| parsed.error)
            .unwrap_or(body);
        Err(GatePassError::Api(ApiError::Status {
            status: status.as_u16(),
            message,
        }))
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        response
            .json::<T>()
            .await
            .map_err(|e| GatePassError::Api(ApiError::InvalidResponse(e.to_string())))
    }
}
