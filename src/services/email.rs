//! Email relay service implementation
//!
//! Confirmation emails are delivered by a third-party relay (EmailJS REST
//! contract): the client posts a service id, a template id, its public key
//! and a flat map of template variables. Delivery is best-effort; callers
//! turn a failure into a status line instead of aborting.

use std::time::Duration;
use chrono::FixedOffset;
use reqwest::Client;
use serde::Serialize;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::config::{BrandingConfig, EmailConfig};
use crate::models::{Event, Registration};
use crate::utils::data_uri::load_logo_data_uri;
use crate::utils::errors::{EmailError, EmailResult};
use crate::utils::helpers::format_date_time;

/// Event fields shown in the email, with fallbacks when the detail fetch failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailEventDetails {
    pub name: String,
    pub venue: String,
    pub date: String,
}

impl EmailEventDetails {
    pub fn from_event(event: Option<&Event>, offset: FixedOffset) -> Self {
        let non_empty = |value: &str, fallback: &str| {
            if value.is_empty() { fallback.to_string() } else { value.to_string() }
        };

        match event {
            Some(event) => Self {
                name: non_empty(&event.name, "Event"),
                venue: non_empty(&event.venue, "TBA"),
                date: format_date_time(event.start_date, offset),
            },
            None => Self::fallback(),
        }
    }

    pub fn fallback() -> Self {
        Self {
            name: "Event".to_string(),
            venue: "TBA".to_string(),
            date: "TBA".to_string(),
        }
    }
}

/// Template variables understood by the confirmation template
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfirmationTemplate {
    pub name: String,
    pub id: String,
    pub email: String,
    pub qr_code: String,
    pub college_logo: String,
    pub college_name: String,
    pub college_tagline: String,
    pub event_name: String,
    pub event_venue: String,
    pub event_date: String,
}

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a ConfirmationTemplate,
}

/// Client for the email relay
#[derive(Debug)]
pub struct EmailRelayClient {
    client: Client,
    config: EmailConfig,
    branding: BrandingConfig,
    logo: OnceCell<String>,
}

impl EmailRelayClient {
    /// Create a new EmailRelayClient instance
    pub fn new(config: EmailConfig, branding: BrandingConfig) -> EmailResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.max(1)))
            .user_agent(concat!("GatePass/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| EmailError::RequestFailed(e.to_string()))?;

        Ok(Self {
            client,
            config,
            branding,
            logo: OnceCell::new(),
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Logo reference for the template: the embedded local file when
    /// configured and readable, the public URL otherwise
    pub async fn logo(&self) -> &str {
        self.logo
            .get_or_init(|| async {
                match &self.branding.logo_path {
                    Some(path) => match load_logo_data_uri(path).await {
                        Ok(data_uri) => data_uri,
                        Err(e) => {
                            warn!(path = %path, error = %e, "Failed to load logo; using public URL");
                            self.branding.logo_url.clone()
                        }
                    },
                    None => self.branding.logo_url.clone(),
                }
            })
            .await
    }

    /// Assemble the template variables for one registration
    pub async fn build_template(
        &self,
        registration: &Registration,
        event: &EmailEventDetails,
    ) -> ConfirmationTemplate {
        ConfirmationTemplate {
            name: registration.name.clone(),
            id: registration.student_id.clone(),
            email: registration.email.clone(),
            qr_code: registration.qr_code_image.clone(),
            college_logo: self.logo().await.to_string(),
            college_name: self.branding.college_name.clone(),
            college_tagline: self.branding.college_tagline.clone(),
            event_name: event.name.clone(),
            event_venue: event.venue.clone(),
            event_date: event.date.clone(),
        }
    }

    /// Send the confirmation email for a registration
    pub async fn send_confirmation(
        &self,
        registration: &Registration,
        event: &EmailEventDetails,
    ) -> EmailResult<()> {
        if !self.config.enabled {
            return Err(EmailError::Disabled);
        }

        let template = self.build_template(registration, event).await;
        self.send(&template).await?;
        info!(email = %registration.email, registration_id = %registration.id, "Confirmation email accepted by relay");
        Ok(())
    }

    /// Post one templated email to the relay
    pub async fn send(&self, template: &ConfirmationTemplate) -> EmailResult<()> {
        let url = format!("{}/api/v1.0/email/send", self.config.api_url.trim_end_matches('/'));
        debug!(url = %url, template_id = %self.config.template_id, "Sending email via relay");

        let body = SendRequest {
            service_id: &self.config.service_id,
            template_id: &self.config.template_id,
            user_id: &self.config.public_key,
            template_params: template,
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    EmailError::Timeout
                } else {
                    EmailError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EmailError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}
