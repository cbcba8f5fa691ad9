//! Services module
//!
//! This module contains the clients for the page's external collaborators:
//! the backend API, the email relay, and the download helpers.

pub mod api;
pub mod downloads;
pub mod email;

// Re-export commonly used services
pub use api::{BackendClient, CSRF_HEADER, REGISTRATION_FALLBACK_ERROR};
pub use downloads::{Blob, DownloadService, DownloadTimings, ObjectUrlRegistry};
pub use email::{ConfirmationTemplate, EmailEventDetails, EmailRelayClient};

use std::sync::Arc;
use std::time::Duration;
use crate::config::settings::Settings;
use crate::surface::PageSurface;
use crate::utils::errors::Result;

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub backend: BackendClient,
    pub email_relay: Arc<EmailRelayClient>,
    pub downloads: Arc<DownloadService>,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(settings: &Settings, surface: Arc<dyn PageSurface>) -> Result<Self> {
        let backend = BackendClient::new(&settings.api)?;
        let email_relay = EmailRelayClient::new(settings.email.clone(), settings.branding.clone())?;
        let timings = DownloadTimings {
            status_clear: Duration::from_secs(settings.ui.status_clear_seconds),
            print_reset: Duration::from_millis(settings.ui.print_reset_ms),
        };
        let downloads = DownloadService::new(
            backend.clone(),
            settings.downloads.output_dir.clone(),
            surface,
            timings,
        );

        Ok(Self {
            backend,
            email_relay: Arc::new(email_relay),
            downloads: Arc::new(downloads),
        })
    }

    /// Health status for all services
    pub fn health_check(&self) -> ServiceHealthStatus {
        ServiceHealthStatus {
            email_enabled: self.email_relay.is_enabled(),
            live_object_urls: self.downloads.object_urls().live_count(),
        }
    }
}

/// Health status for all services
#[derive(Debug, Clone)]
pub struct ServiceHealthStatus {
    pub email_enabled: bool,
    pub live_object_urls: usize,
}

impl ServiceHealthStatus {
    /// Get list of service issues
    pub fn get_issues(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if !self.email_enabled {
            issues.push("Email relay disabled; confirmations will not be sent".to_string());
        }
        if self.live_object_urls > 0 {
            issues.push(format!("{} object URLs not revoked", self.live_object_urls));
        }

        issues
    }
}
