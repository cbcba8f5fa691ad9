//! Download and export helpers
//!
//! This service saves the QR image and the server-rendered ID card into the
//! download directory the way an anchor with a `download` attribute would,
//! manages the object URLs that back blob downloads, and drives the print
//! flag around the print dialog.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

use super::api::BackendClient;
use crate::surface::{DownloadStatus, PageSurface, PRINTING_FLAG};
use crate::utils::data_uri::{decode_data_uri, is_data_uri};
use crate::utils::errors::{GatePassError, Result};
use crate::utils::helpers::{id_card_file_name, qr_file_name, sanitize_file_name};
use crate::utils::logging::{log_api_error, log_download};

const OBJECT_URL_SCHEME: &str = "blob:gatepass/";

/// In-memory blob behind an object URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Object URL store with explicit create/revoke lifecycle
#[derive(Debug, Default)]
pub struct ObjectUrlRegistry {
    blobs: Mutex<HashMap<String, Blob>>,
}

impl ObjectUrlRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn blobs(&self) -> MutexGuard<'_, HashMap<String, Blob>> {
        self.blobs.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn create(&self, blob: Blob) -> String {
        let url = format!("{}{}", OBJECT_URL_SCHEME, Uuid::new_v4());
        self.blobs().insert(url.clone(), blob);
        url
    }

    pub fn resolve(&self, url: &str) -> Option<Blob> {
        self.blobs().get(url).cloned()
    }

    /// Returns whether the URL was live
    pub fn revoke(&self, url: &str) -> bool {
        self.blobs().remove(url).is_some()
    }

    pub fn live_count(&self) -> usize {
        self.blobs().len()
    }

    pub fn is_object_url(url: &str) -> bool {
        url.starts_with(OBJECT_URL_SCHEME)
    }
}

/// Revokes its object URL when dropped
struct ObjectUrlGuard<'a> {
    registry: &'a ObjectUrlRegistry,
    url: String,
}

impl Drop for ObjectUrlGuard<'_> {
    fn drop(&mut self) {
        self.registry.revoke(&self.url);
        debug!(url = %self.url, "Object URL revoked");
    }
}

/// Timing knobs for transient UI state
#[derive(Debug, Clone, Copy)]
pub struct DownloadTimings {
    /// How long a finished download's status text stays visible
    pub status_clear: Duration,
    /// How long the print flag stays set after the dialog opens
    pub print_reset: Duration,
}

impl Default for DownloadTimings {
    fn default() -> Self {
        Self {
            status_clear: Duration::from_secs(5),
            print_reset: Duration::from_millis(1000),
        }
    }
}

/// QR and ID-card downloads plus printing
pub struct DownloadService {
    backend: BackendClient,
    output_dir: PathBuf,
    object_urls: Arc<ObjectUrlRegistry>,
    surface: Arc<dyn PageSurface>,
    timings: DownloadTimings,
    status_generation: Arc<AtomicU64>,
}

impl DownloadService {
    pub fn new(
        backend: BackendClient,
        output_dir: impl Into<PathBuf>,
        surface: Arc<dyn PageSurface>,
        timings: DownloadTimings,
    ) -> Self {
        Self {
            backend,
            output_dir: output_dir.into(),
            object_urls: Arc::new(ObjectUrlRegistry::new()),
            surface,
            timings,
            status_generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn object_urls(&self) -> &ObjectUrlRegistry {
        &self.object_urls
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Save the QR image as `event-pass-{name}.png`
    ///
    /// Inline `data:` sources are decoded locally without any request.
    pub async fn download_qr_image(&self, source: &str, registrant: &str) -> Result<PathBuf> {
        let file_name = qr_file_name(registrant);
        match self.trigger_download(source, &file_name).await {
            Ok((path, bytes)) => {
                log_download("qr", &file_name, bytes, true);
                Ok(path)
            }
            Err(e) => {
                log_download("qr", &file_name, 0, false);
                Err(e)
            }
        }
    }

    /// Fetch the ID-card PDF and save it as `ID_Card_{name}.pdf`
    ///
    /// Status text goes loading -> success/failure and clears itself once the
    /// configured delay has elapsed after completion.
    pub async fn download_id_card(&self, registration_id: &str, registrant: &str) -> Result<PathBuf> {
        self.show_status(DownloadStatus::Generating);
        let file_name = id_card_file_name(registrant);

        let result = self.fetch_and_save_id_card(registration_id, &file_name).await;

        match &result {
            Ok((_, bytes)) => {
                log_download("id_card", &file_name, *bytes, true);
                self.show_status(DownloadStatus::Downloaded);
            }
            Err(e) => {
                log_api_error("id_card", &e.to_string(), Some(registration_id));
                log_download("id_card", &file_name, 0, false);
                self.show_status(DownloadStatus::Failed);
            }
        }
        self.schedule_status_clear();

        result.map(|(path, _)| path)
    }

    async fn fetch_and_save_id_card(&self, registration_id: &str, file_name: &str) -> Result<(PathBuf, usize)> {
        let bytes = self.backend.fetch_id_card(registration_id).await?;

        let url = self.object_urls.create(Blob {
            mime_type: "application/pdf".to_string(),
            bytes,
        });
        let _revoke = ObjectUrlGuard {
            registry: &self.object_urls,
            url: url.clone(),
        };

        self.trigger_download(&url, file_name).await
    }

    /// Toggle the print flag around the print dialog
    pub async fn print_pass(&self) {
        self.surface.set_body_flag(PRINTING_FLAG, true);
        self.surface.print();
        tokio::time::sleep(self.timings.print_reset).await;
        self.surface.set_body_flag(PRINTING_FLAG, false);
    }

    /// Anchor-style download: resolve the href and write it under `file_name`
    async fn trigger_download(&self, href: &str, file_name: &str) -> Result<(PathBuf, usize)> {
        let (bytes, mime_type) = if ObjectUrlRegistry::is_object_url(href) {
            let blob = self
                .object_urls
                .resolve(href)
                .ok_or_else(|| GatePassError::Download(format!("Object URL already revoked: {}", href)))?;
            (blob.bytes, Some(blob.mime_type))
        } else if is_data_uri(href) {
            let data = decode_data_uri(href)?;
            (data.bytes, Some(data.mime_type))
        } else {
            (self.backend.fetch_bytes(href).await?, None)
        };

        let path = self.target_path(file_name)?;
        tokio::fs::create_dir_all(&self.output_dir).await?;
        tokio::fs::write(&path, &bytes).await?;
        debug!(
            path = %path.display(),
            bytes = bytes.len(),
            mime_type = mime_type.as_deref().unwrap_or("unknown"),
            "File saved"
        );

        Ok((path, bytes.len()))
    }

    /// Path for `file_name` inside the download directory; never escapes it
    fn target_path(&self, file_name: &str) -> Result<PathBuf> {
        let file_name = sanitize_file_name(file_name);
        let path = self.output_dir.join(&file_name);
        if path.parent() != Some(self.output_dir.as_path()) {
            return Err(GatePassError::Download(format!("Invalid file name: {}", file_name)));
        }
        Ok(path)
    }

    fn show_status(&self, status: DownloadStatus) {
        self.status_generation.fetch_add(1, Ordering::SeqCst);
        self.surface.set_download_status(Some(status));
    }

    /// Clear the status after the delay unless a newer status replaced it
    fn schedule_status_clear(&self) {
        let generation = self.status_generation.load(Ordering::SeqCst);
        let current = Arc::clone(&self.status_generation);
        let surface = Arc::clone(&self.surface);
        let delay = self.timings.status_clear;

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if current.load(Ordering::SeqCst) == generation {
                surface.set_download_status(None);
            } else {
                debug!("Status replaced before clear");
            }
        });
    }
}
