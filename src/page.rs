//! Page assembly
//!
//! Wires the carousel, the registration workflow and the download helpers to
//! one [`PageSurface`] and runs the page-load sequence.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use chrono::{DateTime, Utc};
use tracing::info;

use crate::carousel::{Carousel, CarouselController};
use crate::config::Settings;
use crate::services::ServiceFactory;
use crate::surface::{PageSurface, ResultAction};
use crate::utils::errors::Result;
use crate::workflow::RegistrationWorkflow;

/// What happened during page load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLoad {
    pub catalog_loaded: bool,
    pub preselected: Option<String>,
}

/// One registration page session
pub struct Page {
    services: ServiceFactory,
    workflow: Arc<RegistrationWorkflow>,
    carousel: Arc<CarouselController>,
}

impl Page {
    pub fn new(settings: &Settings, surface: Arc<dyn PageSurface>) -> Result<Self> {
        let services = ServiceFactory::new(settings, Arc::clone(&surface))?;
        let workflow = RegistrationWorkflow::from_services(&services, settings, Arc::clone(&surface));
        let carousel = CarouselController::new(
            Carousel::new(settings.carousel.slide_count),
            Duration::from_millis(settings.carousel.interval_ms),
            surface,
        );

        Ok(Self {
            services,
            workflow: Arc::new(workflow),
            carousel: Arc::new(carousel),
        })
    }

    pub fn services(&self) -> &ServiceFactory {
        &self.services
    }

    pub fn workflow(&self) -> &Arc<RegistrationWorkflow> {
        &self.workflow
    }

    pub fn carousel(&self) -> &Arc<CarouselController> {
        &self.carousel
    }

    /// Start the carousel, load the catalog and honour `?event=<id>`
    ///
    /// The preselection waits for the catalog to finish rendering.
    pub async fn on_load(&self, query: &str, now: DateTime<Utc>) -> PageLoad {
        if !self.carousel.snapshot().is_empty() {
            self.carousel.start_auto_advance();
        }

        let (catalog, preselected) = tokio::join!(
            self.workflow.load_catalog(now),
            self.workflow.preselect_from_query(query),
        );

        let load = PageLoad {
            catalog_loaded: catalog.is_ok(),
            preselected,
        };
        info!(
            catalog_loaded = load.catalog_loaded,
            preselected = ?load.preselected,
            "Page loaded"
        );
        load
    }

    /// Run a button from the success panel
    pub async fn run_action(&self, action: &ResultAction) -> Result<PathBuf> {
        match action {
            ResultAction::DownloadIdCard { registration_id, name } => {
                self.services.downloads.download_id_card(registration_id, name).await
            }
            ResultAction::DownloadQr { source, name } => {
                self.services.downloads.download_qr_image(source, name).await
            }
        }
    }

    pub async fn print_pass(&self) {
        self.services.downloads.print_pass().await;
    }
}
