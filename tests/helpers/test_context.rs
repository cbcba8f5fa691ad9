//! Test context for unified test setup
//!
//! Builds settings pointing at the mock server, a recording surface and a
//! temporary download directory.

use std::sync::{Arc, Once};
use tempfile::TempDir;

use GatePass::config::Settings;
use GatePass::surface::RecordingSurface;
use GatePass::workflow::RegistrationWorkflow;
use GatePass::{Page, ServiceFactory};

use super::backend_mock::BackendMockServer;

static INIT: Once = Once::new();

/// Initialize test logging once per test binary
pub fn init_test_env() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("GatePass=debug")
            .with_test_writer()
            .try_init();
    });
}

/// Unified test context that manages all test components
pub struct TestContext {
    pub backend: BackendMockServer,
    pub surface: Arc<RecordingSurface>,
    pub settings: Settings,
    pub temp_dir: TempDir,
}

impl TestContext {
    pub async fn new() -> Self {
        init_test_env();

        let backend = BackendMockServer::new().await;
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let settings = Self::create_test_settings(&backend, &temp_dir);

        Self {
            backend,
            surface: Arc::new(RecordingSurface::new()),
            settings,
            temp_dir,
        }
    }

    fn create_test_settings(backend: &BackendMockServer, temp_dir: &TempDir) -> Settings {
        let mut settings = Settings::default();

        settings.api.base_url = backend.uri();
        settings.api.timeout_seconds = 5;
        settings.api.cookies = "sessionid=xyz; csrftoken=test-token".to_string();

        settings.email.api_url = backend.uri();
        settings.email.timeout_seconds = 5;

        settings.downloads.output_dir = temp_dir.path().to_string_lossy().to_string();
        settings.logging.file_path = temp_dir.path().join("test.log").to_string_lossy().to_string();

        settings
    }

    pub fn services(&self) -> ServiceFactory {
        ServiceFactory::new(&self.settings, self.surface.clone()).expect("Failed to build services")
    }

    pub fn workflow(&self) -> RegistrationWorkflow {
        RegistrationWorkflow::from_services(&self.services(), &self.settings, self.surface.clone())
    }

    pub fn page(&self) -> Page {
        Page::new(&self.settings, self.surface.clone()).expect("Failed to build page")
    }
}
