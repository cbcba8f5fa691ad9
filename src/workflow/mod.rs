//! Registration workflow
//!
//! One page load drives `Idle -> EventsLoaded`; each submission drives
//! `Submitting -> Success | Failed`. Every step is an explicit async
//! operation that reports through the [`PageSurface`] and returns a
//! `Result`, so the choreography can be exercised without a browser.

pub mod form;

pub use form::{RegistrationForm, NO_EVENT_SELECTED};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use chrono::{DateTime, FixedOffset, Utc};
use tokio::sync::watch;
use tracing::{info, warn};

use crate::config::Settings;
use crate::models::Registration;
use crate::services::{BackendClient, EmailEventDetails, EmailRelayClient, ServiceFactory};
use crate::surface::{
    CatalogView, EmailStatus, EventOption, PageSurface, QuickEventsView, Region, ResultPanel,
    ResultView,
};
use crate::utils::errors::{GatePassError, Result};
use crate::utils::helpers::{display_offset, get_cookie, query_param};
use crate::utils::logging::{log_api_error, log_email_outcome, log_workflow_step};

/// Inline message replacing the quick-events region when the catalog fails
pub const CATALOG_ERROR: &str = "Error loading events";

/// Alert for transport failures and undecodable responses during submission
pub const SUBMISSION_ERROR: &str = "An error occurred during registration. Please try again.";

/// Where one page session is in the registration flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowState {
    Idle,
    EventsLoaded,
    Submitting,
    Success { registration_id: String },
    Failed { reason: String },
}

/// Page-level knobs the workflow reads
#[derive(Debug, Clone)]
pub struct WorkflowSettings {
    pub max_quick_cards: usize,
    pub display_offset: FixedOffset,
    pub events_page: String,
    pub csrf_cookie_name: String,
    /// Raw cookie header of the page session
    pub cookies: String,
}

impl From<&Settings> for WorkflowSettings {
    fn from(settings: &Settings) -> Self {
        Self {
            max_quick_cards: settings.ui.max_quick_cards,
            display_offset: display_offset(settings.ui.utc_offset_minutes),
            events_page: settings.ui.events_page_path.clone(),
            csrf_cookie_name: settings.api.csrf_cookie_name.clone(),
            cookies: settings.api.cookies.clone(),
        }
    }
}

/// Result of a successful submission
#[derive(Debug, Clone)]
pub struct SubmissionOutcome {
    pub registration: Registration,
    pub email_status: EmailStatus,
    pub panel: ResultPanel,
}

struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Catalog loading and registration submission for one page session
pub struct RegistrationWorkflow {
    backend: BackendClient,
    email_relay: Arc<EmailRelayClient>,
    surface: Arc<dyn PageSurface>,
    settings: WorkflowSettings,
    state: Mutex<WorkflowState>,
    options: Mutex<Vec<EventOption>>,
    catalog_loaded: watch::Sender<bool>,
    submitting: AtomicBool,
}

impl RegistrationWorkflow {
    pub fn new(
        backend: BackendClient,
        email_relay: Arc<EmailRelayClient>,
        surface: Arc<dyn PageSurface>,
        settings: WorkflowSettings,
    ) -> Self {
        let (catalog_loaded, _) = watch::channel(false);

        Self {
            backend,
            email_relay,
            surface,
            settings,
            state: Mutex::new(WorkflowState::Idle),
            options: Mutex::new(Vec::new()),
            catalog_loaded,
            submitting: AtomicBool::new(false),
        }
    }

    pub fn from_services(services: &ServiceFactory, settings: &Settings, surface: Arc<dyn PageSurface>) -> Self {
        Self::new(
            services.backend.clone(),
            Arc::clone(&services.email_relay),
            surface,
            WorkflowSettings::from(settings),
        )
    }

    pub fn state(&self) -> WorkflowState {
        lock(&self.state).clone()
    }

    fn set_state(&self, state: WorkflowState) {
        *lock(&self.state) = state;
    }

    /// Options currently in the selection control
    pub fn options(&self) -> Vec<EventOption> {
        lock(&self.options).clone()
    }

    /// Fetch the catalog and render quick cards plus the selection control
    ///
    /// A failed fetch shows [`CATALOG_ERROR`] in the quick-events region and
    /// keeps whatever options an earlier load rendered.
    pub async fn load_catalog(&self, now: DateTime<Utc>) -> Result<CatalogView> {
        let outcome = match self.backend.list_events().await {
            Ok(events) => {
                let view = CatalogView::build(
                    &events,
                    now,
                    self.settings.max_quick_cards,
                    self.settings.display_offset,
                    &self.settings.events_page,
                );
                self.surface.render_quick_events(&view.quick_events);
                self.surface.render_event_options(&view.options);
                *lock(&self.options) = view.options.clone();

                info!(
                    events = events.len(),
                    quick_cards = view.quick_events.cards().len(),
                    "Event catalog loaded"
                );
                Ok(view)
            }
            Err(e) => {
                log_api_error("events", &e.to_string(), Some("catalog"));
                self.surface.render_quick_events(&QuickEventsView::Error {
                    message: CATALOG_ERROR.to_string(),
                });
                Err(e)
            }
        };

        self.mark_catalog_loaded();
        outcome
    }

    fn mark_catalog_loaded(&self) {
        {
            let mut state = lock(&self.state);
            if *state == WorkflowState::Idle {
                *state = WorkflowState::EventsLoaded;
            }
        }
        self.catalog_loaded.send_replace(true);
    }

    /// Resolves once the first catalog load has finished, successfully or not
    pub async fn wait_for_catalog(&self) {
        let mut loaded = self.catalog_loaded.subscribe();
        let ready = loaded.wait_for(|done| *done).await.is_ok();
        if !ready {
            warn!("Catalog notification channel closed");
        }
    }

    /// Point the selection control at an event, scroll to it and focus it
    ///
    /// Returns `false` when no rendered option carries that id.
    pub fn select_event(&self, event_id: &str) -> bool {
        let known = lock(&self.options)
            .iter()
            .any(|option| !option.is_placeholder() && option.value == event_id);
        if !known {
            warn!(event_id = event_id, "Cannot select unknown event");
            return false;
        }

        self.surface.select_event(event_id);
        self.surface.scroll_into_view(Region::EventSelect);
        self.surface.focus(Region::EventSelect);
        true
    }

    /// Honour `?event=<id>` once the catalog has been rendered
    pub async fn preselect_from_query(&self, query: &str) -> Option<String> {
        let event_id = query_param(query, "event")?;
        self.wait_for_catalog().await;

        if self.select_event(&event_id) {
            log_workflow_step("preselect", Some(&event_id), None);
            Some(event_id)
        } else {
            None
        }
    }

    /// Submit the registration form
    ///
    /// Email delivery and the event-detail lookup are best-effort; only the
    /// creation request decides between `Success` and `Failed`.
    pub async fn submit(&self, form: &RegistrationForm) -> Result<SubmissionOutcome> {
        let request = match form.to_request() {
            Ok(request) => request,
            Err(e) => {
                self.surface.alert(NO_EVENT_SELECTED);
                return Err(e);
            }
        };

        if self.submitting.swap(true, Ordering::SeqCst) {
            warn!(event_id = %request.event, "Submission ignored while another is in flight");
            return Err(GatePassError::SubmissionInFlight);
        }
        let _in_flight = InFlightGuard { flag: &self.submitting };

        self.set_state(WorkflowState::Submitting);
        log_workflow_step("submit", Some(&request.event), None);

        let csrf_token = get_cookie(&self.settings.cookies, &self.settings.csrf_cookie_name);
        let created = match self.backend.create_registration(&request, csrf_token.as_deref()).await {
            Ok(created) => created,
            Err(e) => {
                let message = match &e {
                    GatePassError::RegistrationRejected(reason) => format!("Error: {}", reason),
                    _ => SUBMISSION_ERROR.to_string(),
                };
                log_api_error("registrations", &e.to_string(), Some(&request.event));
                self.surface.alert(&message);
                self.set_state(WorkflowState::Failed { reason: e.to_string() });
                return Err(e);
            }
        };

        let registration = Registration::from_created(request, created);
        log_workflow_step("created", Some(&registration.event), Some(&registration.id));
        self.surface.show_result(&ResultView::sending_email());

        let event = match self.backend.get_event(&registration.event).await {
            Ok(event) => Some(event),
            Err(e) => {
                warn!(event_id = %registration.event, error = %e, "Event detail unavailable; using placeholders");
                None
            }
        };
        let details = EmailEventDetails::from_event(event.as_ref(), self.settings.display_offset);

        let email_status = match self.email_relay.send_confirmation(&registration, &details).await {
            Ok(()) => {
                log_email_outcome(&registration.email, true, None);
                EmailStatus::Sent {
                    email: registration.email.clone(),
                }
            }
            Err(e) => {
                log_email_outcome(&registration.email, false, Some(&e.to_string()));
                EmailStatus::Failed
            }
        };

        let panel = ResultPanel::new(
            registration.id.clone(),
            registration.name.clone(),
            registration.qr_code_image.clone(),
            email_status.clone(),
        );
        self.surface.show_result(&ResultView::Success(panel.clone()));
        self.surface.reset_form();
        self.surface.scroll_into_view(Region::Result);

        self.set_state(WorkflowState::Success {
            registration_id: registration.id.clone(),
        });

        Ok(SubmissionOutcome {
            registration,
            email_status,
            panel,
        })
    }
}
