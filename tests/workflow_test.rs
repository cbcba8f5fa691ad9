//! Registration workflow integration tests
//!
//! Catalog rendering, submission choreography and preselection against the
//! mock backend and email relay.

mod helpers;

use std::sync::Arc;
use assert_matches::assert_matches;
use chrono::Utc;
use serde_json::json;
use serial_test::serial;

use helpers::*;
use GatePass::services::REGISTRATION_FALLBACK_ERROR;
use GatePass::surface::{EmailStatus, QuickEventsView, Region, ResultView, SurfaceCall};
use GatePass::workflow::{RegistrationForm, CATALOG_ERROR, NO_EVENT_SELECTED, SUBMISSION_ERROR};
use GatePass::{GatePassError, WorkflowState};

#[tokio::test]
#[serial]
async fn test_catalog_shows_running_events() {
    let ctx = TestContext::new().await;
    let now = Utc::now();

    let mut events: Vec<_> = (1..=5).map(|id| running_event(id, &format!("Live {}", id), now)).collect();
    events.push(ended_event(6, "Yesterday", now));
    events.push(ended_event(7, "Last week", now));
    ctx.backend.mock_events(events, MockResponseConfig::default()).await;

    let workflow = ctx.workflow();
    let view = workflow.load_catalog(now).await.expect("catalog should load");

    assert_eq!(view.quick_events.cards().len(), 3);
    let summary = view.quick_events.summary().expect("summary tile");
    assert_eq!(summary.remaining, 2);
    assert_eq!(summary.label(), "+2 more events running");
    assert_eq!(view.event_options().count(), 7);
    assert!(view.options[0].is_placeholder());

    assert_eq!(ctx.surface.last_quick_events(), Some(view.quick_events.clone()));
    assert_eq!(ctx.surface.last_options().map(|o| o.len()), Some(8));
    assert_eq!(workflow.state(), WorkflowState::EventsLoaded);
}

#[tokio::test]
#[serial]
async fn test_catalog_failure_renders_inline_error() {
    let ctx = TestContext::new().await;
    ctx.backend.mock_events_error(500).await;

    let workflow = ctx.workflow();
    let result = workflow.load_catalog(Utc::now()).await;

    assert!(result.is_err());
    assert_eq!(
        ctx.surface.last_quick_events(),
        Some(QuickEventsView::Error {
            message: CATALOG_ERROR.to_string()
        })
    );
    assert!(ctx.surface.last_options().is_none());
    assert!(workflow.options().is_empty());
    assert_eq!(workflow.state(), WorkflowState::EventsLoaded);
}

#[tokio::test]
#[serial]
async fn test_failed_reload_keeps_previous_options() {
    let ctx = TestContext::new().await;
    let now = Utc::now();
    ctx.backend
        .mock_events(vec![running_event(1, "A", now), ended_event(2, "B", now)], MockResponseConfig::default())
        .await;

    let workflow = ctx.workflow();
    workflow.load_catalog(now).await.expect("first load succeeds");
    let loaded = workflow.options();
    assert_eq!(loaded.len(), 3);

    ctx.backend.reset().await;
    ctx.backend.mock_events_error(500).await;
    ctx.surface.clear();

    assert!(workflow.load_catalog(now).await.is_err());
    assert_eq!(workflow.options(), loaded);
    assert!(ctx.surface.last_options().is_none());
    assert_eq!(
        ctx.surface.last_quick_events(),
        Some(QuickEventsView::Error {
            message: CATALOG_ERROR.to_string()
        })
    );
    assert!(workflow.select_event("2"));
}

#[tokio::test]
#[serial]
async fn test_submit_without_event_sends_nothing() {
    let ctx = TestContext::new().await;
    ctx.backend
        .mock_registration_created(1, inline_qr(), MockResponseConfig::default().expect(0))
        .await;

    let workflow = ctx.workflow();
    let form = RegistrationForm::new(None, "Jane Doe", "22R01", "jane@example.com");
    let result = workflow.submit(&form).await;

    assert_matches!(result, Err(GatePassError::InvalidInput(_)));
    assert_eq!(ctx.surface.alerts(), vec![NO_EVENT_SELECTED.to_string()]);
    assert_eq!(workflow.state(), WorkflowState::Idle);
}

#[tokio::test]
#[serial]
async fn test_successful_submission() {
    let ctx = TestContext::new().await;
    let now = Utc::now();
    ctx.backend
        .mock_registration_created(42, inline_qr(), MockResponseConfig::default().expect(1))
        .await;
    ctx.backend
        .mock_event_detail("3", running_event(3, "Tech Fest", now), MockResponseConfig::default())
        .await;
    ctx.backend.mock_email_send(MockResponseConfig::default().expect(1)).await;

    let workflow = ctx.workflow();
    let form = RegistrationForm::new(Some("3"), "Jane Doe", "22R01A0501", "jane@example.com");
    let outcome = workflow.submit(&form).await.expect("submission should succeed");

    assert_eq!(outcome.registration.id, "42");
    assert_eq!(
        outcome.email_status,
        EmailStatus::Sent {
            email: "jane@example.com".to_string()
        }
    );
    assert_eq!(outcome.panel.registrant_name, "Jane Doe");
    assert_eq!(outcome.panel.actions.len(), 2);
    assert_eq!(
        workflow.state(),
        WorkflowState::Success {
            registration_id: "42".to_string()
        }
    );

    let calls = ctx.surface.calls();
    let loading = calls
        .iter()
        .position(|c| *c == SurfaceCall::Result(ResultView::sending_email()))
        .expect("loading view");
    let success = calls
        .iter()
        .position(|c| matches!(c, SurfaceCall::Result(ResultView::Success(_))))
        .expect("success view");
    assert!(loading < success);
    assert!(ctx.surface.contains(&SurfaceCall::ResetForm));
    assert!(ctx.surface.contains(&SurfaceCall::Scroll(Region::Result)));
    assert!(ctx.surface.alerts().is_empty());

    let emails = ctx.backend.email_requests().await;
    assert_eq!(emails.len(), 1);
    let email = &emails[0];
    assert_eq!(email["service_id"], json!("service_4noajtf"));
    assert_eq!(email["template_id"], json!("template_eh5mdow"));
    assert_eq!(email["user_id"], json!("LW8AvJdD_7yUt0D9M"));
    assert_eq!(email["template_params"]["name"], json!("Jane Doe"));
    assert_eq!(email["template_params"]["id"], json!("22R01A0501"));
    assert_eq!(email["template_params"]["qr_code"], json!(inline_qr()));
    assert_eq!(email["template_params"]["event_name"], json!("Tech Fest"));
    assert_eq!(email["template_params"]["event_venue"], json!("Main Auditorium"));
    assert_eq!(email["template_params"]["college_name"], json!("CMR TECHNICAL CAMPUS"));
}

#[tokio::test]
#[serial]
async fn test_rejected_submission_alerts_server_message() {
    let ctx = TestContext::new().await;
    ctx.backend
        .mock_registration_response(400, r#"{"error": "Event is full"}"#)
        .await;

    let workflow = ctx.workflow();
    let result = workflow.submit(&random_form("3")).await;

    assert_matches!(result, Err(GatePassError::RegistrationRejected(ref m)) if m == "Event is full");
    assert_eq!(ctx.surface.alerts(), vec!["Error: Event is full".to_string()]);
    assert!(!ctx.surface.contains(&SurfaceCall::ResetForm));
    assert!(ctx.surface.last_result().is_none());
    assert_matches!(workflow.state(), WorkflowState::Failed { .. });
}

#[tokio::test]
#[serial]
async fn test_rejected_submission_without_error_field_uses_fallback() {
    let ctx = TestContext::new().await;
    ctx.backend
        .mock_registration_response(400, r#"{"detail": "unique constraint"}"#)
        .await;

    let workflow = ctx.workflow();
    let result = workflow.submit(&random_form("3")).await;

    assert!(result.is_err());
    assert_eq!(
        ctx.surface.alerts(),
        vec![format!("Error: {}", REGISTRATION_FALLBACK_ERROR)]
    );
}

#[tokio::test]
#[serial]
async fn test_rejected_submission_with_html_body_alerts_generic_error() {
    let ctx = TestContext::new().await;
    ctx.backend
        .mock_registration_response(500, "<html>Internal Server Error</html>")
        .await;

    let workflow = ctx.workflow();
    let result = workflow.submit(&random_form("3")).await;

    assert_matches!(result, Err(GatePassError::Api(_)));
    assert_eq!(ctx.surface.alerts(), vec![SUBMISSION_ERROR.to_string()]);
    assert_matches!(workflow.state(), WorkflowState::Failed { .. });
}

#[tokio::test]
#[serial]
async fn test_undecodable_success_body_alerts_generic_error() {
    let ctx = TestContext::new().await;
    ctx.backend.mock_registration_response(201, "not json").await;

    let workflow = ctx.workflow();
    let result = workflow.submit(&random_form("3")).await;

    assert!(result.is_err());
    assert_eq!(ctx.surface.alerts(), vec![SUBMISSION_ERROR.to_string()]);
    assert_matches!(workflow.state(), WorkflowState::Failed { .. });
}

#[tokio::test]
#[serial]
async fn test_email_failure_still_shows_pass() {
    let ctx = TestContext::new().await;
    let now = Utc::now();
    ctx.backend
        .mock_registration_created(7, inline_qr(), MockResponseConfig::default())
        .await;
    ctx.backend
        .mock_event_detail("3", running_event(3, "Tech Fest", now), MockResponseConfig::default())
        .await;
    ctx.backend.mock_email_send(MockResponseConfig::status(500)).await;

    let workflow = ctx.workflow();
    let outcome = workflow.submit(&random_form("3")).await.expect("registration succeeds");

    assert_eq!(outcome.email_status, EmailStatus::Failed);
    assert_matches!(
        ctx.surface.last_result(),
        Some(ResultView::Success(panel)) if panel.email_status == EmailStatus::Failed
    );
    assert!(ctx.surface.alerts().is_empty());
    assert_matches!(workflow.state(), WorkflowState::Success { .. });
}

#[tokio::test]
#[serial]
async fn test_missing_event_detail_uses_placeholders() {
    let ctx = TestContext::new().await;
    ctx.backend
        .mock_registration_created(8, inline_qr(), MockResponseConfig::default())
        .await;
    ctx.backend.mock_email_send(MockResponseConfig::default()).await;

    let workflow = ctx.workflow();
    let outcome = workflow.submit(&random_form("99")).await.expect("registration succeeds");

    assert_matches!(outcome.email_status, EmailStatus::Sent { .. });
    let emails = ctx.backend.email_requests().await;
    assert_eq!(emails[0]["template_params"]["event_name"], json!("Event"));
    assert_eq!(emails[0]["template_params"]["event_venue"], json!("TBA"));
    assert_eq!(emails[0]["template_params"]["event_date"], json!("TBA"));
}

#[tokio::test]
#[serial]
async fn test_anti_forgery_token_is_forwarded() {
    let ctx = TestContext::new().await;
    ctx.backend.mock_registration_requiring_csrf("test-token", 11).await;
    ctx.backend.mock_email_send(MockResponseConfig::default()).await;

    let workflow = ctx.workflow();
    let outcome = workflow.submit(&random_form("3")).await.expect("token header should match");
    assert_eq!(outcome.registration.id, "11");
}

#[tokio::test]
#[serial]
async fn test_concurrent_submission_is_rejected() {
    let ctx = TestContext::new().await;
    let slow = MockResponseConfig {
        delay_ms: Some(200),
        ..MockResponseConfig::default()
    }
    .expect(1);
    ctx.backend.mock_registration_created(5, inline_qr(), slow).await;
    ctx.backend.mock_email_send(MockResponseConfig::default()).await;

    let workflow = ctx.workflow();
    let form = random_form("3");
    let (first, second) = tokio::join!(workflow.submit(&form), workflow.submit(&form));

    assert!(first.is_ok());
    assert_matches!(second, Err(GatePassError::SubmissionInFlight));
}

#[tokio::test]
#[serial]
async fn test_preselect_waits_for_catalog() {
    let ctx = TestContext::new().await;
    let now = Utc::now();
    let slow = MockResponseConfig {
        delay_ms: Some(150),
        ..MockResponseConfig::default()
    };
    ctx.backend
        .mock_events(vec![running_event(1, "A", now), running_event(2, "B", now)], slow)
        .await;

    let workflow = Arc::new(ctx.workflow());
    let preselect = {
        let workflow = Arc::clone(&workflow);
        tokio::spawn(async move { workflow.preselect_from_query("?event=2").await })
    };
    workflow.load_catalog(now).await.expect("catalog loads");
    let selected = preselect.await.expect("task completes");

    assert_eq!(selected.as_deref(), Some("2"));
    let calls = ctx.surface.calls();
    let options = calls
        .iter()
        .position(|c| matches!(c, SurfaceCall::EventOptions(_)))
        .expect("options rendered");
    let select = calls
        .iter()
        .position(|c| *c == SurfaceCall::SelectEvent("2".to_string()))
        .expect("event selected");
    assert!(options < select);
    assert!(ctx.surface.contains(&SurfaceCall::Focus(Region::EventSelect)));
    assert!(ctx.surface.contains(&SurfaceCall::Scroll(Region::EventSelect)));
}

#[tokio::test]
#[serial]
async fn test_preselect_ignores_unknown_event() {
    let ctx = TestContext::new().await;
    let now = Utc::now();
    ctx.backend
        .mock_events(vec![running_event(1, "A", now)], MockResponseConfig::default())
        .await;

    let workflow = ctx.workflow();
    let (_, selected) = tokio::join!(
        workflow.load_catalog(now),
        workflow.preselect_from_query("event=404"),
    );

    assert!(selected.is_none());
    assert!(ctx.surface.selected_event().is_none());
}

#[tokio::test]
#[serial]
async fn test_page_load_starts_carousel_and_preselects() {
    let ctx = TestContext::new().await;
    let now = Utc::now();
    ctx.backend
        .mock_events(vec![running_event(4, "Hackathon", now)], MockResponseConfig::default())
        .await;

    let page = ctx.page();
    let load = page.on_load("event=4", now).await;

    assert!(load.catalog_loaded);
    assert_eq!(load.preselected.as_deref(), Some("4"));
    assert!(page.carousel().is_auto_advancing());

    page.carousel().stop_auto_advance();
    assert!(!page.carousel().is_auto_advancing());
}
