//! Test data helpers for creating event payloads and form input

use chrono::{DateTime, Duration, Utc};
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::Fake;
use serde_json::{json, Value};

use GatePass::workflow::RegistrationForm;

/// Event payload as served by `/api/events/`
pub fn event_json(
    id: u64,
    name: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    registered: u32,
    capacity: u32,
) -> Value {
    json!({
        "id": id,
        "name": name,
        "venue": "Main Auditorium",
        "start_date": start.to_rfc3339(),
        "end_date": end.to_rfc3339(),
        "status": "ongoing",
        "registered_count": registered,
        "max_capacity": capacity
    })
}

/// Event whose window contains `now`
pub fn running_event(id: u64, name: &str, now: DateTime<Utc>) -> Value {
    event_json(id, name, now - Duration::hours(1), now + Duration::hours(2), 40, 100)
}

/// Event that finished before `now`
pub fn ended_event(id: u64, name: &str, now: DateTime<Utc>) -> Value {
    let mut event = event_json(id, name, now - Duration::days(2), now - Duration::days(1), 90, 100);
    event["status"] = json!("completed");
    event
}

/// Form for `event_id` filled with a random registrant
pub fn random_form(event_id: &str) -> RegistrationForm {
    let name: String = Name().fake();
    let email: String = SafeEmail().fake();
    RegistrationForm::new(Some(event_id), name, "22R01A0501", email)
}

/// Smallest valid PNG header, inline
pub fn inline_qr() -> &'static str {
    "data:image/png;base64,iVBORw0KGgo="
}
