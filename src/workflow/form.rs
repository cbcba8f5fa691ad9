//! Registration form fields

use crate::models::CreateRegistrationRequest;
use crate::utils::errors::{GatePassError, Result};

/// Alert shown when the form is submitted without an event
pub const NO_EVENT_SELECTED: &str = "Please select an event";

/// Values of the gate-pass form at submit time
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub event_id: Option<String>,
    pub name: String,
    pub student_id: String,
    pub email: String,
}

impl RegistrationForm {
    pub fn new(
        event_id: Option<&str>,
        name: impl Into<String>,
        student_id: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            event_id: event_id.map(str::to_string),
            name: name.into(),
            student_id: student_id.into(),
            email: email.into(),
        }
    }

    /// The selected event, treating the placeholder value as no selection
    pub fn selected_event(&self) -> Option<&str> {
        self.event_id.as_deref().filter(|id| !id.trim().is_empty())
    }

    /// Build the creation request; fails when no event is selected
    pub fn to_request(&self) -> Result<CreateRegistrationRequest> {
        let event = self
            .selected_event()
            .ok_or_else(|| GatePassError::InvalidInput(NO_EVENT_SELECTED.to_string()))?;

        Ok(CreateRegistrationRequest {
            event: event.to_string(),
            name: self.name.clone(),
            student_id: self.student_id.clone(),
            email: self.email.clone(),
        })
    }
}
