//! Registration model

use serde::{Deserialize, Serialize};
use super::event::deserialize_id;

/// Body of `POST /api/registrations/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRegistrationRequest {
    pub event: String,
    pub name: String,
    pub student_id: String,
    pub email: String,
}

/// Successful creation response; the backend echoes more fields than the page uses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationCreated {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub qr_code_image: String,
}

/// Error body returned with non-2xx statuses
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

/// A registration as the client knows it after creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    pub id: String,
    pub event: String,
    pub name: String,
    pub student_id: String,
    pub email: String,
    pub qr_code_image: String,
}

impl Registration {
    pub fn from_created(request: CreateRegistrationRequest, created: RegistrationCreated) -> Self {
        Self {
            id: created.id,
            event: request.event,
            name: request.name,
            student_id: request.student_id,
            email: request.email,
            qr_code_image: created.qr_code_image,
        }
    }
}
