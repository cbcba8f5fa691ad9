//! Data models module
//!
//! This module contains the wire types exchanged with the backend API

pub mod event;
pub mod registration;

// Re-export commonly used models
pub use event::{Event, EventStatus, SeatsIndicator};
pub use registration::{CreateRegistrationRequest, RegistrationCreated, ApiErrorBody, Registration};
