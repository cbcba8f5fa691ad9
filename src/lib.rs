//! GatePass registration client
//!
//! Headless client for an event gate-pass registration page: a landing
//! carousel, live "running now" event cards, the registration form with its
//! confirmation email, and QR / ID-card downloads. Rendering is delegated to
//! a [`PageSurface`] so the whole flow runs from a terminal or a test.

#![allow(non_snake_case)]

pub mod config;
pub mod models;
pub mod carousel;
pub mod surface;
pub mod services;
pub mod workflow;
pub mod page;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{GatePassError, Result};

// Re-export main components for easy access
pub use carousel::{Carousel, CarouselController};
pub use page::{Page, PageLoad};
pub use services::ServiceFactory;
pub use surface::PageSurface;
pub use workflow::{RegistrationForm, RegistrationWorkflow, WorkflowState};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
