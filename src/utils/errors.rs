//! Error handling for GatePass
//!
//! This module defines the main error types used throughout the client
//! and provides a unified error handling strategy. No error is fatal to the
//! page: callers decide whether a failure becomes an alert, an inline message
//! or a degraded status line.

use thiserror::Error;

/// Main error type for the GatePass client
#[derive(Error, Debug)]
pub enum GatePassError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend API error: {0}")]
    Api(#[from] ApiError),

    #[error("Email relay error: {0}")]
    Email(#[from] EmailError),

    #[error("Registration rejected: {0}")]
    RegistrationRejected(String),

    #[error("A registration is already being submitted")]
    SubmissionInFlight,

    #[error("Slide index {index} is out of range for {slide_count} slides")]
    SlideOutOfRange { index: usize, slide_count: usize },

    #[error("Event not found: {event_id}")]
    EventNotFound { event_id: String },

    #[error("Download failed: {0}")]
    Download(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Data URI decoding error: {0}")]
    DataUri(#[from] base64::DecodeError),
}

/// Backend API specific errors
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("API request timed out")]
    Timeout,

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Backend unavailable")]
    ServiceUnavailable,
}

/// Email relay specific errors
#[derive(Error, Debug)]
pub enum EmailError {
    #[error("Email relay is disabled")]
    Disabled,

    #[error("Email relay rejected the message (HTTP {status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("Email relay request failed: {0}")]
    RequestFailed(String),

    #[error("Email relay timeout")]
    Timeout,
}

/// Result type alias for GatePass operations
pub type Result<T> = std::result::Result<T, GatePassError>;

/// Result type alias for email relay operations
pub type EmailResult<T> = std::result::Result<T, EmailError>;

impl ApiError {
    /// Classify a transport failure the way the UI reports it
    pub fn from_transport(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            ApiError::Timeout
        } else if error.is_connect() {
            ApiError::ServiceUnavailable
        } else if error.is_decode() {
            ApiError::InvalidResponse(error.to_string())
        } else {
            ApiError::RequestFailed(error.to_string())
        }
    }
}

impl GatePassError {
    /// Check if the error is recoverable by repeating the user action
    pub fn is_recoverable(&self) -> bool {
        match self {
            GatePassError::Http(_) => true,
            GatePassError::Api(_) => true,
            GatePassError::Email(_) => true,
            GatePassError::RegistrationRejected(_) => true,
            GatePassError::SubmissionInFlight => true,
            GatePassError::SlideOutOfRange { .. } => false,
            GatePassError::EventNotFound { .. } => false,
            GatePassError::Download(_) => true,
            GatePassError::Config(_) => false,
            GatePassError::InvalidInput(_) => true,
            GatePassError::Serialization(_) => false,
            GatePassError::Io(_) => true,
            GatePassError::UrlParse(_) => false,
            GatePassError::DataUri(_) => false,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            GatePassError::Config(_) => ErrorSeverity::Critical,
            GatePassError::SlideOutOfRange { .. } => ErrorSeverity::Critical,
            GatePassError::InvalidInput(_) => ErrorSeverity::Info,
            GatePassError::SubmissionInFlight => ErrorSeverity::Info,
            GatePassError::RegistrationRejected(_) => ErrorSeverity::Warning,
            GatePassError::Email(_) => ErrorSeverity::Warning,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
