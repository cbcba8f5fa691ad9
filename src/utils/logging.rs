//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the GatePass client.

use tracing::{info, warn, error, debug};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use crate::config::LoggingConfig;
use crate::utils::errors::{GatePassError, Result};

/// Initialize logging based on configuration
///
/// The returned guard flushes the file appender when dropped and must be held
/// for the lifetime of the program.
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    let file_appender = tracing_appender::rolling::daily(&config.file_path, "gatepass.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(non_blocking))
        .try_init()
        .map_err(|e| GatePassError::Config(format!("Failed to install subscriber: {}", e)))?;

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log a registration workflow transition
pub fn log_workflow_step(step: &str, event_id: Option<&str>, details: Option<&str>) {
    info!(
        step = step,
        event_id = event_id,
        details = details,
        "Registration workflow step"
    );
}

/// Log the outcome of a confirmation email
pub fn log_email_outcome(email: &str, sent: bool, reason: Option<&str>) {
    if sent {
        info!(email = email, "Confirmation email sent");
    } else {
        warn!(
            email = email,
            reason = reason,
            "Confirmation email failed"
        );
    }
}

/// Log API errors with context
pub fn log_api_error(api: &str, error: &str, context: Option<&str>) {
    error!(
        api = api,
        error = error,
        context = context,
        "API error occurred"
    );
}

/// Log a completed or failed download
pub fn log_download(kind: &str, file_name: &str, bytes: usize, success: bool) {
    if success {
        info!(
            kind = kind,
            file_name = file_name,
            bytes = bytes,
            "Download completed"
        );
    } else {
        warn!(kind = kind, file_name = file_name, "Download failed");
    }
}

/// Log a carousel rotation
pub fn log_slide_change(from: usize, to: usize, slide_count: usize) {
    debug!(
        from = from,
        to = to,
        slide_count = slide_count,
        "Carousel slide changed"
    );
}
