//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{GatePassError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_api_config(&settings.api)?;
    validate_email_config(&settings.email)?;
    validate_carousel_config(&settings.carousel)?;
    validate_ui_config(&settings.ui)?;
    validate_downloads_config(&settings.downloads)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate backend API configuration
fn validate_api_config(config: &super::ApiConfig) -> Result<()> {
    if config.base_url.is_empty() {
        return Err(GatePassError::Config(
            "API base URL is required".to_string()
        ));
    }

    url::Url::parse(&config.base_url)
        .map_err(|e| GatePassError::Config(format!("Invalid API base URL: {}", e)))?;

    if config.timeout_seconds == 0 {
        return Err(GatePassError::Config(
            "API timeout must be greater than 0".to_string()
        ));
    }

    if config.csrf_cookie_name.is_empty() {
        return Err(GatePassError::Config(
            "CSRF cookie name is required".to_string()
        ));
    }

    Ok(())
}

/// Validate email relay configuration
fn validate_email_config(config: &super::EmailConfig) -> Result<()> {
    if !config.enabled {
        return Ok(());
    }

    if config.api_url.is_empty() {
        return Err(GatePassError::Config(
            "Email relay URL is required when email is enabled".to_string()
        ));
    }

    if config.service_id.is_empty() || config.template_id.is_empty() {
        return Err(GatePassError::Config(
            "Email relay service and template identifiers are required".to_string()
        ));
    }

    if config.public_key.is_empty() {
        return Err(GatePassError::Config(
            "Email relay public key is required".to_string()
        ));
    }

    if config.timeout_seconds == 0 {
        return Err(GatePassError::Config(
            "Email relay timeout must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate carousel configuration
fn validate_carousel_config(config: &super::CarouselConfig) -> Result<()> {
    if config.interval_ms == 0 {
        return Err(GatePassError::Config(
            "Carousel interval must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate page behavior configuration
fn validate_ui_config(config: &super::UiConfig) -> Result<()> {
    if config.max_quick_cards == 0 {
        return Err(GatePassError::Config(
            "At least one quick card must be shown".to_string()
        ));
    }

    // chrono rejects offsets of a full day or more
    if config.utc_offset_minutes.unsigned_abs() >= 24 * 60 {
        return Err(GatePassError::Config(
            format!("Invalid UTC offset: {} minutes", config.utc_offset_minutes)
        ));
    }

    Ok(())
}

/// Validate download configuration
fn validate_downloads_config(config: &super::DownloadsConfig) -> Result<()> {
    if config.output_dir.is_empty() {
        return Err(GatePassError::Config(
            "Download directory is required".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(GatePassError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(GatePassError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}
