//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub api: ApiConfig,
    pub email: EmailConfig,
    pub branding: BrandingConfig,
    pub carousel: CarouselConfig,
    pub ui: UiConfig,
    pub downloads: DownloadsConfig,
    pub logging: LoggingConfig,
}

/// Backend API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Origin the page was served from; empty paths are resolved against it
    pub base_url: String,
    pub timeout_seconds: u64,
    /// Cookie holding the anti-forgery token
    pub csrf_cookie_name: String,
    /// Raw `Cookie` header of the page session
    #[serde(default)]
    pub cookies: String,
}

/// Email relay configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    pub enabled: bool,
    pub api_url: String,
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
    pub timeout_seconds: u64,
}

/// Organization branding sent with every confirmation email
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BrandingConfig {
    pub college_name: String,
    pub college_tagline: String,
    pub logo_url: String,
    /// Local copy of the logo, embedded as a data URI when present
    pub logo_path: Option<String>,
}

/// Carousel configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CarouselConfig {
    pub interval_ms: u64,
    pub slide_count: usize,
}

/// Page behavior configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UiConfig {
    pub max_quick_cards: usize,
    pub status_clear_seconds: u64,
    pub print_reset_ms: u64,
    pub utc_offset_minutes: i32,
    pub events_page_path: String,
}

/// Download target configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DownloadsConfig {
    pub output_dir: String,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: String,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let defaults = config::Config::try_from(&Settings::default())?;

        let settings = config::Config::builder()
            .add_source(defaults)
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix("GATEPASS")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::GatePassError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: "http://localhost:8000".to_string(),
                timeout_seconds: 30,
                csrf_cookie_name: "csrftoken".to_string(),
                cookies: String::new(),
            },
            email: EmailConfig {
                enabled: true,
                api_url: "https://api.emailjs.com".to_string(),
                service_id: "service_4noajtf".to_string(),
                template_id: "template_eh5mdow".to_string(),
                public_key: "LW8AvJdD_7yUt0D9M".to_string(),
                timeout_seconds: 15,
            },
            branding: BrandingConfig {
                college_name: "CMR TECHNICAL CAMPUS".to_string(),
                college_tagline: "EXPLORE TO INVENT".to_string(),
                logo_url: "https://i.postimg.cc/9FLqJd5t/cmrtc.png".to_string(),
                logo_path: None,
            },
            carousel: CarouselConfig {
                interval_ms: 3000,
                slide_count: 3,
            },
            ui: UiConfig {
                max_quick_cards: 3,
                status_clear_seconds: 5,
                print_reset_ms: 1000,
                utc_offset_minutes: 0,
                events_page_path: "/events/".to_string(),
            },
            downloads: DownloadsConfig {
                output_dir: "downloads".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: "logs".to_string(),
            },
        }
    }
}
