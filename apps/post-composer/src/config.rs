//! Application configuration loaded from environment variables.

use std::env;
use std::time::Duration;

use chrono_tz::Tz;
use stoke_core::FlowConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Zone garage-sale dates and times are entered and shown in.
    pub zone: Tz,
    pub submit_timeout: Duration,
    pub submit_label: String,
    /// Where thumbnails and the placeholder image are served from.
    pub media_base_url: String,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let zone = match env::var("LISTING_TIMEZONE") {
            Ok(name) => name.parse().unwrap_or_else(|_| {
                tracing::warn!(zone = %name, "Unknown LISTING_TIMEZONE, falling back to UTC");
                chrono_tz::UTC
            }),
            Err(_) => chrono_tz::UTC,
        };

        Self {
            zone,
            submit_timeout: env::var("SUBMIT_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(Duration::from_secs(30)),
            submit_label: env::var("SUBMIT_LABEL").unwrap_or_else(|_| "Submit".to_string()),
            media_base_url: env::var("MEDIA_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
        }
    }

    pub fn flow_config(&self) -> FlowConfig {
        FlowConfig {
            zone: self.zone,
            submit_timeout: self.submit_timeout,
            submit_label: self.submit_label.clone(),
        }
    }
}
