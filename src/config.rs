//! Configuration management for the integration debugger

use crate::state::ServiceName;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

pub const DEFAULT_MANAGE_BASE_URL: &str = "http://localhost:8081";
pub const DEFAULT_PAYMENT_BASE_URL: &str = "http://localhost:8082";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Base URL of the manage backend
    pub manage_base_url: String,

    /// Base URL of the payment backend
    pub payment_base_url: String,

    /// Optional HTTP timeout; requests wait indefinitely when unset
    pub http_timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            manage_base_url: DEFAULT_MANAGE_BASE_URL.to_string(),
            payment_base_url: DEFAULT_PAYMENT_BASE_URL.to_string(),
            http_timeout: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let mut config = Config::default();

        if let Ok(url) = env::var("MANAGE_API_BASE_URL") {
            config.manage_base_url = url;
        }

        if let Ok(url) = env::var("PAYMENT_API_BASE_URL") {
            config.payment_base_url = url;
        }

        if let Ok(timeout) = env::var("HTTP_TIMEOUT_SECONDS") {
            if let Ok(seconds) = timeout.parse::<u64>() {
                config.http_timeout = Some(Duration::from_secs(seconds));
            }
        }

        config
    }

    /// Base URL for a service, without a trailing slash
    pub fn base_url(&self, service: ServiceName) -> &str {
        let url = match service {
            ServiceName::Manage => &self.manage_base_url,
            ServiceName::Payment => &self.payment_base_url,
        };
        url.trim_end_matches('/')
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        for service in ServiceName::ALL {
            let url = self.base_url(service);

            if url.is_empty() {
                return Err(format!("{} base url cannot be empty", service));
            }

            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(format!(
                    "{} base url must start with http:// or https://, got {}",
                    service, url
                ));
            }
        }

        if self.http_timeout == Some(Duration::ZERO) {
            return Err("http_timeout must be greater than 0".to_string());
        }

        Ok(())
    }
}
