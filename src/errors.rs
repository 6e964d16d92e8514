//! Error types for the integration debugger

use crate::state::ServiceName;
use std::fmt;

pub type Result<T> = std::result::Result<T, DebugError>;

/// Text shown in place of any failure that is not a non-2xx response
pub const UNEXPECTED_ERROR: &str = "Unexpected error";

#[derive(Debug)]
pub enum DebugError {
    /// Backend answered with a non-2xx status
    RequestFailed { service: ServiceName, status: u16 },

    /// HTTP request failed before a response arrived
    Http(reqwest::Error),

    /// JSON serialization failed
    Json(serde_json::Error),

    /// Configuration error
    Config(String),
}

impl DebugError {
    /// Text stored in a service's `error` field when an action fails.
    ///
    /// Only non-2xx responses are worth showing verbatim; transport and
    /// serialization failures collapse to a generic message.
    pub fn user_message(&self) -> String {
        match self {
            DebugError::RequestFailed { .. } => self.to_string(),
            _ => UNEXPECTED_ERROR.to_string(),
        }
    }
}

impl fmt::Display for DebugError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DebugError::RequestFailed { service, status } => {
                write!(f, "Request failed for {}: {}", service, status)
            }
            DebugError::Http(err) => write!(f, "HTTP error: {}", err),
            DebugError::Json(err) => write!(f, "JSON error: {}", err),
            DebugError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for DebugError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DebugError::Http(err) => Some(err),
            DebugError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for DebugError {
    fn from(err: reqwest::Error) -> Self {
        DebugError::Http(err)
    }
}

impl From<serde_json::Error> for DebugError {
    fn from(err: serde_json::Error) -> Self {
        DebugError::Json(err)
    }
}
