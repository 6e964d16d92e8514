//! Per-service debug state and the identifiers it is keyed by

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Opaque JSON object forwarded verbatim from a backend
pub type JsonObject = Map<String, Value>;

pub const STATUS_UNKNOWN: &str = "unknown";
pub const STATUS_CONNECTED: &str = "connected";
pub const STATUS_DISCONNECTED: &str = "disconnected";

/// Backend targeted by a request
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ServiceName {
    Manage,
    Payment,
}

impl ServiceName {
    pub const ALL: [ServiceName; 2] = [ServiceName::Manage, ServiceName::Payment];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceName::Manage => "manage",
            ServiceName::Payment => "payment",
        }
    }

    /// Human-readable panel title
    pub fn label(&self) -> &'static str {
        match self {
            ServiceName::Manage => "Palmery Manage",
            ServiceName::Payment => "Palmery Payment",
        }
    }
}

impl std::fmt::Display for ServiceName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionState {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<Number>,
}

impl ConnectionState {
    pub fn unknown() -> Self {
        Self {
            status: STATUS_UNKNOWN.to_string(),
            latency_ms: None,
        }
    }

    pub fn connected(latency_ms: u64) -> Self {
        Self {
            status: STATUS_CONNECTED.to_string(),
            latency_ms: Some(Number::from(latency_ms)),
        }
    }

    pub fn disconnected() -> Self {
        Self {
            status: STATUS_DISCONNECTED.to_string(),
            latency_ms: None,
        }
    }

    /// Read `database.status` / `database.latency_ms` out of an integration
    /// payload. Missing or mistyped fields, or a payload that is not an
    /// object, fall back to `unknown` and no latency.
    pub fn from_integration_payload(payload: &Value) -> Self {
        let database = payload.get("database").and_then(Value::as_object);

        let status = database
            .and_then(|db| db.get("status"))
            .and_then(Value::as_str)
            .unwrap_or(STATUS_UNKNOWN)
            .to_string();

        let latency_ms = database.and_then(|db| match db.get("latency_ms") {
            Some(Value::Number(n)) => Some(n.clone()),
            _ => None,
        });

        Self { status, latency_ms }
    }
}

impl Default for ConnectionState {
    fn default() -> Self {
        Self::unknown()
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceState {
    pub integration_payload: Option<Value>,
    pub latest_checks: Vec<JsonObject>,
    pub last_created_check: Option<Value>,
    pub frontend_to_backend: ConnectionState,
    pub backend_to_database: ConnectionState,
    pub message: Option<String>,
    pub error: Option<String>,
    /// When the last action on this service settled
    pub updated_at: Option<DateTime<Utc>>,
}

impl ServiceState {
    /// Mark an action as in flight
    pub fn begin(&mut self, message: &str) {
        self.message = Some(message.to_string());
        self.error = None;
    }

    /// Settle an action successfully
    pub fn succeed(&mut self, message: &str) {
        self.message = Some(message.to_string());
        self.error = None;
        self.updated_at = Some(Utc::now());
    }

    /// Settle an action with an error
    pub fn fail(&mut self, error: String) {
        self.message = None;
        self.error = Some(error);
        self.updated_at = Some(Utc::now());
    }
}

/// Fixed table of per-service state, one slot per `ServiceName`
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ServiceStates {
    pub manage: ServiceState,
    pub payment: ServiceState,
}

impl ServiceStates {
    pub fn get(&self, service: ServiceName) -> &ServiceState {
        match service {
            ServiceName::Manage => &self.manage,
            ServiceName::Payment => &self.payment,
        }
    }

    pub fn get_mut(&mut self, service: ServiceName) -> &mut ServiceState {
        match service {
            ServiceName::Manage => &mut self.manage,
            ServiceName::Payment => &mut self.payment,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (ServiceName, &ServiceState)> {
        ServiceName::ALL.into_iter().map(move |s| (s, self.get(s)))
    }
}
