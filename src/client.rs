//! HTTP client for the backends' debug endpoints

use crate::config::Config;
use crate::errors::{DebugError, Result};
use crate::state::{JsonObject, ServiceName};
use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use reqwest::{Client, Method, Response};
use serde_json::{Value, json};
use tracing::{debug, warn};

pub const INTEGRATION_PATH: &str = "/api/debug/integration";
pub const CHECKS_PATH: &str = "/api/debug/checks";
pub const DEFAULT_CHECK_SOURCE: &str = "frontend-debug";

/// Operations the debug page needs from a backend
#[async_trait]
pub trait DebugApi: Send + Sync {
    /// Raw integration payload, passed through as the backend sent it
    async fn fetch_integration_status(&self, service: ServiceName) -> Result<Value>;

    /// Created record, passed through as the backend sent it
    async fn create_database_check(
        &self,
        service: ServiceName,
        source: Option<&str>,
    ) -> Result<Value>;

    async fn fetch_database_checks(&self, service: ServiceName) -> Result<Vec<JsonObject>>;
}

/// reqwest-backed `DebugApi`
#[derive(Debug, Clone)]
pub struct DebugClient {
    client: Client,
    config: Config,
}

impl DebugClient {
    pub fn new(config: Config) -> Result<Self> {
        let mut builder = Client::builder()
            .user_agent(format!("integration_debugger/{}", env!("CARGO_PKG_VERSION")));

        if let Some(timeout) = config.http_timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(DebugError::Http)?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Issue a request and return the parsed body of a 2xx response
    async fn request(
        &self,
        service: ServiceName,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value> {
        let url = format!("{}{}", self.config.base_url(service), path);
        debug!("{} {} for {}", method, url, service);

        let mut request = self
            .client
            .request(method, &url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(body) = body {
            request = request.body(body.to_string());
        }

        let response = request.send().await.map_err(|e| {
            warn!("Request to {} failed: {}", url, e);
            DebugError::Http(e)
        })?;

        let status = response.status();
        let data = parse_json(response).await;

        if !status.is_success() {
            warn!("{} returned {} for {}", url, status, service);
            return Err(DebugError::RequestFailed {
                service,
                status: status.as_u16(),
            });
        }

        Ok(data)
    }
}

#[async_trait]
impl DebugApi for DebugClient {
    async fn fetch_integration_status(&self, service: ServiceName) -> Result<Value> {
        self.request(service, Method::GET, INTEGRATION_PATH, None)
            .await
    }

    async fn create_database_check(
        &self,
        service: ServiceName,
        source: Option<&str>,
    ) -> Result<Value> {
        let body = json!({ "source": source.unwrap_or(DEFAULT_CHECK_SOURCE) });
        self.request(service, Method::POST, CHECKS_PATH, Some(body))
            .await
    }

    async fn fetch_database_checks(&self, service: ServiceName) -> Result<Vec<JsonObject>> {
        let data = self.request(service, Method::GET, CHECKS_PATH, None).await?;

        match data {
            Value::Array(items) => Ok(items
                .into_iter()
                .filter_map(|item| match item {
                    Value::Object(map) => Some(map),
                    _ => None,
                })
                .collect()),
            other => {
                debug!("Checks response for {} is not an array: {}", service, other);
                Ok(Vec::new())
            }
        }
    }
}

/// Read a response body as JSON, treating anything unparseable as `{}`
async fn parse_json(response: Response) -> Value {
    let bytes = match response.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => {
            debug!("Failed to read response body: {}", e);
            return Value::Object(JsonObject::new());
        }
    };

    serde_json::from_slice(&bytes).unwrap_or_else(|e| {
        debug!("Response body is not JSON, using empty object: {}", e);
        Value::Object(JsonObject::new())
    })
}
