//! Debug page controller: runs client actions and merges results into state

use crate::client::DebugApi;
use crate::state::{ConnectionState, ServiceName, ServiceState, ServiceStates};
use futures::future::join_all;
use serde::Serialize;
use std::time::Instant;
use tokio::sync::RwLock;
use tracing::{info, instrument, warn};

pub const MSG_CHECKING_INTEGRATION: &str = "Checking integration status...";
pub const MSG_INTEGRATION_LOADED: &str = "Integration status loaded.";
pub const MSG_CREATING_CHECK: &str = "Creating DB test object...";
pub const MSG_CHECK_CREATED: &str = "DB test object created. Run list checks to verify read path.";
pub const MSG_LOADING_CHECKS: &str = "Loading latest DB checks...";
pub const MSG_CHECKS_LOADED: &str = "Latest DB checks loaded.";
pub const MSG_RUNNING_ALL: &str = "Running healthcheck for manage and payment...";
pub const MSG_ALL_FINISHED: &str = "Healthcheck finished.";

/// Everything the page renders
#[derive(Clone, Debug, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PageSnapshot {
    pub global_message: Option<String>,
    pub services: ServiceStates,
}

/// Orchestrates debug actions against every configured service.
///
/// Actions never return errors; a failure lands in the affected service's
/// `error` field. Concurrent actions on the same service are not
/// serialized, so the last one to settle wins.
pub struct DebugPage<A> {
    api: A,
    states: RwLock<ServiceStates>,
    global_message: RwLock<Option<String>>,
}

impl<A: DebugApi> DebugPage<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            states: RwLock::new(ServiceStates::default()),
            global_message: RwLock::new(None),
        }
    }

    async fn update_state<F>(&self, service: ServiceName, patch: F)
    where
        F: FnOnce(&mut ServiceState),
    {
        let mut states = self.states.write().await;
        patch(states.get_mut(service));
    }

    async fn set_global_message(&self, message: &str) {
        *self.global_message.write().await = Some(message.to_string());
    }

    /// Probe a service's integration endpoint and derive both connection states
    #[instrument(skip(self))]
    pub async fn load_integration(&self, service: ServiceName) {
        self.update_state(service, |s| s.begin(MSG_CHECKING_INTEGRATION))
            .await;

        let started_at = Instant::now();
        match self.api.fetch_integration_status(service).await {
            Ok(payload) => {
                let latency_ms = (started_at.elapsed().as_secs_f64() * 1000.0).round() as u64;
                let database = ConnectionState::from_integration_payload(&payload);
                info!(
                    "{} reachable in {}ms, database status: {}",
                    service, latency_ms, database.status
                );

                self.update_state(service, |s| {
                    s.integration_payload = Some(payload);
                    s.frontend_to_backend = ConnectionState::connected(latency_ms);
                    s.backend_to_database = database;
                    s.succeed(MSG_INTEGRATION_LOADED);
                })
                .await;
            }
            Err(e) => {
                warn!("Integration check for {} failed: {}", service, e);
                self.update_state(service, |s| {
                    s.integration_payload = None;
                    s.frontend_to_backend = ConnectionState::disconnected();
                    s.backend_to_database = ConnectionState::unknown();
                    s.fail(e.user_message());
                })
                .await;
            }
        }
    }

    /// Create a database test object on a service
    #[instrument(skip(self))]
    pub async fn create_check(&self, service: ServiceName, source: Option<&str>) {
        self.update_state(service, |s| s.begin(MSG_CREATING_CHECK)).await;

        match self.api.create_database_check(service, source).await {
            Ok(created) => {
                self.update_state(service, |s| {
                    s.last_created_check = Some(created);
                    s.succeed(MSG_CHECK_CREATED);
                })
                .await;
            }
            Err(e) => {
                warn!("Creating check on {} failed: {}", service, e);
                self.update_state(service, |s| s.fail(e.user_message())).await;
            }
        }
    }

    /// List the latest database test objects of a service
    #[instrument(skip(self))]
    pub async fn load_checks(&self, service: ServiceName) {
        self.update_state(service, |s| s.begin(MSG_LOADING_CHECKS)).await;

        match self.api.fetch_database_checks(service).await {
            Ok(checks) => {
                info!("Loaded {} checks from {}", checks.len(), service);
                self.update_state(service, |s| {
                    s.latest_checks = checks;
                    s.succeed(MSG_CHECKS_LOADED);
                })
                .await;
            }
            Err(e) => {
                warn!("Listing checks on {} failed: {}", service, e);
                self.update_state(service, |s| s.fail(e.user_message())).await;
            }
        }
    }

    /// Run the integration check for every service concurrently
    pub async fn run_healthcheck_for_all(&self) {
        self.set_global_message(MSG_RUNNING_ALL).await;

        join_all(
            ServiceName::ALL
                .into_iter()
                .map(|service| self.load_integration(service)),
        )
        .await;

        self.set_global_message(MSG_ALL_FINISHED).await;
    }

    pub async fn service_state(&self, service: ServiceName) -> ServiceState {
        self.states.read().await.get(service).clone()
    }

    pub async fn global_message(&self) -> Option<String> {
        self.global_message.read().await.clone()
    }

    pub async fn snapshot(&self) -> PageSnapshot {
        PageSnapshot {
            global_message: self.global_message().await,
            services: self.states.read().await.clone(),
        }
    }
}
