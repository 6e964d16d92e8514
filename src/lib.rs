//! Integration Debugger Library
//!
//! This library probes the manage and payment backends' debug endpoints,
//! checking frontend to backend and backend to database reachability and
//! exercising their database test objects.

pub mod client;
pub mod config;
pub mod controller;
pub mod errors;
pub mod render;
pub mod state;

pub use client::{DebugApi, DebugClient};
pub use config::Config;
pub use controller::{DebugPage, PageSnapshot};
pub use errors::{DebugError, Result};
pub use render::{OutputFormat, render_page};
pub use state::{ConnectionState, JsonObject, ServiceName, ServiceState, ServiceStates};
