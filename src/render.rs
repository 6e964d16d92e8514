//! Text and JSON rendering of the debug page

use crate::controller::PageSnapshot;
use crate::errors::Result;
use crate::state::{ServiceName, ServiceState};
use serde::Serialize;
use std::fmt::Write;

pub const PAGE_TITLE: &str = "Palmery Integration Debug";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Render the page, limited to `services`
pub fn render_page(
    snapshot: &PageSnapshot,
    services: &[ServiceName],
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(snapshot, services)),
        OutputFormat::Json => render_json(snapshot, services),
    }
}

fn render_text(snapshot: &PageSnapshot, services: &[ServiceName]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", PAGE_TITLE);
    if let Some(message) = &snapshot.global_message {
        let _ = writeln!(out, "{}", message);
    }

    for service in services {
        out.push('\n');
        out.push_str(&render_service(*service, snapshot.services.get(*service)));
    }

    out
}

/// One service panel: messages, both connection states, then whichever
/// payloads are present
pub fn render_service(service: ServiceName, state: &ServiceState) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "## {}", service.label());

    if let Some(message) = &state.message {
        let _ = writeln!(out, "{}", message);
    }
    if let Some(error) = &state.error {
        let _ = writeln!(out, "error: {}", error);
    }

    section(&mut out, "Frontend to Backend", &state.frontend_to_backend);
    section(&mut out, "Backend to Database", &state.backend_to_database);

    if let Some(created) = &state.last_created_check {
        section(&mut out, "Latest Created DB Test Object", created);
    }
    if let Some(payload) = &state.integration_payload {
        section(&mut out, "Raw Integration Payload", payload);
    }
    if !state.latest_checks.is_empty() {
        section(&mut out, "Latest DB Checks", &state.latest_checks);
    }

    out
}

fn section<T: Serialize>(out: &mut String, title: &str, value: &T) {
    let body = serde_json::to_string_pretty(value).unwrap_or_else(|_| "null".to_string());
    let _ = writeln!(out, "### {}\n{}", title, body);
}

fn render_json(snapshot: &PageSnapshot, services: &[ServiceName]) -> Result<String> {
    let mut panels = serde_json::Map::new();
    for service in services {
        panels.insert(
            service.as_str().to_string(),
            serde_json::to_value(snapshot.services.get(*service))?,
        );
    }

    let page = serde_json::json!({
        "globalMessage": snapshot.global_message,
        "services": panels,
    });

    Ok(serde_json::to_string_pretty(&page)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ConnectionState;
    use serde_json::{Value, json};

    fn sample_snapshot() -> PageSnapshot {
        let mut snapshot = PageSnapshot {
            global_message: Some("Healthcheck finished.".to_string()),
            ..PageSnapshot::default()
        };

        let manage = snapshot.services.get_mut(ServiceName::Manage);
        manage.frontend_to_backend = ConnectionState::connected(8);
        manage.message = Some("Integration status loaded.".to_string());
        manage.integration_payload = Some(json!({"database": {"status": "ok"}}));

        let payment = snapshot.services.get_mut(ServiceName::Payment);
        payment.frontend_to_backend = ConnectionState::disconnected();
        payment.error = Some("Request failed for payment: 500".to_string());

        snapshot
    }

    #[test]
    fn test_text_rendering() {
        let text = render_page(&sample_snapshot(), &ServiceName::ALL, OutputFormat::Text).unwrap();

        assert!(text.starts_with(PAGE_TITLE));
        assert!(text.contains("Healthcheck finished."));
        assert!(text.contains("## Palmery Manage"));
        assert!(text.contains("\"latencyMs\": 8"));
        assert!(text.contains("### Raw Integration Payload"));
        assert!(text.contains("error: Request failed for payment: 500"));
        assert!(!text.contains("### Latest DB Checks"));
    }

    #[test]
    fn test_text_rendering_single_service() {
        let text =
            render_page(&sample_snapshot(), &[ServiceName::Payment], OutputFormat::Text).unwrap();

        assert!(text.contains("## Palmery Payment"));
        assert!(!text.contains("## Palmery Manage"));
    }

    #[test]
    fn test_json_rendering() {
        let rendered =
            render_page(&sample_snapshot(), &ServiceName::ALL, OutputFormat::Json).unwrap();
        let value: Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(value["globalMessage"], "Healthcheck finished.");
        assert_eq!(
            value["services"]["manage"]["frontendToBackend"],
            json!({"status": "connected", "latencyMs": 8})
        );
        assert_eq!(
            value["services"]["payment"]["backendToDatabase"],
            json!({"status": "unknown"})
        );
        assert_eq!(value["services"]["payment"]["message"], Value::Null);
    }
}
