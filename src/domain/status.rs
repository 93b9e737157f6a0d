// Service status summary
use super::extractor::Extractor;
use super::payload::{flag, lookup, text};
use super::response::{Endpoint, ResponseSet};
use super::units::format_uptime;
use chrono::{DateTime, Local, Utc};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct StatusSummary {
    pub status: Option<String>,
    pub docker_available: Option<bool>,
    pub autostart: Option<bool>,
    pub uptime: Option<String>,
    pub container_running: Option<bool>,
    pub update_available: Option<bool>,
    pub last_checked: Option<String>,
}

#[derive(Debug, Clone)]
pub struct StatusExtractor {
    status: Endpoint,
}

impl StatusExtractor {
    pub fn new(api_base: &str) -> Self {
        Self {
            status: Endpoint::new("status", api_base, "/api/status"),
        }
    }

    fn summarize(payload: &Value) -> StatusSummary {
        StatusSummary {
            status: text(payload, &["serviceStatus"]),
            docker_available: flag(payload, &["dockerAvailable"]),
            autostart: flag(payload, &["autoStart"]),
            uptime: lookup(payload, &["uptime"]).and_then(uptime_text),
            container_running: flag(payload, &["containerRunning"]),
            update_available: flag(payload, &["imageUpdates", "available"]),
            last_checked: lookup(payload, &["imageUpdates", "lastChecked"]).and_then(timestamp_text),
        }
    }
}

impl Extractor for StatusExtractor {
    type Summary = StatusSummary;

    fn endpoints(&self) -> Vec<Endpoint> {
        vec![self.status.clone()]
    }

    fn extract(&self, responses: &ResponseSet) -> Result<StatusSummary, String> {
        let payloads = responses.payloads(&[&self.status])?;
        Ok(Self::summarize(payloads[0]))
    }
}

/// Seconds become `1d 2h 3m`; preformatted strings pass through.
fn uptime_text(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => n.as_f64().filter(|s| *s >= 0.0).map(|s| format_uptime(s as u64)),
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

/// RFC 3339 strings and epoch milliseconds are shown in local time.
fn timestamp_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(
            DateTime::parse_from_rfc3339(s)
                .map(|t| t.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|_| s.clone()),
        ),
        Value::Number(n) => n
            .as_i64()
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .map(|t| t.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()),
        _ => None,
    }
}
