// Traffic performance summary
use super::extractor::Extractor;
use super::payload::{number, text};
use super::response::{Endpoint, ResponseSet};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PerformanceSummary {
    pub total_traffic: Option<f64>,
    pub bytes_in: Option<f64>,
    pub bytes_out: Option<f64>,
    pub sessions: Option<String>,
    pub users: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PerformanceExtractor {
    performance: Endpoint,
}

impl PerformanceExtractor {
    pub fn new(api_base: &str) -> Self {
        Self {
            performance: Endpoint::new("performance", api_base, "/api/performance"),
        }
    }

    fn summarize(payload: &Value) -> PerformanceSummary {
        PerformanceSummary {
            total_traffic: number(payload, &["performance", "totalTraffic"]),
            bytes_in: number(payload, &["performance", "bytesIn"]),
            bytes_out: number(payload, &["performance", "bytesOut"]),
            sessions: text(payload, &["performance", "sessions"]),
            users: text(payload, &["performance", "users"]),
        }
    }
}

impl Extractor for PerformanceExtractor {
    type Summary = PerformanceSummary;

    fn endpoints(&self) -> Vec<Endpoint> {
        vec![self.performance.clone()]
    }

    fn extract(&self, responses: &ResponseSet) -> Result<PerformanceSummary, String> {
        let payloads = responses.payloads(&[&self.performance])?;
        Ok(Self::summarize(payloads[0]))
    }
}
