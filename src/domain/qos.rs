// Quality of service summary
use super::extractor::Extractor;
use super::payload::{integer, lookup, scalar_text};
use super::response::{Endpoint, ResponseSet};
use super::units::score_translate;
use serde_json::Value;
use std::collections::BTreeMap;

/// Percentages derived from the 0-2 QoS codes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QosSummary {
    pub score: Option<u8>,
    pub reliability: Option<u8>,
    pub availability: Option<u8>,
    pub efficiency: Option<u8>,
    pub blurbs: Vec<(String, String)>,
}

#[derive(Debug, Clone)]
pub struct QosExtractor {
    performance: Endpoint,
}

impl QosExtractor {
    pub fn new(api_base: &str) -> Self {
        Self {
            performance: Endpoint::new("performance", api_base, "/api/performance"),
        }
    }

    fn summarize(payload: &Value) -> QosSummary {
        // Absent codes stay unknown; present but unusable codes score 0.
        let percent = |key: &str| {
            let path = ["qos", key];
            lookup(payload, &path).map(|_| integer(payload, &path).map_or(0, score_translate))
        };

        let blurbs: BTreeMap<String, String> = lookup(payload, &["qos", "ratingsBlurbs"])
            .and_then(Value::as_object)
            .map(|blurbs| {
                blurbs
                    .iter()
                    .filter_map(|(key, value)| scalar_text(value).map(|text| (key.clone(), text)))
                    .collect()
            })
            .unwrap_or_default();

        QosSummary {
            score: percent("score"),
            reliability: percent("reliability"),
            availability: percent("availability"),
            efficiency: percent("efficiency"),
            blurbs: blurbs.into_iter().collect(),
        }
    }
}

impl Extractor for QosExtractor {
    type Summary = QosSummary;

    fn endpoints(&self) -> Vec<Endpoint> {
        vec![self.performance.clone()]
    }

    fn extract(&self, responses: &ResponseSet) -> Result<QosSummary, String> {
        let payloads = responses.payloads(&[&self.performance])?;
        Ok(Self::summarize(payloads[0]))
    }
}
