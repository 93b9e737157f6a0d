// Points summary
use super::extractor::Extractor;
use super::payload::text;
use super::response::{Endpoint, ResponseSet};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PointsSummary {
    pub total: Option<String>,
    pub daily: Option<String>,
    pub weekly: Option<String>,
    pub monthly: Option<String>,
    pub streak: Option<String>,
    pub rank: Option<String>,
    pub multiplier: Option<String>,
    pub wallet_lifetime: Option<String>,
    pub sync_lifetime: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PointsExtractor {
    points: Endpoint,
}

impl PointsExtractor {
    pub fn new(api_base: &str) -> Self {
        Self {
            points: Endpoint::new("points", api_base, "/api/points"),
        }
    }

    fn summarize(payload: &Value) -> PointsSummary {
        PointsSummary {
            total: text(payload, &["points", "total"]),
            daily: text(payload, &["points", "daily"]),
            weekly: text(payload, &["points", "weekly"]),
            monthly: text(payload, &["points", "monthly"]),
            streak: text(payload, &["points", "streak"]),
            rank: text(payload, &["points", "rank"]),
            multiplier: text(payload, &["points", "multiplier"]),
            wallet_lifetime: text(payload, &["walletLifePoints"]),
            sync_lifetime: text(payload, &["syncLifePoints"]),
        }
    }
}

impl Extractor for PointsExtractor {
    type Summary = PointsSummary;

    fn endpoints(&self) -> Vec<Endpoint> {
        vec![self.points.clone()]
    }

    fn extract(&self, responses: &ResponseSet) -> Result<PointsSummary, String> {
        let payloads = responses.payloads(&[&self.points])?;
        Ok(Self::summarize(payloads[0]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::response::FetchError;
    use serde_json::json;

    fn set(extractor: &PointsExtractor, response: Result<Value, FetchError>) -> ResponseSet {
        extractor
            .endpoints()
            .into_iter()
            .map(|e| (e, response.clone()))
            .collect()
    }

    #[test]
    fn test_extract_points() {
        let extractor = PointsExtractor::new("http://localhost:3000");
        let summary = extractor
            .extract(&set(
                &extractor,
                Ok(json!({
                    "points": {"total": 1200, "daily": 15, "weekly": 90, "monthly": 400,
                               "streak": 6, "rank": 321, "multiplier": 1.5},
                    "walletLifePoints": 5000,
                    "syncLifePoints": 4200
                })),
            ))
            .unwrap();

        assert_eq!(summary.total.as_deref(), Some("1200"));
        assert_eq!(summary.multiplier.as_deref(), Some("1.5"));
        assert_eq!(summary.wallet_lifetime.as_deref(), Some("5000"));
        assert_eq!(summary.sync_lifetime.as_deref(), Some("4200"));
    }

    #[test]
    fn test_points_not_an_object() {
        let extractor = PointsExtractor::new("http://localhost:3000");
        let summary = extractor.extract(&set(&extractor, Ok(json!({"points": 12})))).unwrap();
        assert_eq!(summary, PointsSummary::default());
    }

    #[test]
    fn test_invalid_body_surfaces() {
        let extractor = PointsExtractor::new("http://localhost:3000");
        let result = extractor.extract(&set(
            &extractor,
            Err(FetchError::InvalidBody("expected value at line 1 column 1".to_string())),
        ));
        assert_eq!(
            result,
            Err("Invalid response body: expected value at line 1 column 1".to_string())
        );
    }
}
