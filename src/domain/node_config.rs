// Node configuration summary - merges the metrics surface with API versions
use super::extractor::Extractor;
use super::payload::text;
use super::response::{Endpoint, ResponseSet};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConfigSummary {
    pub sync_name: Option<String>,
    pub wallet: Option<String>,
    pub hostname: Option<String>,
    pub platform: Option<String>,
    pub version: Option<String>,
    pub docker_image: Option<String>,
    pub container_image: Option<String>,
    pub reflector_version: Option<String>,
    pub launcher: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ConfigExtractor {
    metrics: Endpoint,
    versions: Endpoint,
}

impl ConfigExtractor {
    pub fn new(api_base: &str, metrics_base: &str) -> Self {
        Self {
            metrics: Endpoint::new("metrics", metrics_base, "/metrics"),
            versions: Endpoint::new("versions", api_base, "/api/versions"),
        }
    }

    fn summarize(metrics: &Value, versions: &Value) -> ConfigSummary {
        let platform = match (
            text(metrics, &["system", "platform"]),
            text(metrics, &["system", "arch"]),
        ) {
            (Some(platform), Some(arch)) => Some(format!("{} ({})", platform, arch)),
            (platform, arch) => platform.or(arch),
        };

        ConfigSummary {
            sync_name: text(metrics, &["synchronizer", "syncHash"]),
            wallet: text(metrics, &["synchronizer", "wallet"]),
            hostname: text(metrics, &["system", "hostname"]),
            platform,
            version: text(metrics, &["version"]),
            docker_image: text(versions, &["versions", "dockerImage"]),
            container_image: text(versions, &["versions", "containerImage"]),
            reflector_version: text(versions, &["versions", "reflectorVersion"]),
            launcher: text(versions, &["versions", "launcher"]),
        }
    }
}

impl Extractor for ConfigExtractor {
    type Summary = ConfigSummary;

    fn endpoints(&self) -> Vec<Endpoint> {
        vec![self.metrics.clone(), self.versions.clone()]
    }

    fn extract(&self, responses: &ResponseSet) -> Result<ConfigSummary, String> {
        let payloads = responses.payloads(&[&self.metrics, &self.versions])?;
        Ok(Self::summarize(payloads[0], payloads[1]))
    }
}
