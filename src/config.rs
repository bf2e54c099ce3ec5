use anyhow::Context;
use reqwest::Url;

use crate::controller::CompletionOrder;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: &str = "5000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerConfig {
    pub endpoint: String,
    pub completion_order: CompletionOrder,
}

impl ControllerConfig {
    /// Reads `PREDICT_URL`, or `HOST` and `PORT`, plus `COMPLETION_ORDER`.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let endpoint = match lookup("PREDICT_URL") {
            Some(url) => url,
            None => {
                let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
                let port = lookup("PORT").unwrap_or_else(|| DEFAULT_PORT.to_string());
                format!("http://{host}:{port}/predict")
            }
        };
        Url::parse(&endpoint).with_context(|| format!("invalid prediction endpoint {endpoint:?}"))?;

        let completion_order = match lookup("COMPLETION_ORDER") {
            Some(order) => order.parse::<CompletionOrder>().context("invalid COMPLETION_ORDER")?,
            None => CompletionOrder::default(),
        };

        Ok(Self {
            endpoint,
            completion_order,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> anyhow::Result<ControllerConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ControllerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_to_local_service() {
        let config = config(&[]).unwrap();
        assert_eq!(config.endpoint, "http://127.0.0.1:5000/predict");
        assert_eq!(config.completion_order, CompletionOrder::LastToResolve);
    }

    #[test]
    fn host_and_port_build_the_endpoint() {
        let config = config(&[("HOST", "10.0.0.7"), ("PORT", "8080")]).unwrap();
        assert_eq!(config.endpoint, "http://10.0.0.7:8080/predict");
    }

    #[test]
    fn predict_url_wins() {
        let config = config(&[
            ("PREDICT_URL", "https://prices.example.com/predict"),
            ("HOST", "10.0.0.7"),
            ("COMPLETION_ORDER", "latest"),
        ])
        .unwrap();
        assert_eq!(config.endpoint, "https://prices.example.com/predict");
        assert_eq!(config.completion_order, CompletionOrder::LatestSubmission);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(config(&[("PREDICT_URL", "not a url")]).is_err());
        assert!(config(&[("COMPLETION_ORDER", "random")]).is_err());
    }
}
