//! Gateway configuration.

use serde::{Deserialize, Serialize};

/// Identity backend origins and the switch selecting between them.
///
/// The active base is resolved once, when the gateway is constructed —
/// not re-read per call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Production origin.
    pub prod_url: String,

    /// Development origin.
    pub dev_url: String,

    /// Select `dev_url` instead of `prod_url`.
    #[serde(default)]
    pub dev: bool,
}

impl GatewayConfig {
    /// Read the configuration from `AUTHGATE_PROD_URL`, `AUTHGATE_DEV_URL`
    /// and `AUTHGATE_DEV` ("1"/"true" selects the dev origin).
    pub fn from_env() -> Option<Self> {
        let prod_url = std::env::var("AUTHGATE_PROD_URL").ok()?;
        let dev_url = std::env::var("AUTHGATE_DEV_URL").unwrap_or_else(|_| prod_url.clone());
        if prod_url.is_empty() {
            return None;
        }
        let dev = std::env::var("AUTHGATE_DEV")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        Some(Self {
            prod_url,
            dev_url,
            dev,
        })
    }

    /// The active origin, without any trailing slash.
    pub fn base_url(&self) -> &str {
        let base = if self.dev { &self.dev_url } else { &self.prod_url };
        base.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(dev: bool) -> GatewayConfig {
        GatewayConfig {
            prod_url: "https://id.example.com/".to_string(),
            dev_url: "http://127.0.0.1:8080".to_string(),
            dev,
        }
    }

    #[test]
    fn selects_origin_once_per_construction() {
        assert_eq!(config(false).base_url(), "https://id.example.com");
        assert_eq!(config(true).base_url(), "http://127.0.0.1:8080");
    }
}
