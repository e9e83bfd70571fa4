//! Gateway Configuration

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Record service base URL, without trailing slash
    pub record_service_url: String,
    /// Upper bound for one downstream call, body included
    pub timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            record_service_url: "http://localhost:8081".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl GatewayConfig {
    pub fn new(record_service_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            record_service_url: record_service_url.into().trim_end_matches('/').to_string(),
            timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = GatewayConfig::new("http://gov:8081/", Duration::from_secs(1));
        assert_eq!(config.record_service_url, "http://gov:8081");
    }
}
