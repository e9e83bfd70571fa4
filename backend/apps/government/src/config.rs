//! Record service configuration read from the environment

use platform::config::{DatabaseConfig, env_parse};
use platform::telemetry::TelemetryConfig;

pub const SERVICE_NAME: &str = "government_loan_bank";

#[derive(Debug, Clone)]
pub struct GovernmentConfig {
    pub database: DatabaseConfig,
    pub port: u16,
    pub telemetry: TelemetryConfig,
}

impl GovernmentConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database: DatabaseConfig::from_env("government_loan_db")?,
            port: env_parse("PORT", 8081)?,
            telemetry: TelemetryConfig::from_env(SERVICE_NAME)?,
        })
    }
}
