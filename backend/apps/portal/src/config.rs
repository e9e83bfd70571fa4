//! Portal configuration read from the environment

use std::time::Duration;

use anyhow::Context;
use auth::AuthConfig;
use loan::GatewayConfig;
use platform::config::{DatabaseConfig, env_flag, env_list, env_opt, env_or, env_parse};
use platform::telemetry::TelemetryConfig;

pub const SERVICE_NAME: &str = "loan-validator-portal";

#[derive(Debug, Clone)]
pub struct PortalConfig {
    pub database: DatabaseConfig,
    pub port: u16,
    pub frontend_origins: Vec<String>,
    pub auth: AuthConfig,
    pub gateway: GatewayConfig,
    pub telemetry: TelemetryConfig,
}

impl PortalConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database: DatabaseConfig::from_env("loan_validator_db")?,
            port: env_parse("PORT", 8080)?,
            frontend_origins: env_list("FRONTEND_ORIGINS", "http://localhost:8080"),
            auth: auth_config()?,
            gateway: GatewayConfig::new(
                env_or("GOV_BANK_URL", "http://localhost:8081"),
                Duration::from_secs(env_parse("DOWNSTREAM_TIMEOUT_SECS", 10)?),
            ),
            telemetry: TelemetryConfig::from_env(SERVICE_NAME)?,
        })
    }
}

fn auth_config() -> anyhow::Result<AuthConfig> {
    let session_secret = match env_opt("SESSION_SECRET") {
        Some(encoded) => platform::crypto::decode_key(&encoded).context("SESSION_SECRET")?,
        None => {
            tracing::warn!("SESSION_SECRET not set, sessions will not survive a restart");
            platform::crypto::random_key()
        }
    };

    Ok(AuthConfig {
        session_secret,
        session_ttl: Duration::from_secs(env_parse("SESSION_TTL_SECS", 12 * 3600)?),
        cookie_secure: env_flag("COOKIE_SECURE", false)?,
        password_pepper: env_opt("PASSWORD_PEPPER").map(String::into_bytes),
        ..AuthConfig::default()
    })
}
