//! Configuration loaded from environment variables.

use std::env;
use std::time::Duration;

use anyhow::Context;

use picshare_infra::DatabaseConfig;

use crate::telemetry::TelemetryConfig;

/// Tool configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from environment variables. `DATABASE_URL` is required.
    pub fn from_env() -> anyhow::Result<Self> {
        let url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

        let mut database = DatabaseConfig::new(url);
        database.max_connections = parse_var("DB_MAX_CONNECTIONS").unwrap_or(10);
        database.min_connections = parse_var("DB_MIN_CONNECTIONS").unwrap_or(1);
        if let Some(secs) = parse_var("DB_CONNECT_TIMEOUT_SECS") {
            database.connect_timeout = Duration::from_secs(secs);
        }
        database.sqlx_logging = env::var("DB_SQL_LOGGING")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        Ok(Self {
            database,
            telemetry: TelemetryConfig::from_env(),
        })
    }
}

fn parse_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.parse().ok())
}
