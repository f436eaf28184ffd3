//! Schema bootstrap tool.
//!
//! Connects to `DATABASE_URL` and creates every Picshare table that does not
//! exist yet.

use anyhow::Context;

mod config;
mod telemetry;

use config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;
    telemetry::init_telemetry(&config.telemetry);

    let db = picshare_infra::connect(&config.database)
        .await
        .context("failed to connect to the database")?;

    picshare_infra::create_schema(&db)
        .await
        .context("failed to create the schema")?;

    tracing::info!("Schema initialized");
    Ok(())
}
