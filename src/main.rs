//! Setup binary: prepares the store database and seeds the catalog.
//!
//! Initializes tracing, loads `.env`, connects to the configured `SQLite`
//! database, creates the schema, and inserts any config.toml products not
//! yet present. The register front-ends link against the library; this
//! binary only gets a terminal ready for first use.

use dotenvy::dotenv;
use tillpoint::config::{catalog, database};
use tillpoint::core::product;
use tillpoint::errors::Result;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();

    // 3. Initialize database
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {e}"))?;
    database::create_tables(&db)
        .await
        .inspect_err(|e| error!("Failed to create tables: {e}"))?;
    info!("Database initialized at {}", database::get_database_url()?);

    // 4. Seed the catalog if a config.toml is present
    match catalog::load_default_config() {
        Ok(config) => {
            let inserted = product::seed_catalog(&db, &config).await?;
            info!(inserted, "Catalog seed complete");
        }
        Err(e) => warn!("Skipping catalog seed: {e}"),
    }

    let products = product::get_all_active_products(&db).await?;
    info!(count = products.len(), "Products available for sale");

    Ok(())
}
