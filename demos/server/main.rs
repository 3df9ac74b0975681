//! Invoice Actions Server Example
//!
//! Serves the invoice form actions over HTTP. The store is in-memory unless
//! the crate is built with `--features postgres` and the config names a
//! database.
//!
//! ```sh
//! cargo run --example invoice_server -- config.yaml
//! ```

use anyhow::Result;
use invoices::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => AppConfig::from_yaml_file(&path)?,
        None => AppConfig::default(),
    };

    // Initialize tracing; RUST_LOG wins over the config file
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_filter.clone()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cache = BroadcastViewCache::default();
    let mut revalidations = cache.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = revalidations.recv().await {
            tracing::info!(path = %event.path, revision = event.revision, "listing is stale");
        }
    });

    let builder = ServerBuilder::new()
        .with_view_cache(cache)
        .with_config(config.clone());
    let builder = with_configured_store(builder, &config).await?;

    println!("🚀 Starting invoice actions on http://{}", config.server.bind_addr);
    println!("\n📚 Routes:");
    println!("    POST   {}                 - Create an invoice", config.routes.listing_path);
    println!("    POST   {}/{{id}}/edit       - Update an invoice", config.routes.listing_path);
    println!("    POST   {}/{{id}}/delete     - Delete an invoice", config.routes.listing_path);
    println!("    GET    /health                            - Health check");

    builder.serve().await
}

#[cfg(feature = "postgres")]
async fn with_configured_store(builder: ServerBuilder, config: &AppConfig) -> Result<ServerBuilder> {
    use invoices::storage::postgres::ensure_schema;
    use sqlx::postgres::PgPoolOptions;

    let Some(database) = &config.database else {
        return Ok(builder.with_store(InMemoryInvoiceStore::new()));
    };

    let pool = PgPoolOptions::new()
        .max_connections(database.max_connections)
        .connect(&database.url)
        .await?;
    ensure_schema(&pool).await?;

    tracing::info!("Using PostgreSQL invoice store");
    Ok(builder.with_store(PostgresInvoiceStore::new(pool)))
}

#[cfg(not(feature = "postgres"))]
async fn with_configured_store(builder: ServerBuilder, config: &AppConfig) -> Result<ServerBuilder> {
    if config.database.is_some() {
        tracing::warn!("database configured but the postgres feature is disabled; using memory");
    }
    Ok(builder.with_store(InMemoryInvoiceStore::new()))
}
