//! crm-core-server: REST server for the customer record store.
//!
//! Configuration comes from the environment, optionally seeded from `.env`.
//! See [`ServerConfig`] for the variables.

use anyhow::Context;
use crm_core_postgres::repository::db_init::init_database;
use crm_core_server::{build_router, AppState, ServerConfig};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,crm_core_server=debug,crm_core_postgres=debug".into()),
        )
        .init();

    let config = ServerConfig::from_env()?;

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await
        .context("failed to connect to database")?;
    tracing::info!(max_connections = config.max_connections, "Connected to database");

    if config.init_db {
        init_database(&pool)
            .await
            .context("failed to run database init scripts")?;
        tracing::info!("Database schema initialised");
    }

    let app = build_router(AppState::new(pool, &config));

    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_addr))?;
    tracing::info!(
        "crm-core-server listening on {} (uploads in {})",
        config.bind_addr,
        config.upload_dir.display()
    );

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
