//! HTTP server initialization and runtime setup.
//!
//! Opens the configured store, applies migrations and runs the Axum server
//! until Ctrl+C or SIGTERM.

use crate::config::{Config, StoreBackend};
use crate::domain::repositories::{LinkRepository, TokenRepository};
use crate::infrastructure::persistence::{
    MemoryLinkRepository, MemoryTokenRepository, PgLinkRepository, PgTokenRepository,
};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - The link and token stores (PostgreSQL pool + migrations, or in-memory)
/// - Application services
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let (links, tokens) = open_store(&config).await?;

    let state = AppState::new(
        links,
        tokens,
        config.base_url.clone(),
        config.token_signing_secret.clone(),
    );

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn open_store(
    config: &Config,
) -> Result<(Arc<dyn LinkRepository>, Arc<dyn TokenRepository>)> {
    match config.store_backend {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; all data is lost on restart");
            Ok((
                Arc::new(MemoryLinkRepository::new()),
                Arc::new(MemoryTokenRepository::new()),
            ))
        }
        StoreBackend::Postgres => {
            let pool = Arc::new(connect_pool(config).await?);
            Ok((
                Arc::new(PgLinkRepository::new(pool.clone())),
                Arc::new(PgTokenRepository::new(pool)),
            ))
        }
    }
}

/// Opens a PostgreSQL pool from `config` and applies pending migrations.
pub async fn connect_pool(config: &Config) -> Result<PgPool> {
    let database_url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL is required for the postgres store backend")?;

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to apply migrations")?;
    tracing::info!("Migrations applied");

    Ok(pool)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
