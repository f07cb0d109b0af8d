//! # Tasklist API Server
//!
//! Serves the todo API, the auth endpoints and the HTML pages.
//!
//! ## Usage
//!
//! ```bash
//! DATABASE_URL=postgresql://localhost/tasklist cargo run -p tasklist-api
//! ```

use std::{net::SocketAddr, sync::Arc};
use tasklist_api::{
    app::{build_router, AppState},
    config::Config,
};
use tasklist_shared::{
    db::{
        migrations::run_migrations,
        pool::{close_pool, create_pool, DatabaseConfig},
    },
    store::PgStore,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tasklist_api=debug,tasklist_shared=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Tasklist API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;

    let pool = create_pool(DatabaseConfig {
        max_connections: config.database.max_connections,
        ..DatabaseConfig::from_url(&config.database.url)
    })
    .await?;

    run_migrations(&pool).await?;

    let address = config.bind_address();
    let state = AppState::new(Arc::new(PgStore::new(pool.clone())), config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!("Server listening on http://{}", address);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    close_pool(pool).await;
    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    wait_for_shutdown(tokio::signal::ctrl_c()).await;
}

/// Resolves once `signal` fires; never resolves if listening fails
async fn wait_for_shutdown<F>(signal: F)
where
    F: std::future::Future<Output = std::io::Result<()>>,
{
    if let Err(err) = signal.await {
        // Keep serving; the process can still be stopped externally
        tracing::error!("Failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, draining connections...");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_shutdown_on_signal() {
        let result = tokio::time::timeout(
            Duration::from_millis(100),
            wait_for_shutdown(async { Ok(()) }),
        )
        .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_keeps_serving_when_listener_fails() {
        let result = tokio::time::timeout(
            Duration::from_millis(100),
            wait_for_shutdown(async {
                Err(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    "signal handler unavailable",
                ))
            }),
        )
        .await;

        assert!(result.is_err());
    }
}
