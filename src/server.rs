//! HTTP server initialization and runtime setup.
//!
//! Handles the database pool, migrations, and Axum server lifecycle.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use sqlx::postgres::PgPoolOptions;

use crate::config::Config;
use crate::infrastructure::persistence::PgCampRepositoryFactory;
use crate::routes::app_router;
use crate::state::AppState;
use crate::utils::LinkGenerator;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Embedded migrations
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if the database connection, migration run, server bind,
/// or server runtime fails.
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations").run(&pool).await?;

    let repositories = Arc::new(PgCampRepositoryFactory::new(pool));
    let state = AppState::new(repositories, LinkGenerator::new("/api"));

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
