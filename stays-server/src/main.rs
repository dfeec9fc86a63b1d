//! Main entry point for the stays API server.
//!
//! Configuration is layered from `{data_dir}/config.yaml` and `STAYS_*`
//! environment variables; see the `stays::config` module for precedence.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;

use stays::database::resolve_database_path;
use stays::{init_logger, ConfigBuilder, Database, DatabaseConfig};
use stays_server::{router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let logger = init_logger(false, false);

    let config = ConfigBuilder::new()
        .build()
        .context("failed to load configuration")?;

    let db_path = resolve_database_path(config.data_dir.as_deref())
        .context("failed to resolve database path")?;
    let db_config = DatabaseConfig::new(&db_path)
        .with_busy_timeout(Duration::from_millis(config.busy_timeout_ms()));
    let db = Database::open(db_config)
        .with_context(|| format!("failed to open database at {}", db_path.display()))?;
    logger.info(&format!("database at {}", db_path.display()));

    let addr: SocketAddr = config
        .bind_addr()
        .parse()
        .with_context(|| format!("invalid bind address {}", config.bind_addr()))?;
    logger.info(&format!("listening on {addr}"));

    let state = AppState::new(db);
    axum::Server::bind(&addr)
        .serve(router(state).into_make_service())
        .await
        .context("server error")?;

    Ok(())
}
