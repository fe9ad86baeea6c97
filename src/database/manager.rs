use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, PgPool};
use thiserror::Error;
use tracing::info;

use crate::config::{ConnectionParts, DatabaseConfig};

/// Errors from the store connector and query layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Invalid database URL: {0}")]
    InvalidDatabaseUrl(String),

    #[error("Connection failed: {0}")]
    Connection(#[source] sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Resolve the connection string: an explicit URL wins, otherwise it is
/// assembled from the individual parts.
pub fn build_connection_string(config: &DatabaseConfig) -> Result<String, DatabaseError> {
    match &config.url {
        Some(url) => {
            url::Url::parse(url).map_err(|e| DatabaseError::InvalidDatabaseUrl(e.to_string()))?;
            Ok(url.clone())
        }
        None => connection_string_from_parts(&config.parts),
    }
}

fn connection_string_from_parts(parts: &ConnectionParts) -> Result<String, DatabaseError> {
    let base = format!("postgres://{}:{}/{}", parts.host, parts.port, parts.database);
    let mut url =
        url::Url::parse(&base).map_err(|e| DatabaseError::InvalidDatabaseUrl(e.to_string()))?;

    // Percent-encodes credentials
    url.set_username(&parts.user)
        .and_then(|_| url.set_password(Some(&parts.password)))
        .map_err(|_| DatabaseError::InvalidDatabaseUrl("cannot carry credentials".to_string()))?;
    url.query_pairs_mut().append_pair("sslmode", &parts.sslmode);

    Ok(url.into())
}

/// Open the process-wide pool and ping it before handing it out.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
    let connection_string = build_connection_string(config)?;

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connection_timeout))
        .connect(&connection_string)
        .await
        .map_err(DatabaseError::Connection)?;

    ping(&pool).await.map_err(|e| match e {
        DatabaseError::Sqlx(inner) => DatabaseError::Connection(inner),
        other => other,
    })?;

    info!(
        max_connections = config.max_connections,
        "Connected to database"
    );
    Ok(pool)
}

/// Liveness check against the pool
pub async fn ping(pool: &PgPool) -> Result<(), DatabaseError> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Release the pool; called once after the server has stopped accepting requests
pub async fn close(pool: PgPool) {
    pool.close().await;
    info!("Closed database pool");
}
