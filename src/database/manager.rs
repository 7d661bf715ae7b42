use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

/// Errors raised while bringing the database up
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Invalid database URL: {0}")]
    InvalidDatabaseUrl(String),

    #[error("Migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Pool construction and schema migration for the PostgreSQL backend
pub struct DatabaseManager;

impl DatabaseManager {
    /// Opens the connection pool; failure here aborts startup
    pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
        let options = Self::connect_options(config)?;
        let host = options.get_host().to_string();
        let database = options.get_database().unwrap_or_default().to_string();

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect_with(options)
            .await?;

        info!(
            host = %host,
            database = %database,
            max_connections = config.max_connections,
            "Connected to database"
        );
        Ok(pool)
    }

    /// Resolves `DATABASE_URL` when set, otherwise the discrete DB_* settings.
    ///
    /// The discrete settings go straight into the builder, so credentials
    /// never pass through URL parsing.
    pub fn connect_options(config: &DatabaseConfig) -> Result<PgConnectOptions, DatabaseError> {
        let Some(url) = &config.url else {
            return Ok(PgConnectOptions::new()
                .host(&config.host)
                .port(config.port)
                .username(&config.user)
                .password(&config.password)
                .database(&config.name));
        };

        let parsed = url::Url::parse(url).map_err(|e| DatabaseError::InvalidDatabaseUrl(e.to_string()))?;
        if !matches!(parsed.scheme(), "postgres" | "postgresql") {
            return Err(DatabaseError::InvalidDatabaseUrl(format!(
                "unsupported scheme '{}'",
                parsed.scheme()
            )));
        }
        PgConnectOptions::from_str(url).map_err(|e| DatabaseError::InvalidDatabaseUrl(e.to_string()))
    }

    /// Applies the embedded migrations under `migrations/`
    pub async fn migrate(pool: &PgPool) -> Result<(), DatabaseError> {
        sqlx::migrate!("./migrations").run(pool).await?;
        info!("Database migrations applied");
        Ok(())
    }
}
