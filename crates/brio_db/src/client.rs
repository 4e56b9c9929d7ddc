//! Database client for the ERP connection
//!
//! The ERP is reached through SQLx's `Any` driver so the same queries run on
//! the production server and on a local SQLite copy.

use crate::error::DbError;
use brio_config::{AppConfig, ErpDatabaseConfig};
use sqlx::pool::PoolOptions;
use sqlx::Pool;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, error, info};

const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 10;

/// Pooled, read-only connection to the ERP
#[derive(Debug, Clone)]
pub struct DbClient {
    /// The database connection pool
    pool: Pool<sqlx::Any>,
}

impl DbClient {
    /// Create a new database client from the `erp` section of the application configuration
    ///
    /// # Errors
    ///
    /// * The `erp` section or its URL is missing
    /// * The database connection fails
    pub async fn new(config: &AppConfig) -> Result<Self, DbError> {
        let erp_config = config
            .erp
            .as_ref()
            .ok_or_else(|| DbError::ConfigError("ERP database configuration is missing".to_string()))?;

        Self::from_config(erp_config).await
    }

    /// Create a new database client from an ERP database configuration
    pub async fn from_config(erp_config: &ErpDatabaseConfig) -> Result<Self, DbError> {
        let db_url = erp_config
            .url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| DbError::ConfigError("ERP database URL is empty".to_string()))?;

        let pool = Self::create_pool(
            db_url,
            erp_config.max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS),
            Duration::from_secs(
                erp_config
                    .acquire_timeout_secs
                    .unwrap_or(DEFAULT_ACQUIRE_TIMEOUT_SECS),
            ),
        )
        .await?;

        Ok(Self { pool })
    }

    /// Create a new database client from a database URL with default pool settings
    pub async fn from_url(db_url: &str) -> Result<Self, DbError> {
        if db_url.is_empty() {
            return Err(DbError::UrlError("Database URL is empty".to_string()));
        }

        let pool = Self::create_pool(
            db_url,
            DEFAULT_MAX_CONNECTIONS,
            Duration::from_secs(DEFAULT_ACQUIRE_TIMEOUT_SECS),
        )
        .await?;

        Ok(Self { pool })
    }

    async fn create_pool(
        db_url: &str,
        max_connections: u32,
        acquire_timeout: Duration,
    ) -> Result<Pool<sqlx::Any>, DbError> {
        // Never log the URL itself, it carries credentials
        debug!(
            "Creating ERP database pool (max_connections={}, acquire_timeout={:?})",
            max_connections, acquire_timeout
        );

        // Register the compiled-in drivers with the Any driver
        sqlx::any::install_default_drivers();

        let pool_options = PoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(Duration::from_secs(600));

        // A local SQLite copy of the ERP must exist as a file before connecting
        if db_url.starts_with("sqlite:") {
            let db_path = if db_url.starts_with("sqlite://") {
                db_url.strip_prefix("sqlite://").unwrap_or(db_url)
            } else {
                db_url.strip_prefix("sqlite:").unwrap_or(db_url)
            };

            if !db_path.contains(":memory:") && !db_path.is_empty() {
                let path = std::path::Path::new(db_path);
                if let Some(dir) = path.parent() {
                    if !dir.as_os_str().is_empty() && !dir.exists() {
                        debug!("Creating directory for SQLite database: {:?}", dir);
                        std::fs::create_dir_all(dir).map_err(|e| {
                            error!("Failed to create directory for SQLite database: {}", e);
                            DbError::PoolError(format!("Failed to create directory: {}", e))
                        })?;
                    }
                }

                if !path.exists() {
                    debug!("Creating empty SQLite database file: {}", db_path);
                    std::fs::File::create(path).map_err(|e| {
                        error!("Failed to create SQLite database file: {}", e);
                        DbError::PoolError(format!("Failed to create database file: {}", e))
                    })?;
                }
            }
        }

        let options = sqlx::any::AnyConnectOptions::from_str(db_url)
            .map_err(|e| DbError::UrlError(e.to_string()))?;

        let pool = pool_options.connect_with(options).await.map_err(|e| {
            error!("Failed to create ERP database pool: {}", e);
            DbError::PoolError(e.to_string())
        })?;

        info!("ERP database pool created successfully");
        Ok(pool)
    }

    /// Get the database connection pool
    pub fn pool(&self) -> &Pool<sqlx::Any> {
        &self.pool
    }

    /// Execute a statement that returns no rows, returning the number of rows affected
    pub async fn execute(&self, query: &str) -> Result<u64, DbError> {
        sqlx::query(query)
            .execute(&self.pool)
            .await
            .map(|r| r.rows_affected())
            .map_err(|e| DbError::QueryError(e.to_string()))
    }

    /// Whether the ERP answers a trivial query
    pub async fn is_healthy(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}
