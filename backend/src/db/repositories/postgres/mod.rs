//! Postgres repository implementation using Diesel.
//!
//! Reads the `parroquias` table, which is owned and populated by the ETL
//! pipeline; this crate never writes to it and ships no migrations.
//!
//! ## Features
//!
//! - Connection pooling with r2d2; every call checks out its own connection
//!   and returns it to the pool when done
//! - Automatic retry with exponential backoff for transient failures
//! - Lazy pool: the server starts even if the database is down and reports
//!   the outage per request
//!
//! ## Configuration
//!
//! Environment variables:
//! - `DATABASE_URL` or `PG_DATABASE_URL`: Connection string (required)
//! - `PG_POOL_MAX`: Maximum pool size (default: 10)
//! - `PG_POOL_MIN`: Minimum pool size (default: 1)
//! - `PG_CONN_TIMEOUT_SEC`: Connection timeout in seconds (default: 30)
//! - `PG_IDLE_TIMEOUT_SEC`: Idle connection timeout in seconds (default: 600)
//! - `PG_MAX_RETRIES`: Maximum retry attempts for transient failures (default: 3)
//! - `PG_RETRY_DELAY_MS`: Initial retry delay in milliseconds (default: 100)

use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sql_query;
use log::{debug, warn};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task;

use crate::db::repository::{ErrorContext, ParishRepository, RepositoryError, RepositoryResult};
use crate::models::{ParishRecord, RawParishRow, Scope};

mod models;
mod schema;

use models::{province_names, ParishRow};
use schema::parroquias;

type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Configuration for connecting to Postgres.
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Database connection URL
    pub database_url: String,
    /// Maximum number of connections in the pool
    pub max_pool_size: u32,
    /// Minimum number of connections in the pool
    pub min_pool_size: u32,
    /// Connection timeout in seconds
    pub connection_timeout_sec: u64,
    /// Idle connection timeout in seconds
    pub idle_timeout_sec: u64,
    /// Maximum number of retry attempts for transient failures
    pub max_retries: u32,
    /// Initial retry delay in milliseconds (doubles with each retry)
    pub retry_delay_ms: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            max_pool_size: 10,
            min_pool_size: 1,
            connection_timeout_sec: 30,
            idle_timeout_sec: 600,
            max_retries: 3,
            retry_delay_ms: 100,
        }
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

impl PostgresConfig {
    /// Create configuration from environment variables.
    ///
    /// See the module documentation for the variables read and their defaults.
    pub fn from_env() -> Result<Self, String> {
        let database_url = std::env::var("DATABASE_URL")
            .or_else(|_| std::env::var("PG_DATABASE_URL"))
            .map_err(|_| "DATABASE_URL or PG_DATABASE_URL must be set".to_string())?;

        let defaults = Self::default();
        Ok(Self {
            database_url,
            max_pool_size: env_or("PG_POOL_MAX", defaults.max_pool_size),
            min_pool_size: env_or("PG_POOL_MIN", defaults.min_pool_size),
            connection_timeout_sec: env_or("PG_CONN_TIMEOUT_SEC", defaults.connection_timeout_sec),
            idle_timeout_sec: env_or("PG_IDLE_TIMEOUT_SEC", defaults.idle_timeout_sec),
            max_retries: env_or("PG_MAX_RETRIES", defaults.max_retries),
            retry_delay_ms: env_or("PG_RETRY_DELAY_MS", defaults.retry_delay_ms),
        })
    }

    /// Create a new configuration with a database URL.
    pub fn with_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            ..Default::default()
        }
    }
}

/// Connection pool statistics for monitoring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Number of connections currently in use
    pub connections_in_use: u32,
    /// Number of idle connections
    pub idle_connections: u32,
    /// Maximum pool size
    pub max_size: u32,
    /// Total successful operations
    pub total_queries: u64,
    /// Total failed operations (after retries)
    pub failed_queries: u64,
    /// Total retry attempts
    pub retried_operations: u64,
}

#[derive(Debug, Default)]
struct Counters {
    total_queries: AtomicU64,
    failed_queries: AtomicU64,
    retried_operations: AtomicU64,
}

/// Diesel-backed read-only repository for the parish table.
#[derive(Clone, Debug)]
pub struct PostgresRepository {
    pool: PgPool,
    config: PostgresConfig,
    counters: Arc<Counters>,
}

impl PostgresRepository {
    /// Create a repository with a lazily connecting pool.
    ///
    /// # Returns
    /// * `Ok(PostgresRepository)` on success
    /// * `Err(RepositoryError)` if the configuration is unusable
    pub fn new(config: PostgresConfig) -> RepositoryResult<Self> {
        if config.database_url.trim().is_empty() {
            return Err(RepositoryError::ConfigurationError {
                message: "Postgres repository requires a database URL".to_string(),
                context: ErrorContext::new("create_pool"),
            });
        }

        let manager = ConnectionManager::<PgConnection>::new(&config.database_url);

        let pool = Pool::builder()
            .max_size(config.max_pool_size)
            .min_idle(Some(config.min_pool_size))
            .connection_timeout(Duration::from_secs(config.connection_timeout_sec))
            .idle_timeout(Some(Duration::from_secs(config.idle_timeout_sec)))
            .test_on_check_out(true) // Validate connections before use
            .build_unchecked(manager);

        Ok(Self {
            pool,
            config,
            counters: Arc::new(Counters::default()),
        })
    }

    /// Snapshot of the pool state and operation counters.
    pub fn pool_stats(&self) -> PoolStats {
        let state = self.pool.state();
        PoolStats {
            connections_in_use: state.connections - state.idle_connections,
            idle_connections: state.idle_connections,
            max_size: self.config.max_pool_size,
            total_queries: self.counters.total_queries.load(Ordering::Relaxed),
            failed_queries: self.counters.failed_queries.load(Ordering::Relaxed),
            retried_operations: self.counters.retried_operations.load(Ordering::Relaxed),
        }
    }

    /// Execute a database operation with automatic retry for transient failures.
    ///
    /// The operation runs on the blocking pool with a connection checked out
    /// for this call only.
    async fn with_conn<T, F>(&self, operation: &'static str, f: F) -> RepositoryResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> RepositoryResult<T> + Send + 'static + Clone,
    {
        let pool = self.pool.clone();
        let max_retries = self.config.max_retries;
        let retry_delay_ms = self.config.retry_delay_ms;
        let counters = Arc::clone(&self.counters);

        task::spawn_blocking(move || {
            let mut last_error = None;
            let mut retry_delay = Duration::from_millis(retry_delay_ms);

            for attempt in 0..=max_retries {
                if attempt > 0 {
                    counters.retried_operations.fetch_add(1, Ordering::Relaxed);
                    debug!("Retrying {} (attempt {})", operation, attempt + 1);
                    std::thread::sleep(retry_delay);
                    retry_delay *= 2; // Exponential backoff
                }

                let mut conn = match pool.get() {
                    Ok(c) => c,
                    Err(e) => {
                        last_error = Some(RepositoryError::connection_with_context(
                            e.to_string(),
                            ErrorContext::new(operation)
                                .with_details(format!("attempt={}", attempt + 1)),
                        ));
                        continue;
                    }
                };

                match f.clone()(&mut conn) {
                    Ok(result) => {
                        counters.total_queries.fetch_add(1, Ordering::Relaxed);
                        return Ok(result);
                    }
                    Err(e) if e.is_retryable() && attempt < max_retries => {
                        last_error = Some(e);
                    }
                    Err(e) => {
                        counters.failed_queries.fetch_add(1, Ordering::Relaxed);
                        return Err(e.with_operation(operation));
                    }
                }
            }

            let err = last_error.unwrap_or_else(|| {
                RepositoryError::internal("Max retries exceeded with no error captured")
            });
            counters.failed_queries.fetch_add(1, Ordering::Relaxed);
            warn!("{} failed after {} attempts: {}", operation, max_retries + 1, err);
            Err(err)
        })
        .await
        .map_err(|e| {
            RepositoryError::internal_with_context(
                format!("Task join error: {}", e),
                ErrorContext::new("spawn_blocking"),
            )
        })?
    }
}

fn map_diesel_error(err: diesel::result::Error) -> RepositoryError {
    RepositoryError::from(err)
}

#[async_trait]
impl ParishRepository for PostgresRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        self.with_conn("health_check", |conn| {
            sql_query("SELECT 1")
                .execute(conn)
                .map(|_| true)
                .map_err(map_diesel_error)
        })
        .await
    }

    async fn list_provinces(&self) -> RepositoryResult<Vec<String>> {
        let names = self
            .with_conn("list_provinces", |conn| {
                parroquias::table
                    .select(parroquias::nombre_provincia)
                    .filter(parroquias::nombre_provincia.is_not_null())
                    .distinct()
                    .load::<Option<String>>(conn)
                    .map_err(map_diesel_error)
            })
            .await?;

        Ok(province_names(names))
    }

    async fn fetch_parishes(&self, scope: &Scope) -> RepositoryResult<Vec<ParishRecord>> {
        let province = scope.province().map(str::to_string);

        let rows = self
            .with_conn("fetch_parishes", move |conn| {
                let mut query = parroquias::table
                    .select(ParishRow::as_select())
                    .order((
                        parroquias::nombre_provincia.asc(),
                        parroquias::nombre_canton.asc(),
                        parroquias::nombre_parroquia.asc(),
                    ))
                    .into_boxed();

                if let Some(province) = province {
                    query = query.filter(parroquias::nombre_provincia.eq(province));
                }

                query.load::<ParishRow>(conn).map_err(map_diesel_error)
            })
            .await?;

        debug!("Fetched {} parishes for scope {}", rows.len(), scope);
        Ok(rows
            .into_iter()
            .map(|row| ParishRecord::from(RawParishRow::from(row)))
            .collect())
    }
}
