//! Data source adapter for the parish table.
//!
//! This module provides abstractions for database operations via the
//! Repository pattern, allowing different storage backends to be swapped
//! easily.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  HTTP handlers / application services                   │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services.rs)                            │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Trait (repository/) - Abstract Interface    │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!        ┌────────────┴──────────────┐
//!        │                           │
//! ┌──────▼───────────┐      ┌────────▼─────────┐
//! │ Postgres         │      │ Local            │
//! │ (diesel + r2d2)  │      │ (in-memory, CSV) │
//! └──────────────────┘      └──────────────────┘
//! ```
//!
//! # Usage
//!
//! The repository is built once at startup and passed explicitly to whoever
//! needs it; there is no process-wide handle.
//!
//! ```no_run
//! use paradox_dashboard::db::{self, services};
//! use paradox_dashboard::models::Scope;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let repo = db::create_repository().await?;
//! let parishes = services::fetch_parishes(repo.as_ref(), &Scope::All).await?;
//! # Ok(())
//! # }
//! ```

#[cfg(not(any(feature = "postgres-repo", feature = "local-repo")))]
compile_error!("Enable at least one repository backend feature.");

pub mod factory;
pub mod repo_config;
pub mod repositories;
pub mod repository;
pub mod services;

// Postgres config is colocated with the repository implementation.
#[cfg(feature = "postgres-repo")]
pub use repositories::postgres::{PoolStats, PostgresConfig};
#[cfg(not(feature = "postgres-repo"))]
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    _private: (),
}

pub use services::{fetch_parishes, health_check, list_provinces};

pub use factory::{RepositoryBuilder, RepositoryFactory, RepositoryType};
pub use repo_config::RepositoryConfig;
pub use repositories::{LocalConfig, LocalRepository};
#[cfg(feature = "postgres-repo")]
pub use repositories::PostgresRepository;
pub use repository::{
    ErrorContext, FullRepository, ParishRepository, RepositoryError, RepositoryResult,
};

use log::info;
use std::sync::Arc;

/// Build the repository selected by the runtime configuration.
///
/// Uses `repository.toml` when one is found in the standard locations,
/// otherwise the environment (`REPOSITORY_TYPE`, `DATABASE_URL`,
/// `LOCAL_DATA_CSV`, ...).
pub async fn create_repository() -> RepositoryResult<Arc<dyn FullRepository>> {
    match RepositoryConfig::find_default_location() {
        Some(path) => {
            info!("Loading repository configuration from {}", path.display());
            RepositoryFactory::from_config_file(path).await
        }
        None => RepositoryFactory::from_env().await,
    }
}
