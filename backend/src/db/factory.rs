//! Repository factory for dependency injection.
//!
//! This module creates repository instances from runtime configuration. The
//! resulting `Arc<dyn FullRepository>` is handed to the HTTP state and from
//! there to every request; nothing is stored globally.

use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use log::info;

use super::repo_config::RepositoryConfig;
use super::repositories::{LocalConfig, LocalRepository};
#[cfg(feature = "postgres-repo")]
use super::repositories::PostgresRepository;
use super::repository::{FullRepository, RepositoryError, RepositoryResult};
use super::PostgresConfig;

/// Repository type configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryType {
    /// Postgres + Diesel implementation
    Postgres,
    /// In-memory local repository
    Local,
}

impl FromStr for RepositoryType {
    type Err = String;

    /// Parse repository type from string ("postgres", "pg", "local").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "postgres" | "pg" => Ok(Self::Postgres),
            "local" | "memory" => Ok(Self::Local),
            _ => Err(format!("Unknown repository type: {}", s)),
        }
    }
}

impl RepositoryType {
    /// Get repository type from environment variable.
    ///
    /// Reads `REPOSITORY_TYPE`. Defaults to Postgres if a database URL is
    /// present, otherwise Local.
    pub fn from_env() -> Self {
        if let Ok(val) = std::env::var("REPOSITORY_TYPE") {
            return val.parse().unwrap_or(Self::Local);
        }

        if std::env::var("DATABASE_URL").is_ok() || std::env::var("PG_DATABASE_URL").is_ok() {
            Self::Postgres
        } else {
            Self::Local
        }
    }
}

/// Repository factory for creating repository instances.
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create a repository instance based on type.
    ///
    /// # Arguments
    /// * `repo_type` - Type of repository to create
    /// * `postgres_config` - Database configuration (required for Postgres)
    /// * `local_config` - Local repository settings (used for Local)
    pub async fn create(
        repo_type: RepositoryType,
        postgres_config: Option<&PostgresConfig>,
        local_config: &LocalConfig,
    ) -> RepositoryResult<Arc<dyn FullRepository>> {
        match repo_type {
            RepositoryType::Postgres => {
                #[cfg(feature = "postgres-repo")]
                {
                    let config = postgres_config.ok_or_else(|| {
                        RepositoryError::configuration(
                            "Postgres repository requires PostgresConfig",
                        )
                    })?;
                    let pg = Self::create_postgres(config).await?;
                    Ok(pg as Arc<dyn FullRepository>)
                }
                #[cfg(not(feature = "postgres-repo"))]
                {
                    let _ = postgres_config;
                    Err(postgres_disabled())
                }
            }
            RepositoryType::Local => Self::create_local(local_config),
        }
    }

    /// Create a Postgres repository.
    #[cfg(feature = "postgres-repo")]
    pub async fn create_postgres(
        config: &PostgresConfig,
    ) -> RepositoryResult<Arc<PostgresRepository>> {
        let repo = PostgresRepository::new(config.clone())?;
        info!(
            "Postgres repository ready (pool max={}, retries={})",
            config.max_pool_size, config.max_retries
        );
        Ok(Arc::new(repo))
    }

    /// Create an in-memory local repository, seeded from CSV if configured.
    pub fn create_local(config: &LocalConfig) -> RepositoryResult<Arc<dyn FullRepository>> {
        let repo = LocalRepository::from_config(config)?;
        info!("Local repository ready with {} parishes", repo.parish_count());
        Ok(Arc::new(repo))
    }

    /// Create repository from environment configuration.
    ///
    /// Reads `REPOSITORY_TYPE` to determine which repository to create.
    pub async fn from_env() -> RepositoryResult<Arc<dyn FullRepository>> {
        RepositoryBuilder::new().from_env()?.build().await
    }

    /// Create repository from a TOML configuration file.
    pub async fn from_config_file<P: AsRef<Path>>(
        config_path: P,
    ) -> RepositoryResult<Arc<dyn FullRepository>> {
        let config = RepositoryConfig::from_file(config_path)?;
        Self::from_repository_config(&config).await
    }

    /// Create repository from a RepositoryConfig instance.
    pub async fn from_repository_config(
        config: &RepositoryConfig,
    ) -> RepositoryResult<Arc<dyn FullRepository>> {
        RepositoryBuilder::new()
            .with_repository_config(config)?
            .build()
            .await
    }
}

#[cfg(not(feature = "postgres-repo"))]
fn postgres_disabled() -> RepositoryError {
    RepositoryError::configuration("Postgres repository feature not enabled")
}

/// Builder for configuring repository creation.
///
/// # Example
/// ```no_run
/// use paradox_dashboard::db::{RepositoryBuilder, RepositoryType};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let repo = RepositoryBuilder::new()
///     .repository_type(RepositoryType::Local)
///     .local_csv("data/parroquias.csv")
///     .build()
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct RepositoryBuilder {
    repo_type: RepositoryType,
    local_config: LocalConfig,
    #[cfg(feature = "postgres-repo")]
    postgres_config: Option<PostgresConfig>,
}

impl RepositoryBuilder {
    /// Create a new repository builder.
    ///
    /// The type defaults to Postgres if a database URL is set, otherwise Local.
    pub fn new() -> Self {
        Self {
            repo_type: RepositoryType::from_env(),
            local_config: LocalConfig::default(),
            #[cfg(feature = "postgres-repo")]
            postgres_config: None,
        }
    }

    /// Set the repository type.
    pub fn repository_type(mut self, repo_type: RepositoryType) -> Self {
        self.repo_type = repo_type;
        self
    }

    /// Seed the local repository from a CSV file.
    pub fn local_csv(mut self, path: impl AsRef<Path>) -> Self {
        self.local_config.data_csv = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the Postgres configuration.
    #[cfg(feature = "postgres-repo")]
    pub fn postgres_config(mut self, config: PostgresConfig) -> Self {
        self.postgres_config = Some(config);
        self
    }

    /// Load configuration from environment variables.
    pub fn from_env(mut self) -> Result<Self, RepositoryError> {
        self.repo_type = RepositoryType::from_env();

        match self.repo_type {
            RepositoryType::Local => {
                self.local_config = LocalConfig::from_env();
            }
            RepositoryType::Postgres => {
                #[cfg(feature = "postgres-repo")]
                {
                    let config =
                        PostgresConfig::from_env().map_err(RepositoryError::configuration)?;
                    self.postgres_config = Some(config);
                }
                #[cfg(not(feature = "postgres-repo"))]
                {
                    return Err(postgres_disabled());
                }
            }
        }

        Ok(self)
    }

    /// Load configuration from a parsed `repository.toml`.
    pub fn with_repository_config(
        mut self,
        repo_config: &RepositoryConfig,
    ) -> Result<Self, RepositoryError> {
        self.repo_type = repo_config.repository_type().map_err(|e| {
            RepositoryError::configuration(format!("Invalid repository type: {}", e))
        })?;
        self.local_config = repo_config.to_local_config();

        if self.repo_type == RepositoryType::Postgres {
            #[cfg(feature = "postgres-repo")]
            {
                let config = repo_config.to_postgres_config()?.ok_or_else(|| {
                    RepositoryError::configuration(
                        "Postgres repository requires database configuration",
                    )
                })?;
                self.postgres_config = Some(config);
            }
            #[cfg(not(feature = "postgres-repo"))]
            {
                return Err(postgres_disabled());
            }
        }

        Ok(self)
    }

    /// Load configuration from a TOML file.
    pub fn from_config_file<P: AsRef<Path>>(self, config_path: P) -> Result<Self, RepositoryError> {
        let repo_config = RepositoryConfig::from_file(config_path)?;
        self.with_repository_config(&repo_config)
    }

    /// Build the repository instance.
    pub async fn build(self) -> RepositoryResult<Arc<dyn FullRepository>> {
        #[cfg(feature = "postgres-repo")]
        let pg_config = self.postgres_config.as_ref();
        #[cfg(not(feature = "postgres-repo"))]
        let pg_config: Option<&PostgresConfig> = None;

        RepositoryFactory::create(self.repo_type, pg_config, &self.local_config).await
    }
}

impl Default for RepositoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
