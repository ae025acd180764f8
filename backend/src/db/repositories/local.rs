//! In-memory local repository implementation.
//!
//! Holds normalized parish records in memory. Suitable for unit tests, for
//! local development without a database, and for small deployments seeded
//! from a CSV extract of the `parroquias` table.

use async_trait::async_trait;
use log::{debug, info};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::db::repository::{ErrorContext, ParishRepository, RepositoryError, RepositoryResult};
use crate::models::{ParishRecord, RawParishRow, Scope};

/// Settings for the local repository.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalConfig {
    /// Optional CSV extract to seed the repository with.
    pub data_csv: Option<PathBuf>,
}

impl LocalConfig {
    /// Read `LOCAL_DATA_CSV` from the environment.
    pub fn from_env() -> Self {
        Self {
            data_csv: std::env::var("LOCAL_DATA_CSV")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
        }
    }
}

/// In-memory local repository.
///
/// # Example
/// ```
/// use paradox_dashboard::db::repositories::LocalRepository;
/// use paradox_dashboard::models::RawParishRow;
///
/// let repo = LocalRepository::new();
/// repo.insert_raw_rows(vec![RawParishRow {
///     nombre_parroquia: Some("Dureno".to_string()),
///     nombre_provincia: Some("Sucumbios".to_string()),
///     ..Default::default()
/// }]);
/// assert_eq!(repo.parish_count(), 1);
/// ```
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    parishes: Vec<ParishRecord>,
    // Connection health
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            parishes: Vec::new(),
            is_healthy: true,
        }
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Create a repository holding the given records.
    pub fn with_parishes(parishes: Vec<ParishRecord>) -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData {
                parishes,
                is_healthy: true,
            })),
        }
    }

    /// Load a CSV extract whose header uses the source column names.
    ///
    /// Empty cells and missing columns are treated as missing values and
    /// normalized to zero.
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> RepositoryResult<Self> {
        let path = path.as_ref();
        let context = || {
            ErrorContext::new("load_csv")
                .with_entity("parish")
                .with_details(path.display().to_string())
        };

        let mut reader = csv::Reader::from_path(path).map_err(|e| {
            RepositoryError::ConfigurationError {
                message: format!("Failed to open parish CSV: {}", e),
                context: context(),
            }
        })?;

        let mut parishes = Vec::new();
        for (line, row) in reader.deserialize::<RawParishRow>().enumerate() {
            let row = row.map_err(|e| {
                RepositoryError::validation_with_context(
                    format!("Invalid parish row {}: {}", line + 1, e),
                    context(),
                )
            })?;
            parishes.push(ParishRecord::from(row));
        }

        info!("Loaded {} parishes from {}", parishes.len(), path.display());
        Ok(Self::with_parishes(parishes))
    }

    /// Build a repository from its settings, loading the seed file if one is set.
    pub fn from_config(config: &LocalConfig) -> RepositoryResult<Self> {
        match &config.data_csv {
            Some(path) => Self::from_csv_path(path),
            None => Ok(Self::new()),
        }
    }

    /// Normalize and append raw rows.
    pub fn insert_raw_rows(&self, rows: Vec<RawParishRow>) {
        let mut data = self.write();
        data.parishes.extend(rows.into_iter().map(ParishRecord::from));
    }

    /// Set the health status for testing connection failures.
    pub fn set_healthy(&self, healthy: bool) {
        self.write().is_healthy = healthy;
    }

    /// Remove every record, keeping the health status.
    pub fn clear(&self) {
        self.write().parishes.clear();
    }

    /// Number of records stored.
    pub fn parish_count(&self) -> usize {
        self.read().parishes.len()
    }

    // A poisoned lock only means a writer panicked mid-update of plain data;
    // the records themselves are still usable.
    fn read(&self) -> RwLockReadGuard<'_, LocalData> {
        self.data.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, LocalData> {
        self.data.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Helper to check health and return error if unhealthy.
    fn check_health(&self, operation: &str) -> RepositoryResult<()> {
        if !self.read().is_healthy {
            return Err(RepositoryError::connection_with_context(
                "Database is not healthy",
                ErrorContext::new(operation),
            ));
        }
        Ok(())
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ParishRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.read().is_healthy)
    }

    async fn list_provinces(&self) -> RepositoryResult<Vec<String>> {
        self.check_health("list_provinces")?;

        let data = self.read();
        let provinces: BTreeSet<&str> = data
            .parishes
            .iter()
            .map(|p| p.province.as_str())
            .filter(|name| !name.is_empty())
            .collect();

        Ok(provinces.into_iter().map(str::to_string).collect())
    }

    async fn fetch_parishes(&self, scope: &Scope) -> RepositoryResult<Vec<ParishRecord>> {
        self.check_health("fetch_parishes")?;

        let data = self.read();
        let parishes: Vec<ParishRecord> = match scope.province() {
            None => data.parishes.clone(),
            Some(province) => data
                .parishes
                .iter()
                .filter(|p| p.province == province)
                .cloned()
                .collect(),
        };

        debug!("Fetched {} parishes for scope {}", parishes.len(), scope);
        Ok(parishes)
    }
}
