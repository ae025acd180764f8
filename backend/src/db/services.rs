//! Service layer for database operations.
//!
//! Thin, backend-agnostic wrappers over [`ParishRepository`] used by the HTTP
//! handlers and the application services. Every function takes the
//! repository explicitly.

use log::{debug, info};

use super::repository::{FullRepository, RepositoryResult};
use crate::models::{ParishRecord, Scope};

/// Check whether the data source is reachable.
pub async fn health_check<R: FullRepository + ?Sized>(repo: &R) -> RepositoryResult<bool> {
    repo.health_check().await
}

/// List the distinct province names, sorted.
pub async fn list_provinces<R: FullRepository + ?Sized>(repo: &R) -> RepositoryResult<Vec<String>> {
    let provinces = repo.list_provinces().await?;
    debug!("Listed {} provinces", provinces.len());
    Ok(provinces)
}

/// Fetch the normalized parish records of a scope.
///
/// An unknown province yields an empty dataset, not an error.
pub async fn fetch_parishes<R: FullRepository + ?Sized>(
    repo: &R,
    scope: &Scope,
) -> RepositoryResult<Vec<ParishRecord>> {
    let parishes = repo.fetch_parishes(scope).await?;
    info!("Loaded {} parishes for scope '{}'", parishes.len(), scope);
    Ok(parishes)
}
