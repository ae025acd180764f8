//! Parish repository trait.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{ParishRecord, Scope};

/// Read access to the parish table.
///
/// Every call is independent: implementations acquire whatever connection
/// they need for the call and release it before returning. Records come back
/// normalized (missing values already zero).
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait ParishRepository: Send + Sync {
    /// Check that the data source is reachable.
    ///
    /// # Returns
    /// * `Ok(true)` if a trivial query succeeds
    /// * `Ok(false)` if the source answers but reports itself unhealthy
    /// * `Err(RepositoryError)` if the source cannot be reached
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// List the distinct province names, sorted.
    async fn list_provinces(&self) -> RepositoryResult<Vec<String>>;

    /// Fetch the parishes in a scope, in source order.
    ///
    /// An unknown province yields an empty list, not an error.
    async fn fetch_parishes(&self, scope: &Scope) -> RepositoryResult<Vec<ParishRecord>>;
}
