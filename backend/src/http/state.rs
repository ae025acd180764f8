//! Shared state of the HTTP server.

use std::sync::Arc;

use crate::db::repository::FullRepository;

/// Handle to the parish data source, cloned into every request.
///
/// Built once at startup; handlers only read through it.
#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn FullRepository>,
}

impl AppState {
    pub fn new(repository: Arc<dyn FullRepository>) -> Self {
        Self { repository }
    }

    /// Wrap a concrete repository.
    pub fn from_repository<R>(repository: R) -> Self
    where
        R: FullRepository + 'static,
    {
        Self::new(Arc::new(repository))
    }

    pub fn repo(&self) -> &dyn FullRepository {
        self.repository.as_ref()
    }
}
