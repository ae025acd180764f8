//! Repository trait definitions for the parish data source.
//!
//! # Module Organization
//!
//! - [`error`]: Error types for repository operations
//! - [`parish`]: Read-only queries over the parish table
//!
//! Handlers and services take the repository as an explicit argument
//! (`&dyn FullRepository` or a generic bound); there is no process-wide
//! handle.

pub mod error;
pub mod parish;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};
pub use parish::ParishRepository;

/// Composite trait bound for a complete repository implementation.
///
/// The parish explorer only reads, so this is currently [`ParishRepository`]
/// alone; it is kept as the bound used across the application so that new
/// repository traits can be added without touching every signature.
pub trait FullRepository: ParishRepository {}

impl<T> FullRepository for T where T: ParishRepository {}
