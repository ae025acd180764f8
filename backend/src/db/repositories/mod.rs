//! Repository implementations module.
//!
//! This module contains the implementations of the `ParishRepository` trait:
//! - `postgres`: PostgreSQL implementation with Diesel and an r2d2 pool
//! - `local`: In-memory implementation for unit testing and local development
pub mod local;
#[cfg(feature = "postgres-repo")]
pub mod postgres;

pub use local::{LocalConfig, LocalRepository};
#[cfg(feature = "postgres-repo")]
pub use postgres::{PoolStats, PostgresConfig, PostgresRepository};
