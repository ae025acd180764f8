//! # Paradox Dashboard Backend
//!
//! Explorer over the parishes of Ecuador: oil infrastructure, contamination,
//! health facility coverage and afro-ecuadorian population.
//!
//! The crate reads the `parroquias` table, narrows it with user-selected
//! filters, summarizes the result and exports it as CSV. It exposes the data
//! as a REST API via Axum for a separate front end.
//!
//! ## Architecture
//!
//! - [`api`]: Data Transfer Objects (DTOs) for API responses
//! - [`db`]: Data source adapter, repository pattern and configuration
//! - [`models`]: Parish records and scopes
//! - [`services`]: Filter, aggregation and export engines, plus the
//!   overview and explorer services built on them
//! - [`http`]: Axum-based HTTP server and request handlers
//! - [`routes`]: Route-specific data types

// Allow large error types - RepositoryError contains rich context for debugging
#![allow(clippy::result_large_err)]

pub mod api;

pub mod db;
pub mod models;

pub mod routes;

pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
