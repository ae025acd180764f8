//! HTTP server module.
//!
//! Exposes the parish explorer as a REST API on top of the service layer and
//! the repository pattern.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers)                               │
//! │  - Query parsing and validation                           │
//! │  - JSON / CSV responses                                   │
//! │  - CORS, compression, error handling                      │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Service Layer (services/)                                │
//! │  - Filter, aggregation and export engines                 │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Repository Layer (db/)                                   │
//! │  - LocalRepository / PostgresRepository                   │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! # Endpoints
//!
//! | Method | Path | Response |
//! |---|---|---|
//! | GET | `/health` | [`dto::HealthResponse`] |
//! | GET | `/v1/provinces` | [`dto::ProvinceList`] |
//! | GET | `/v1/overview` | [`dto::OverviewData`] |
//! | GET | `/v1/explorer` | [`dto::ExplorerData`] |
//! | GET | `/v1/explorer/export` | `text/csv` attachment |

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
