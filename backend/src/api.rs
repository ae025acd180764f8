//! Public API surface for the Rust backend.
//!
//! This file consolidates the DTO types for the HTTP API.
//! All types derive Serialize/Deserialize for JSON serialization.

pub use crate::routes::explorer::DerivedCounts;
pub use crate::routes::explorer::DescribeRow;
pub use crate::routes::explorer::ExplorerData;
pub use crate::routes::explorer::ExplorerMetrics;
pub use crate::routes::explorer::ExplorerStatus;
pub use crate::routes::landing::OverviewData;
pub use crate::routes::landing::ProvinceList;

pub use crate::models::{ParishField, ParishRecord, Scope};
pub use crate::services::aggregation::{ColumnStats, SummaryStatistics};
pub use crate::services::filters::FilterCriteria;
