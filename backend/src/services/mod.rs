//! Service layer for business logic and orchestration.
//!
//! The filter, aggregation and export engines are pure functions over
//! normalized records. The overview and explorer services combine them with
//! a repository fetch.

pub mod aggregation;
pub mod explorer;
pub mod export;
pub mod filters;
pub mod overview;


pub use aggregation::{percentage_delta, summarize, ColumnStats, SummaryStatistics};
pub use explorer::{build_explorer_view, export_explorer_view, load_explorer_data, ExplorerExport};
pub use export::{to_delimited_text, ExportColumn, ExportError};
pub use filters::{apply_filters, FilterCriteria, FilterError};
pub use overview::{compute_overview, get_overview};
