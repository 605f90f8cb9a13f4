// ==========================================
// EA Portal Data Core
// ==========================================
// Spreadsheet exports in, normalized records and derived datasets
// out. Pure, single-pass transformations; no persistence, every view
// re-derives from a fresh load. "Now" is always an explicit
// parameter, never a hidden clock.
// ==========================================

// ==========================================
// Module declarations
// ==========================================

// Domain layer - entities and value types
pub mod domain;

// Input boundary - spreadsheet file loading
pub mod loader;

// Date normalization utility
pub mod dates;

// Normalization primitives - field maps, category tables
pub mod normalize;

// CART workflow transformer
pub mod cart;

// Project status deriver
pub mod project;

// Technology aggregation engine
pub mod technology;

// Filter & group-by pattern
pub mod filter;

// Logging
pub mod logging;

// ==========================================
// Re-exports
// ==========================================

pub use domain::{
    ApplicationRef, CellValue, Contract, DomainTreeNode, IssueLevel, NodeKind,
    NormalizedCartRequest, NormalizedProject, NormalizedStrategy, ProductSummary, ProjectStatus,
    RawRow, RequestStatus, RiskIndexEntry, TechnologyEntity, ValidationIssue, ValidationReport,
};

pub use cart::{transform_cart_requests, CartTransformOutput};
pub use dates::{date_difference_label, excel_serial_to_date, normalize_date, EpochSystem};
pub use filter::{
    group_by_count, group_by_sum, sort_by_count_desc, sort_years_with_running, CategoryCount,
    CategorySum, Filter, FilterSet,
};
pub use loader::{LoadError, LoadResult, SheetLoader};
pub use project::{derive_project, derive_strategy, usable_projects};
pub use technology::{
    aggregate_technologies, build_domain_tree, extract_risk_index, AggregationOptions,
    TechnologyAggregation,
};

// ==========================================
// Constants
// ==========================================

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const APP_NAME: &str = "EA Portal Data Core";
