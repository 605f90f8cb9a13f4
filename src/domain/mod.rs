// ==========================================
// EA Portal Data Core - domain layer
// ==========================================
// Plain entity structs and enums; no behavior beyond small accessors.
// ==========================================

pub mod cart;
pub mod project;
pub mod technology;
pub mod types;
pub mod validation;

pub use cart::NormalizedCartRequest;
pub use project::{NormalizedProject, NormalizedStrategy};
pub use technology::{
    ApplicationRef, Contract, DomainTreeNode, ProductSummary, RiskIndexEntry, TechnologyEntity,
};
pub use types::{CellValue, NodeKind, ProjectStatus, RawRow, RequestStatus};
pub use validation::{IssueLevel, ValidationIssue, ValidationReport};
