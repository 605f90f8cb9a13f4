// ==========================================
// EA Portal Data Core - project & strategy records
// ==========================================

use crate::domain::types::ProjectStatus;
use serde::{Deserialize, Serialize};

/// A project row after date normalization and status derivation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedProject {
    pub name: Option<String>,
    /// DD/MM/YYYY, `None` when the source value was unparseable.
    pub start_date: Option<String>,
    pub start_year: Option<i32>,
    pub end_date: Option<String>,
    pub end_year: Option<i32>,
    /// Latest reported progress pair, kept for drill-down display.
    pub latest_actual: Option<f64>,
    pub latest_target: Option<f64>,
    /// `Unknown` (blank) whenever either progress value is non-numeric.
    pub project_status: ProjectStatus,
}

/// A strategy row with its distinct-project count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedStrategy {
    pub name: Option<String>,
    /// Count of unique project identifiers in the comma-separated
    /// "Projects" cell.
    pub project_count: usize,
}
