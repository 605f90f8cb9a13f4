// ==========================================
// EA Portal Data Core - CART request records
// ==========================================
// CART = the architecture review committee workflow. One record per
// tracked in-flight request, derived from the workflow export.
// ==========================================

use crate::domain::types::RequestStatus;
use serde::{Deserialize, Serialize};

/// A workflow-tracking row after normalization.
///
/// Dates are display strings in DD/MM/YYYY; the transformer has
/// already validated they parse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedCartRequest {
    pub id: String,
    pub name: String,
    /// Document type, short-label normalized. Serialized as `type`,
    /// matching the workflow export's field name.
    #[serde(rename = "type")]
    pub request_type: String,
    /// Display stage; all pre-tendering stages collapse to
    /// "Pending with CART".
    pub stage: String,
    pub department: String,
    pub submission_date: String,
    pub planning_closure_date: String,
    pub summary: String,
    pub priority: String,
    pub pending_reviewers: Vec<String>,
    /// Agency short code where known, raw value otherwise.
    pub agency: String,
    pub status: RequestStatus,
    /// Present iff `status == Delayed`; largest whole unit label,
    /// e.g. "1 Year", "3 Weeks".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay: Option<String>,
}
