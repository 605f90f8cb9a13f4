// ==========================================
// EA Portal Data Core - CART request transformer
// ==========================================
// Raw workflow-tracking rows -> NormalizedCartRequest, with derived
// on-time/delayed status and delay magnitude.
// ==========================================
// "today" is an explicit parameter: no hidden clock, tests pin it.
// ==========================================

use crate::dates::{date_difference_label, format_ddmmyyyy, parse_ddmmyyyy};
use crate::domain::cart::NormalizedCartRequest;
use crate::domain::types::{CellValue, RawRow, RequestStatus};
use crate::domain::validation::{IssueLevel, ValidationReport};
use crate::normalize::{map_fields, normalize_category, text_of, AGENCY_CODES, DOCUMENT_TYPE_LABELS};
use chrono::NaiveDate;
use tracing::{debug, info};

// ===== Fixed mapping schema: source column -> internal key =====
// Casing drifts across exports, so several sources feed one target;
// tracking a new column is one more table entry.
const CART_FIELD_MAP: &[(&str, &str)] = &[
    ("requestID", "id"),
    ("Request ID", "id"),
    ("RequestID", "id"),
    ("projectName", "name"),
    ("Project Name", "name"),
    ("DocumentType", "type"),
    ("Document Type", "type"),
    ("documentType", "type"),
    ("stage", "stage"),
    ("Stage", "stage"),
    ("Current Stage", "stage"),
    ("department", "department"),
    ("Department", "department"),
    ("submissionDate", "submission_date"),
    ("Submission Date", "submission_date"),
    ("plannedclosuredate", "planning_closure_date"),
    ("Planned Closure Date", "planning_closure_date"),
    ("planningClosureDate", "planning_closure_date"),
    ("summary", "summary"),
    ("Summary", "summary"),
    ("priority", "priority"),
    ("Priority", "priority"),
    ("pendingWith", "pending_reviewers"),
    ("Pending With", "pending_reviewers"),
    ("agency", "agency"),
    ("Agency", "agency"),
];

// ===== Tracked workflow stages =====
// Pre-tendering stages collapse to one display label after filtering.
pub const PENDING_WITH_CART: &str = "Pending with CART";

const PRE_TENDERING_STAGES: &[&str] = &["ea team", "digital strategy", "cart"];

const POST_TENDERING_STAGES: &[(&str, &str)] = &[
    ("under review cycle 1", "Under Review Cycle 1"),
    ("under review cycle 2", "Under Review Cycle 2"),
    ("under review cycle 3", "Under Review Cycle 3"),
    ("chairperson rejection review", "Chairperson Rejection Review"),
];

/// Case-insensitive allow-list check; returns the display stage.
fn canonical_stage(raw: &str) -> Option<String> {
    let lowered = raw.trim().to_lowercase();
    if PRE_TENDERING_STAGES.contains(&lowered.as_str()) {
        return Some(PENDING_WITH_CART.to_string());
    }
    POST_TENDERING_STAGES
        .iter()
        .find(|(key, _)| *key == lowered)
        .map(|(_, display)| (*display).to_string())
}

/// Transformer output: records plus the data quality side-channel.
#[derive(Debug, Clone)]
pub struct CartTransformOutput {
    pub requests: Vec<NormalizedCartRequest>,
    pub report: ValidationReport,
    /// Rows dropped by the stage allow-list (data quality gate:
    /// only active, tracked requests surface).
    pub excluded_stage_count: usize,
}

/// Strict date read for this dataset: the export writes DD/MM/YYYY
/// text, but Excel date-formatted cells arrive pre-parsed.
fn strict_date(cell: Option<&CellValue>) -> Option<NaiveDate> {
    match cell? {
        CellValue::Text(s) => parse_ddmmyyyy(s),
        CellValue::Ymd { y, m, d } => NaiveDate::from_ymd_opt(*y, *m, *d),
        _ => None,
    }
}

pub fn transform_cart_requests(rows: &[RawRow], today: NaiveDate) -> CartTransformOutput {
    let mut requests = Vec::new();
    let mut report = ValidationReport::new(rows.len());
    let mut excluded_stage_count = 0usize;

    for (idx, raw_row) in rows.iter().enumerate() {
        let row_number = idx + 1;
        let row = map_fields(raw_row, CART_FIELD_MAP);

        // Inclusion filter: unrecognized stages are excluded, counted,
        // and traced - never silently lost.
        let raw_stage = text_of(&row, &["stage"]).unwrap_or_default();
        let stage = match canonical_stage(&raw_stage) {
            Some(stage) => stage,
            None => {
                excluded_stage_count += 1;
                debug!(row = row_number, stage = %raw_stage, "untracked stage, row excluded");
                continue;
            }
        };

        // Required dates: missing/unparseable is a per-row reject with
        // a diagnostic, not a batch abort.
        let submission = match strict_date(row.get("submission_date")) {
            Some(date) => date,
            None => {
                report.push(
                    row_number,
                    IssueLevel::Error,
                    "submission_date",
                    "missing or unparseable submission date (expected DD/MM/YYYY)".to_string(),
                );
                debug!(row = row_number, "rejected: bad submission date");
                continue;
            }
        };
        let closure = match strict_date(row.get("planning_closure_date")) {
            Some(date) => date,
            None => {
                report.push(
                    row_number,
                    IssueLevel::Error,
                    "planning_closure_date",
                    "missing or unparseable planned closure date (expected DD/MM/YYYY)".to_string(),
                );
                debug!(row = row_number, "rejected: bad closure date");
                continue;
            }
        };

        // Start-of-day comparison: delayed iff closure strictly before today.
        let (status, delay) = if closure < today {
            (
                RequestStatus::Delayed,
                Some(date_difference_label(today, closure)),
            )
        } else {
            (RequestStatus::InProgress, None)
        };

        let agency = text_of(&row, &["agency"])
            .map(|v| normalize_category(&v, &AGENCY_CODES))
            .unwrap_or_default();
        let request_type = text_of(&row, &["type"])
            .map(|v| normalize_category(&v, &DOCUMENT_TYPE_LABELS))
            .unwrap_or_default();

        let pending_reviewers = text_of(&row, &["pending_reviewers"])
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        requests.push(NormalizedCartRequest {
            id: text_of(&row, &["id"]).unwrap_or_default(),
            name: text_of(&row, &["name"]).unwrap_or_default(),
            request_type,
            stage,
            department: text_of(&row, &["department"]).unwrap_or_default(),
            submission_date: format_ddmmyyyy(submission),
            planning_closure_date: format_ddmmyyyy(closure),
            summary: text_of(&row, &["summary"]).unwrap_or_default(),
            priority: text_of(&row, &["priority"]).unwrap_or_default(),
            pending_reviewers,
            agency,
            status,
            delay,
        });
    }

    report.accepted = requests.len();
    info!(
        total = rows.len(),
        accepted = report.accepted,
        rejected = report.error_count(),
        excluded_stage = excluded_stage_count,
        "cart requests transformed"
    );

    CartTransformOutput {
        requests,
        report,
        excluded_stage_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn row(pairs: &[(&str, &str)]) -> RawRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), CellValue::from(*v)))
            .collect()
    }

    fn tracked_row(stage: &str, closure: &str) -> RawRow {
        row(&[
            ("requestID", "R1"),
            ("stage", stage),
            ("submissionDate", "01/01/2024"),
            ("plannedclosuredate", closure),
        ])
    }

    #[test]
    fn test_unknown_stage_excluded_and_counted() {
        let rows = vec![tracked_row("Random Unknown Stage", "01/07/2024")];
        let output = transform_cart_requests(&rows, today());

        assert!(output.requests.is_empty());
        assert_eq!(output.excluded_stage_count, 1);
        // Exclusion is a gate, not a validation error.
        assert_eq!(output.report.error_count(), 0);
    }

    #[test]
    fn test_stage_match_is_case_insensitive_and_collapsed() {
        let rows = vec![tracked_row("cart", "01/07/2024")];
        let output = transform_cart_requests(&rows, today());

        assert_eq!(output.requests.len(), 1);
        assert_eq!(output.requests[0].stage, PENDING_WITH_CART);
        assert_eq!(output.requests[0].status, RequestStatus::InProgress);
    }

    #[test]
    fn test_all_pre_tendering_stages_collapse() {
        for stage in ["EA Team", "Digital Strategy", "CART"] {
            let output = transform_cart_requests(&[tracked_row(stage, "01/07/2024")], today());
            assert_eq!(output.requests[0].stage, PENDING_WITH_CART, "stage {}", stage);
        }
    }

    #[test]
    fn test_post_tendering_stage_keeps_own_label() {
        let rows = vec![tracked_row("under review cycle 2", "01/07/2024")];
        let output = transform_cart_requests(&rows, today());
        assert_eq!(output.requests[0].stage, "Under Review Cycle 2");
    }

    #[test]
    fn test_delay_derivation_ten_days() {
        // Closure 10 days before today: delayed, largest whole unit is 1 Week.
        let rows = vec![tracked_row("CART", "05/06/2024")];
        let output = transform_cart_requests(&rows, today());

        let request = &output.requests[0];
        assert_eq!(request.status, RequestStatus::Delayed);
        assert_eq!(request.delay.as_deref(), Some("1 Week"));
    }

    #[test]
    fn test_closure_today_is_in_progress() {
        // Strictly-before comparison: closing today is not yet delayed.
        let rows = vec![tracked_row("CART", "15/06/2024")];
        let output = transform_cart_requests(&rows, today());

        assert_eq!(output.requests[0].status, RequestStatus::InProgress);
        assert_eq!(output.requests[0].delay, None);
    }

    #[test]
    fn test_missing_closure_date_rejected_with_diagnostic() {
        let rows = vec![row(&[
            ("requestID", "R9"),
            ("stage", "CART"),
            ("submissionDate", "01/01/2024"),
        ])];
        let output = transform_cart_requests(&rows, today());

        assert!(output.requests.is_empty());
        assert_eq!(output.report.error_count(), 1);
        assert_eq!(output.report.issues[0].field, "planning_closure_date");
        assert_eq!(output.report.issues[0].row_number, 1);
    }

    #[test]
    fn test_end_to_end_scenario() {
        let rows = vec![row(&[
            ("requestID", "R1"),
            ("stage", "CART"),
            ("submissionDate", "01/01/2024"),
            ("plannedclosuredate", "01/01/2023"),
            ("pendingWith", "Alice, Bob"),
            ("agency", "Public Transport Agency"),
            ("DocumentType", "Advisory Service"),
        ])];
        let output = transform_cart_requests(&rows, today());

        assert_eq!(output.requests.len(), 1);
        let request = &output.requests[0];
        assert_eq!(request.id, "R1");
        assert_eq!(request.stage, PENDING_WITH_CART);
        assert_eq!(request.status, RequestStatus::Delayed);
        assert_eq!(request.delay.as_deref(), Some("1 Year"));
        assert_eq!(request.agency, "PTA");
        assert_eq!(request.request_type, "Advisory Service");
        assert_eq!(request.pending_reviewers, vec!["Alice", "Bob"]);
    }
}
