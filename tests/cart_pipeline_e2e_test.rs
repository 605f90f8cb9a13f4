// ==========================================
// EA Portal Data Core - CART pipeline end-to-end test
// ==========================================
// CSV file on disk -> loader -> transformer, with "today" pinned.
// ==========================================

use chrono::NaiveDate;
use ea_portal_core::loader::{CsvLoader, RowSource};
use ea_portal_core::logging;
use ea_portal_core::{transform_cart_requests, RequestStatus};
use std::io::Write;

fn write_csv(lines: &[&str]) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
    file
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

#[test]
fn test_csv_to_normalized_requests() {
    logging::init_test();

    let file = write_csv(&[
        "requestID,projectName,DocumentType,stage,department,submissionDate,plannedclosuredate,pendingWith,agency",
        "R1,Unified Ticketing,Advisory Service,CART,IT,01/01/2024,01/01/2023,\"Alice, Bob\",Public Transport Agency",
        "R2,Fleet Telemetry,Request for Proposal,Under Review Cycle 1,IT,01/05/2024,01/08/2024,Carol,Rail Agency",
        "R3,Old Archive,Advisory Service,Completed,IT,01/01/2020,01/01/2021,Dan,Rail Agency",
        "R4,No Dates,Advisory Service,CART,IT,,,Eve,Rail Agency",
    ]);

    let rows = CsvLoader.load_rows(file.path()).unwrap();
    assert_eq!(rows.len(), 4);

    let output = transform_cart_requests(&rows, today());

    // R3: untracked stage, excluded with a count. R4: missing dates,
    // rejected with a per-row diagnostic.
    assert_eq!(output.requests.len(), 2);
    assert_eq!(output.excluded_stage_count, 1);
    assert_eq!(output.report.error_count(), 1);
    assert_eq!(output.report.issues[0].row_number, 4);

    let r1 = output.requests.iter().find(|r| r.id == "R1").unwrap();
    assert_eq!(r1.name, "Unified Ticketing");
    assert_eq!(r1.stage, "Pending with CART");
    assert_eq!(r1.status, RequestStatus::Delayed);
    assert_eq!(r1.delay.as_deref(), Some("1 Year"));
    assert_eq!(r1.agency, "PTA");
    assert_eq!(r1.request_type, "Advisory Service");
    assert_eq!(r1.pending_reviewers, vec!["Alice", "Bob"]);
    assert_eq!(r1.submission_date, "01/01/2024");
    assert_eq!(r1.planning_closure_date, "01/01/2023");

    let r2 = output.requests.iter().find(|r| r.id == "R2").unwrap();
    assert_eq!(r2.stage, "Under Review Cycle 1");
    assert_eq!(r2.status, RequestStatus::InProgress);
    assert_eq!(r2.delay, None);
    assert_eq!(r2.agency, "RA");
    assert_eq!(r2.request_type, "RFP");
}

#[test]
fn test_rerun_is_idempotent() {
    let file = write_csv(&[
        "requestID,stage,submissionDate,plannedclosuredate",
        "R1,CART,01/01/2024,05/06/2024",
    ]);
    let rows = CsvLoader.load_rows(file.path()).unwrap();

    let first = transform_cart_requests(&rows, today());
    let second = transform_cart_requests(&rows, today());

    assert_eq!(first.requests.len(), second.requests.len());
    assert_eq!(first.requests[0].delay, second.requests[0].delay);
    assert_eq!(first.requests[0].delay.as_deref(), Some("1 Week"));
}
