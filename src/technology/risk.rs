// ==========================================
// EA Portal Data Core - risk index extraction
// ==========================================
// Vulnerability flags, license status, and contract rows per
// product+version, matched heuristically against column names since
// risk columns are not standardized across exports.
// ==========================================
// Concept regexes are a declarative table; extending coverage means
// extending the table, not adding conditionals.
// ==========================================

use crate::dates::normalize_date;
use crate::domain::technology::{Contract, RiskIndexEntry};
use crate::domain::types::{CellValue, RawRow};
use crate::normalize::text_of;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

use super::aggregate::{technology_key, PRODUCT_KEYS, VENDOR_KEYS, VERSION_KEYS};

static VULNERABILITY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)vuln|cve|security").expect("valid regex"));
static LICENSE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)licen").expect("valid regex"));
static CONTRACT_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)contract.*name").expect("valid regex"));
static CONTRACT_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)contract.*(code|number|no)").expect("valid regex"));
static CONTRACT_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)contract.*(date|expiry)").expect("valid regex"));

/// Spreadsheet truthiness: any non-blank value that is not an explicit
/// negation. "CVE-2023-1234" in a CVE column counts.
fn is_truthy(value: &CellValue) -> bool {
    match value {
        CellValue::Empty => false,
        CellValue::Number(n) => *n != 0.0,
        CellValue::Ymd { .. } => true,
        CellValue::Text(s) => {
            let lowered = s.trim().to_lowercase();
            !matches!(
                lowered.as_str(),
                "" | "no" | "n" | "false" | "0" | "none" | "n/a" | "nil" | "-"
            )
        }
    }
}

/// Tri-state license interpretation; `None` means "leave previous
/// value untouched".
fn interpret_license(value: &CellValue) -> Option<bool> {
    let text = match value {
        CellValue::Text(s) => s.trim().to_lowercase(),
        _ => return None,
    };
    match text.as_str() {
        "yes" | "y" | "valid" | "active" | "licensed" | "true" => Some(true),
        "no" | "n" | "expired" | "inactive" | "unlicensed" | "false" => Some(false),
        _ => None,
    }
}

/// Extract risk signals keyed by the same `product__version` id the
/// aggregator uses.
pub fn extract_risk_index(rows: &[RawRow]) -> HashMap<String, RiskIndexEntry> {
    let mut index: HashMap<String, RiskIndexEntry> = HashMap::new();

    for row in rows {
        let product = text_of(row, PRODUCT_KEYS).unwrap_or_default();
        let version = text_of(row, VERSION_KEYS).unwrap_or_default();
        let entry = index
            .entry(technology_key(&product, &version))
            .or_default();

        if entry.vendor.is_empty() {
            if let Some(vendor) = text_of(row, VENDOR_KEYS) {
                entry.vendor = vendor;
            }
        }

        // Column order inside a HashMap row is arbitrary; sort so
        // "last interpretable wins" stays deterministic.
        let mut columns: Vec<&String> = row.keys().collect();
        columns.sort();

        let mut contract_name = String::new();
        let mut contract_code = String::new();
        let mut contract_date = String::new();

        for column in columns {
            let value = &row[column];
            if value.is_blank() {
                continue;
            }

            if VULNERABILITY_RE.is_match(column) && is_truthy(value) {
                // Monotonic OR: never reset to false.
                entry.has_vulnerability = true;
            }

            if LICENSE_RE.is_match(column) {
                if let Some(licensed) = interpret_license(value) {
                    entry.is_licensed = Some(licensed);
                }
            }

            if CONTRACT_NAME_RE.is_match(column) {
                contract_name = value.display();
            } else if CONTRACT_CODE_RE.is_match(column) {
                contract_code = value.display();
            } else if CONTRACT_DATE_RE.is_match(column) {
                contract_date = normalize_date(value).unwrap_or_else(|| value.display());
            }
        }

        // Append, never merge, even when the same values repeat.
        if !contract_name.is_empty() || !contract_code.is_empty() || !contract_date.is_empty() {
            entry.contracts.push(Contract {
                name: contract_name,
                code: contract_code,
                expiry_date: contract_date,
            });
        }
    }

    index
}
