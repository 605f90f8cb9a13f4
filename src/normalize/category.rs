// ==========================================
// EA Portal Data Core - categorical value normalizer
// ==========================================
// Raw categorical text -> canonical short code via lookup tables.
// Tables are versioned constants: updating them is a code change,
// not runtime configuration.
// ==========================================

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Agency display name -> short code.
pub static AGENCY_CODES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("Public Transport Agency", "PTA"),
        ("Traffic and Roads Agency", "TRA"),
        ("Rail Agency", "RA"),
        ("Licensing Agency", "LA"),
        ("Corporate Technology Support Services", "CTSS"),
        ("Corporate Administrative Support Services", "CASS"),
        ("Strategy and Corporate Governance", "SCG"),
    ])
});

/// Document type -> short display label.
pub static DOCUMENT_TYPE_LABELS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("Request for Proposal", "RFP"),
        ("Business Case Document", "Business Case"),
        ("Architecture Review Document", "Arch Review"),
        ("Solution Architecture Document", "SAD"),
        ("Technology Evaluation Document", "Tech Evaluation"),
    ])
});

/// Lookup hit returns the canonical code; miss passes the raw value
/// through unchanged. Never an error, never drops the row.
pub fn normalize_category(raw: &str, table: &HashMap<&'static str, &'static str>) -> String {
    let trimmed = raw.trim();
    table
        .get(trimmed)
        .map(|code| (*code).to_string())
        .unwrap_or_else(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_agency_maps_to_code() {
        assert_eq!(
            normalize_category("Public Transport Agency", &AGENCY_CODES),
            "PTA"
        );
        assert_eq!(
            normalize_category("  Rail Agency ", &AGENCY_CODES),
            "RA"
        );
    }

    #[test]
    fn test_unknown_value_passes_through() {
        assert_eq!(
            normalize_category("Some New Agency", &AGENCY_CODES),
            "Some New Agency"
        );
        // Unmapped document types keep their raw label.
        assert_eq!(
            normalize_category("Advisory Service", &DOCUMENT_TYPE_LABELS),
            "Advisory Service"
        );
    }
}
