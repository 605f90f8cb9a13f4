// ==========================================
// EA Portal Data Core - technology inventory records
// ==========================================
// Source is a join table (one row per application/technology/version
// pairing), so aggregation entities keep duplicate application edges
// unless explicitly asked to dedup.
// ==========================================

use crate::domain::types::NodeKind;
use serde::{Deserialize, Serialize};

/// One application depending on a technology entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationRef {
    pub name: String,
    pub owner: String,
    pub criticality: String,
}

/// Deduplicated product+version entity; `id` is the aggregation key
/// `product + "__" + version` (case-sensitive, empty-tolerant).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TechnologyEntity {
    pub id: String,
    pub technology: String,
    pub product: String,
    pub version: String,
    pub vendor: String,
    /// Display dates in DD/MM/YYYY, empty string when unknown.
    pub release_date: String,
    pub eos_date: String,
    pub eol_date: String,
    pub lifecycle_status: String,
    pub technical_owner: String,
    pub business_owner: String,
    pub technical_agency_owner: String,
    pub business_agency_owner: String,
    pub applications: Vec<ApplicationRef>,
    pub applications_count: usize,
}

impl TechnologyEntity {
    pub fn new(id: String, product: String, version: String) -> Self {
        Self {
            id,
            technology: String::new(),
            product,
            version,
            vendor: String::new(),
            release_date: String::new(),
            eos_date: String::new(),
            eol_date: String::new(),
            lifecycle_status: String::new(),
            technical_owner: String::new(),
            business_owner: String::new(),
            technical_agency_owner: String::new(),
            business_agency_owner: String::new(),
            applications: Vec::new(),
            applications_count: 0,
        }
    }
}

/// Per-product rollup: how many distinct versions are in the estate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub name: String,
    pub version_count: usize,
}

// ==========================================
// DomainTreeNode - root -> domain segments -> product -> version
// ==========================================
// Plain serializable tree, children in insertion order, siblings
// unique by name within a parent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainTreeNode {
    pub name: String,
    pub kind: NodeKind,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub children: Vec<DomainTreeNode>,
    /// Distinct versions under a product node; absent elsewhere.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_count: Option<usize>,
}

impl DomainTreeNode {
    pub fn child(&self, name: &str) -> Option<&DomainTreeNode> {
        self.children.iter().find(|c| c.name == name)
    }
}

// ==========================================
// RiskIndexEntry - heuristic risk signals per product+version
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    pub name: String,
    pub code: String,
    /// DD/MM/YYYY where parseable, raw display text otherwise.
    pub expiry_date: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RiskIndexEntry {
    pub vendor: String,
    /// Monotonic OR across rows; once set, never cleared.
    pub has_vulnerability: bool,
    /// Tri-state, sticky: stays `None` until a license-like column
    /// carries an interpretable value.
    pub is_licensed: Option<bool>,
    /// Appended per source row, never deduplicated.
    pub contracts: Vec<Contract>,
}
