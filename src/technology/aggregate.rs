// ==========================================
// EA Portal Data Core - technology entity aggregation
// ==========================================
// Flat join-table rows -> deduplicated product+version entities with
// first-non-empty-wins scalar merging and accumulated application
// dependency edges.
// ==========================================
// Input column names are not standardized across exports, so every
// field reads through an ordered alias list (including the known
// "Realease Date" misspelling present in source data).
// ==========================================

use crate::dates::normalize_date;
use crate::domain::technology::{ApplicationRef, ProductSummary, TechnologyEntity};
use crate::domain::types::RawRow;
use crate::domain::validation::{IssueLevel, ValidationReport};
use crate::normalize::{first_present, text_of};
use std::collections::{HashMap, HashSet};
use tracing::info;

// ===== Column aliases =====
pub(crate) const DOMAIN_KEYS: &[&str] = &["domain", "Domain"];
pub(crate) const PRODUCT_KEYS: &[&str] = &["product", "Product", "Product Name"];
pub(crate) const VERSION_KEYS: &[&str] = &["version", "Version"];
pub(crate) const VENDOR_KEYS: &[&str] = &["vendor", "Vendor", "Manufacturer"];
const TECHNOLOGY_KEYS: &[&str] = &["technology", "Technology"];
// Misspelling first: that is what the current exports actually carry.
const RELEASE_DATE_KEYS: &[&str] = &["Realease Date", "Release Date", "releaseDate"];
const EOS_DATE_KEYS: &[&str] = &["EOS Date", "eosDate", "End of Support Date"];
const EOL_DATE_KEYS: &[&str] = &["EOL Date", "eolDate", "End of Life Date"];
const LIFECYCLE_KEYS: &[&str] = &["lifecycleStatus", "Lifecycle Status", "Status"];
const TECHNICAL_OWNER_KEYS: &[&str] = &["technicalOwner", "Technical Owner"];
const BUSINESS_OWNER_KEYS: &[&str] = &["BusinessOwner", "Business Owner", "businessOwner"];
const TECHNICAL_AGENCY_OWNER_KEYS: &[&str] =
    &["technicalAgencyOwner", "Technical Agency Owner"];
const BUSINESS_AGENCY_OWNER_KEYS: &[&str] = &["BusinessAgencyOwner", "Business Agency Owner"];
const APPLICATION_NAME_KEYS: &[&str] = &["Application Name", "applicationName", "application"];
const APPLICATION_OWNER_KEYS: &[&str] = &["Application Owner", "applicationOwner"];
const APPLICATION_CRITICALITY_KEYS: &[&str] =
    &["Application Criticality", "applicationCriticality", "criticality"];

/// Aggregation key: case-sensitive, empty-string-tolerant.
pub fn technology_key(product: &str, version: &str) -> String {
    format!("{}__{}", product, version)
}

#[derive(Debug, Clone, Default)]
pub struct AggregationOptions {
    /// Keep one application edge per name per entity. Default keeps
    /// duplicates: the source is a join table and repeated rows may
    /// be distinct integration points.
    pub dedup_applications: bool,
}

#[derive(Debug, Clone)]
pub struct TechnologyAggregation {
    /// One entity per product+version key, insertion order.
    pub table_rows: Vec<TechnologyEntity>,
    /// One entry per product with its distinct version count.
    pub product_summary: Vec<ProductSummary>,
    pub report: ValidationReport,
}

/// First-non-empty-wins scalar merge.
fn fill(slot: &mut String, row: &RawRow, aliases: &[&str]) {
    if slot.is_empty() {
        if let Some(value) = text_of(row, aliases) {
            *slot = value;
        }
    }
}

/// Date fields normalize to DD/MM/YYYY where parseable, otherwise the
/// raw display text survives (first-non-empty still wins).
fn fill_date(slot: &mut String, row: &RawRow, aliases: &[&str]) {
    if slot.is_empty() {
        if let Some(cell) = first_present(row, aliases) {
            *slot = normalize_date(cell).unwrap_or_else(|| cell.display());
        }
    }
}

pub fn aggregate_technologies(
    rows: &[RawRow],
    options: &AggregationOptions,
) -> TechnologyAggregation {
    let mut entities: Vec<TechnologyEntity> = Vec::new();
    let mut index_by_key: HashMap<String, usize> = HashMap::new();

    let mut products: Vec<(String, HashSet<String>)> = Vec::new();
    let mut product_index: HashMap<String, usize> = HashMap::new();

    let mut report = ValidationReport::new(rows.len());

    for (idx, row) in rows.iter().enumerate() {
        let row_number = idx + 1;
        let product = text_of(row, PRODUCT_KEYS).unwrap_or_default();
        let version = text_of(row, VERSION_KEYS).unwrap_or_default();

        // Partial rows participate under empty key segments; flagged,
        // never dropped - partial data is common in these exports.
        if product.is_empty() || version.is_empty() {
            report.push(
                row_number,
                IssueLevel::Info,
                "product/version",
                format!(
                    "partial technology row (product: {:?}, version: {:?})",
                    product, version
                ),
            );
        }

        let key = technology_key(&product, &version);
        let entity_idx = match index_by_key.get(&key) {
            Some(idx) => *idx,
            None => {
                entities.push(TechnologyEntity::new(
                    key.clone(),
                    product.clone(),
                    version.clone(),
                ));
                index_by_key.insert(key, entities.len() - 1);
                entities.len() - 1
            }
        };
        let entity = &mut entities[entity_idx];

        fill(&mut entity.technology, row, TECHNOLOGY_KEYS);
        fill(&mut entity.vendor, row, VENDOR_KEYS);
        fill_date(&mut entity.release_date, row, RELEASE_DATE_KEYS);
        fill_date(&mut entity.eos_date, row, EOS_DATE_KEYS);
        fill_date(&mut entity.eol_date, row, EOL_DATE_KEYS);
        fill(&mut entity.lifecycle_status, row, LIFECYCLE_KEYS);
        fill(&mut entity.technical_owner, row, TECHNICAL_OWNER_KEYS);
        fill(&mut entity.business_owner, row, BUSINESS_OWNER_KEYS);
        fill(
            &mut entity.technical_agency_owner,
            row,
            TECHNICAL_AGENCY_OWNER_KEYS,
        );
        fill(
            &mut entity.business_agency_owner,
            row,
            BUSINESS_AGENCY_OWNER_KEYS,
        );

        // One application edge per row carrying a non-empty name.
        if let Some(app_name) = text_of(row, APPLICATION_NAME_KEYS) {
            let duplicate = options.dedup_applications
                && entity.applications.iter().any(|a| a.name == app_name);
            if !duplicate {
                entity.applications.push(ApplicationRef {
                    name: app_name,
                    owner: text_of(row, APPLICATION_OWNER_KEYS).unwrap_or_default(),
                    criticality: text_of(row, APPLICATION_CRITICALITY_KEYS).unwrap_or_default(),
                });
            }
        }

        // Product rollup: distinct non-empty versions per product.
        let product_idx = match product_index.get(&product) {
            Some(idx) => *idx,
            None => {
                products.push((product.clone(), HashSet::new()));
                product_index.insert(product.clone(), products.len() - 1);
                products.len() - 1
            }
        };
        if !version.is_empty() {
            products[product_idx].1.insert(version.clone());
        }
    }

    for entity in &mut entities {
        entity.applications_count = entity.applications.len();
    }
    report.accepted = rows.len();

    info!(
        rows = rows.len(),
        entities = entities.len(),
        products = products.len(),
        partial = report.info_count(),
        "technology rows aggregated"
    );

    TechnologyAggregation {
        table_rows: entities,
        product_summary: products
            .into_iter()
            .map(|(name, versions)| ProductSummary {
                name,
                version_count: versions.len(),
            })
            .collect(),
        report,
    }
}
