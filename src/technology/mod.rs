// ==========================================
// EA Portal Data Core - technology aggregation engine
// ==========================================
// Three derived views over the same flat technology rows:
// navigation tree, deduplicated entities, risk index.
// ==========================================

pub mod aggregate;
pub mod risk;
pub mod tree;

pub use aggregate::{
    aggregate_technologies, technology_key, AggregationOptions, TechnologyAggregation,
};
pub use risk::extract_risk_index;
pub use tree::build_domain_tree;
