// ==========================================
// EA Portal Data Core - normalization primitives
// ==========================================
// Field renaming and categorical code mapping; composed by the CART,
// project, and technology transformers.
// ==========================================

pub mod category;
pub mod field_mapper;

pub use category::{normalize_category, AGENCY_CODES, DOCUMENT_TYPE_LABELS};
pub use field_mapper::{first_present, map_fields, text_of, FieldMap};
