// ==========================================
// EA Portal Data Core - record field mapper
// ==========================================
// Source column -> stable internal key, driven by declarative tables.
// Adding a tracked column means adding one table entry, not new
// parsing code.
// ==========================================

use crate::domain::types::{CellValue, RawRow};

/// Declarative (source column, internal key) table.
pub type FieldMap<'a> = &'a [(&'a str, &'a str)];

/// Copy mapped columns into a fresh row under their internal keys.
///
/// Absent source keys are omitted entirely (never written as Empty);
/// unmapped source columns are dropped. Intentionally lossy.
pub fn map_fields(row: &RawRow, field_map: FieldMap) -> RawRow {
    let mut mapped = RawRow::new();
    for (source, target) in field_map {
        if let Some(value) = row.get(*source) {
            mapped.insert((*target).to_string(), value.clone());
        }
    }
    mapped
}

/// Ordered candidate-key lookup: first alias present with a non-blank
/// value wins. Input column names are not standardized across exports,
/// so every logical field reads through one of these lists.
pub fn first_present<'a>(row: &'a RawRow, aliases: &[&str]) -> Option<&'a CellValue> {
    for alias in aliases {
        if let Some(value) = row.get(*alias) {
            if !value.is_blank() {
                return Some(value);
            }
        }
    }
    None
}

/// Alias lookup yielding trimmed text (numbers render via `display`).
pub fn text_of(row: &RawRow, aliases: &[&str]) -> Option<String> {
    first_present(row, aliases).map(|v| v.display())
}
