// ==========================================
// EA Portal Data Core - filter & group-by pattern
// ==========================================
// Every dashboard view derives its data the same way: one predicate
// pass over the rows, then one group-by pass for each chart.
// ==========================================
// Combination policy (crate-wide, deliberate): filters sharing a key
// OR-fold (multi-select), distinct keys AND.
// ==========================================

use crate::domain::types::RawRow;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One predicate: row[key] equals value (trimmed display comparison).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    pub key: String,
    pub value: String,
}

/// Ordered filter list held by a dashboard view.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterSet {
    filters: Vec<Filter>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: &str, value: &str) {
        self.filters.push(Filter {
            key: key.to_string(),
            value: value.to_string(),
        });
    }

    /// Remove one predicate (toggle-off in the UI).
    pub fn remove(&mut self, key: &str, value: &str) {
        self.filters
            .retain(|f| !(f.key == key && f.value == value));
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// OR within a key, AND across keys. An empty set matches all.
    pub fn matches(&self, row: &RawRow) -> bool {
        let keys: HashSet<&str> = self.filters.iter().map(|f| f.key.as_str()).collect();
        keys.into_iter().all(|key| {
            let cell = row.get(key).map(|v| v.display()).unwrap_or_default();
            self.filters
                .iter()
                .filter(|f| f.key == key)
                .any(|f| f.value == cell)
        })
    }

    /// Single predicate pass over the loaded rows.
    pub fn apply<'a>(&self, rows: &'a [RawRow]) -> Vec<&'a RawRow> {
        rows.iter().filter(|row| self.matches(row)).collect()
    }
}

/// One chart bucket from a group-by-count pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: u64,
}

/// One chart bucket from a group-by-sum pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySum {
    pub category: String,
    pub total: f64,
}

/// Group rows by the display value of `key`. With `split_multi`,
/// comma-separated cells ("strategies") contribute one count per
/// entry. Blank cells contribute nothing. Insertion order.
pub fn group_by_count<'a, I>(rows: I, key: &str, split_multi: bool) -> Vec<CategoryCount>
where
    I: IntoIterator<Item = &'a RawRow>,
{
    let mut buckets: Vec<CategoryCount> = Vec::new();
    let mut bump = |buckets: &mut Vec<CategoryCount>, category: &str| {
        match buckets.iter_mut().find(|b| b.category == category) {
            Some(bucket) => bucket.count += 1,
            None => buckets.push(CategoryCount {
                category: category.to_string(),
                count: 1,
            }),
        }
    };

    for row in rows {
        let value = row.get(key).map(|v| v.display()).unwrap_or_default();
        if split_multi {
            for part in value.split(',').map(str::trim).filter(|s| !s.is_empty()) {
                bump(&mut buckets, part);
            }
        } else if !value.is_empty() {
            bump(&mut buckets, &value);
        }
    }
    buckets
}

/// Group-by-sum: buckets by `key`, summing the numeric content of
/// `value_key`. Non-numeric values contribute nothing.
pub fn group_by_sum<'a, I>(rows: I, key: &str, value_key: &str) -> Vec<CategorySum>
where
    I: IntoIterator<Item = &'a RawRow>,
{
    let mut buckets: Vec<CategorySum> = Vec::new();
    for row in rows {
        let category = row.get(key).map(|v| v.display()).unwrap_or_default();
        if category.is_empty() {
            continue;
        }
        let Some(amount) = row.get(value_key).and_then(|v| v.as_number()) else {
            continue;
        };
        match buckets.iter_mut().find(|b| b.category == category) {
            Some(bucket) => bucket.total += amount,
            None => buckets.push(CategorySum {
                category,
                total: amount,
            }),
        }
    }
    buckets
}

/// Numeric descending by count; stable for ties.
pub fn sort_by_count_desc(buckets: &mut [CategoryCount]) {
    buckets.sort_by(|a, b| b.count.cmp(&a.count));
}

/// Chronological year ordering with the synthetic "Running" bucket
/// placed immediately after the current year; non-year categories
/// trail in their existing order.
pub fn sort_years_with_running(buckets: &mut [CategoryCount], current_year: i32) {
    buckets.sort_by_key(|b| {
        if b.category.eq_ignore_ascii_case("running") {
            current_year as i64 * 2 + 1
        } else {
            match b.category.parse::<i64>() {
                // Saturate: a pathological numeric category must not
                // overflow the sort key, it just trails with non-years.
                Ok(year) => year.saturating_mul(2),
                Err(_) => i64::MAX,
            }
        }
    });
}
