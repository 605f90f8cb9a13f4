// ==========================================
// EA Portal Data Core - shared value types
// ==========================================
// Scope: cell scalars, status enums, tree node kinds
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ==========================================
// CellValue - scalar value of one spreadsheet cell
// ==========================================
// Loaders produce these; the transformation core never mutates a
// RawRow in place, only copies values out into typed records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    /// Calendar date carried by the cell itself (Excel date-formatted cells).
    Ymd { y: i32, m: u32, d: u32 },
}

/// One spreadsheet row: column header -> cell value.
pub type RawRow = HashMap<String, CellValue>;

impl CellValue {
    /// True for `Empty` and for text that trims to nothing.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Trimmed text content, `None` when blank or not textual.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => {
                let t = s.trim();
                if t.is_empty() {
                    None
                } else {
                    Some(t)
                }
            }
            _ => None,
        }
    }

    /// Numeric content: a `Number` cell, or text that parses as a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) if n.is_finite() => Some(*n),
            CellValue::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }

    /// Display form used for filter comparisons and group-by categories.
    pub fn display(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.trim().to_string(),
            CellValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{}", n)
                }
            }
            CellValue::Ymd { y, m, d } => format!("{:02}/{:02}/{:04}", d, m, y),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

// ==========================================
// RequestStatus - CART workflow timeliness
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestStatus {
    #[serde(rename = "Delayed")]
    Delayed,
    #[serde(rename = "In Progress")]
    InProgress,
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestStatus::Delayed => write!(f, "Delayed"),
            RequestStatus::InProgress => write!(f, "In Progress"),
        }
    }
}

// ==========================================
// ProjectStatus - lifecycle status from progress pairs
// ==========================================
// Unknown renders as blank: absence of numeric progress data is a
// data-completeness gap, not a delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectStatus {
    #[serde(rename = "On Track")]
    OnTrack,
    #[serde(rename = "Ahead")]
    Ahead,
    #[serde(rename = "Delayed")]
    Delayed,
    #[serde(rename = "")]
    Unknown,
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProjectStatus::OnTrack => write!(f, "On Track"),
            ProjectStatus::Ahead => write!(f, "Ahead"),
            ProjectStatus::Delayed => write!(f, "Delayed"),
            ProjectStatus::Unknown => write!(f, ""),
        }
    }
}

// ==========================================
// NodeKind - level of a domain tree node
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Root,
    Domain,
    Product,
    Version,
}
